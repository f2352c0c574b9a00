//! Configuration for loading delimited files

use std::path::Path;
use serde::{Serialize, Deserialize};

use super::null_handling::NullConfig;
use crate::DataError;

/// How a delimited file is turned into a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Field delimiter
    pub delimiter: char,

    /// Convert numeric and boolean looking fields into typed values
    pub dynamic_typing: bool,

    /// Drop records whose every field is blank
    pub skip_blank_records: bool,

    /// Null handling configuration
    pub null_config: NullConfig,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            dynamic_typing: true,
            skip_blank_records: false,
            null_config: NullConfig::default(),
        }
    }
}

impl LoadConfig {
    /// Read a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, DataError> {
        let text = std::fs::read_to_string(path)?;
        let config: LoadConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be used by the csv reader
    pub fn validate(&self) -> Result<(), DataError> {
        if !self.delimiter.is_ascii() {
            return Err(DataError::Config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }
        Ok(())
    }

    /// The delimiter as the byte the csv reader expects
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.delimiter as u8
    }
}
