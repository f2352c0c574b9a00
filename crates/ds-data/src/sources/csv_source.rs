use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use ds_core::{Dataset, Record, Value};
use crate::config::LoadConfig;
use crate::DataError;

/// Numbers at or beyond this magnitude are kept as text to avoid silent precision loss
const MAX_SAFE_FLOAT: f64 = 9_007_199_254_740_992.0;

/// CSV data source for loading delimited files into a dataset
pub struct CsvSource {
    /// Path to the CSV file
    path: PathBuf,
    /// How fields are parsed
    config: LoadConfig,
    /// File name shown to the user
    name: String,
}

impl CsvSource {
    /// Create a new CSV source from a file path
    pub fn new(path: PathBuf, config: LoadConfig) -> Result<Self, DataError> {
        config.validate()?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Dataset")
            .to_string();

        Ok(Self { path, config, name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }
}

#[async_trait]
impl super::DataSource for CsvSource {
    async fn load(&self) -> Result<Dataset, DataError> {
        let path = self.path.clone();
        let config = self.config.clone();
        let name = self.name.clone();

        let dataset = tokio::task::spawn_blocking(move || {
            let file = File::open(&path)?;
            parse_reader(BufReader::new(file), &config, &name)
        })
        .await??;

        info!(
            "Loaded {} rows and {} columns from {}",
            dataset.row_count(),
            dataset.column_count(),
            self.name
        );
        Ok(dataset)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// Parse delimited text with a header row into a dataset.
///
/// Rows shorter than the header leave the trailing columns absent; extra
/// fields are dropped.
pub fn parse_reader<R: Read>(reader: R, config: &LoadConfig, source_name: &str) -> Result<Dataset, DataError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(config.delimiter_byte())
        .from_reader(reader);

    let headers = unique_headers(csv_reader.headers()?);

    let mut records = Vec::new();
    let mut dropped_extra = 0usize;
    for result in csv_reader.records() {
        let row = result?;

        if config.skip_blank_records && row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if row.len() > headers.len() {
            dropped_extra += 1;
        }

        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(header, field)| (header.as_str(), typed_value(field, config)))
            .collect();
        records.push(record);
    }

    if dropped_extra > 0 {
        debug!("{} rows in {} had more fields than headers", dropped_extra, source_name);
    }

    if records.is_empty() {
        return Err(DataError::Empty(source_name.to_string()));
    }

    Ok(Dataset::new(headers, records))
}

/// Parse CSV text held in memory
pub fn parse_str(text: &str, config: &LoadConfig) -> Result<Dataset, DataError> {
    parse_reader(text.as_bytes(), config, "input")
}

/// Convert one raw field into a cell value
pub fn typed_value(field: &str, config: &LoadConfig) -> Value {
    if config.null_config.is_null(field) {
        return Value::Null;
    }
    if !config.dynamic_typing {
        return Value::Text(field.to_string());
    }

    match field {
        "true" | "TRUE" => return Value::Bool(true),
        "false" | "FALSE" => return Value::Bool(false),
        _ => {}
    }

    if looks_like_float(field) {
        if let Ok(number) = field.trim().parse::<f64>() {
            if number > -MAX_SAFE_FLOAT && number < MAX_SAFE_FLOAT {
                return Value::Number(number);
            }
        }
    }

    Value::Text(field.to_string())
}

/// Plain decimal notation: optional minus, digits with an optional point, optional exponent
fn looks_like_float(field: &str) -> bool {
    let s = field.trim().as_bytes();
    let mut i = 0;
    if s.first() == Some(&b'-') {
        i += 1;
    }

    let int_start = i;
    while i < s.len() && s[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < s.len() && s[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < s.len() && s[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < s.len() && (s[i] == b'e' || s[i] == b'E') {
        i += 1;
        if i < s.len() && (s[i] == b'+' || s[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < s.len() && s[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == s.len()
}

/// Header names with duplicates renamed `name_1`, `name_2`, ...
fn unique_headers(raw: &StringRecord) -> Vec<String> {
    let mut headers: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw.iter() {
        let mut candidate = name.to_string();
        let mut suffix = 1;
        while headers.contains(&candidate) {
            candidate = format!("{}_{}", name, suffix);
            suffix += 1;
        }
        headers.push(candidate);
    }
    headers
}
