//! Null value handling for data loading

use serde::{Serialize, Deserialize};

/// Null value configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NullConfig {
    /// Patterns to treat as null
    pub patterns: Vec<String>,

    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,

    /// Case sensitive matching
    pub case_sensitive: bool,
}

impl Default for NullConfig {
    /// Only the empty field is null.
    fn default() -> Self {
        Self {
            patterns: vec![String::new()],
            trim_whitespace: false,
            case_sensitive: true,
        }
    }
}

impl NullConfig {
    /// A broader set of placeholders commonly found in exported spreadsheets
    pub fn common_placeholders() -> Self {
        Self {
            patterns: vec![
                String::new(),
                "-".to_string(),
                "N/A".to_string(),
                "NA".to_string(),
                "null".to_string(),
                "None".to_string(),
                "?".to_string(),
            ],
            trim_whitespace: true,
            case_sensitive: false,
        }
    }

    /// Check if a value should be treated as null
    pub fn is_null(&self, value: &str) -> bool {
        let test_value = if self.trim_whitespace {
            value.trim()
        } else {
            value
        };

        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                test_value == pattern
            } else {
                test_value.eq_ignore_ascii_case(pattern)
            }
        })
    }

    /// Add a null pattern unless it is already present
    pub fn add_pattern(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }

    /// Switch to [`NullConfig::common_placeholders`] matching, keeping any
    /// patterns already configured
    pub fn include_common_placeholders(&mut self) {
        let existing = std::mem::replace(self, Self::common_placeholders());
        for pattern in existing.patterns {
            self.add_pattern(pattern);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_only_matches_empty() {
        let config = NullConfig::default();
        assert!(config.is_null(""));
        assert!(!config.is_null(" "));
        assert!(!config.is_null("NULL"));
    }

    #[test]
    fn test_common_placeholders() {
        let config = NullConfig::common_placeholders();
        assert!(config.is_null("n/a"));
        assert!(config.is_null("  NULL "));
        assert!(!config.is_null("0"));
    }

    #[test]
    fn test_add_pattern_skips_duplicates() {
        let mut config = NullConfig::default();
        config.add_pattern("missing");
        config.add_pattern("missing".to_string());
        assert_eq!(config.patterns.len(), 2);
        assert!(config.is_null("missing"));
    }

    #[test]
    fn test_include_common_placeholders_keeps_patterns() {
        let mut config = NullConfig::default();
        config.add_pattern("###");
        config.include_common_placeholders();

        assert!(config.is_null("###"));
        assert!(config.is_null(" none "));
        assert!(!config.case_sensitive);
        assert_eq!(config.patterns.iter().filter(|p| p.is_empty()).count(), 1);
    }
}
