//! Summary information about a loaded dataset

use serde::Serialize;

use ds_core::Dataset;

/// Longest title shown for a dataset
const MAX_TITLE_CHARS: usize = 20;

/// Headline facts shown above the grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub title: String,
    pub file_name: String,
    pub row_count: usize,
    pub column_count: usize,
    /// Size of the rows serialized as JSON
    pub size_bytes: usize,
}

impl DatasetInfo {
    pub fn new(dataset: &Dataset, file_name: &str) -> Self {
        let size_bytes = serde_json::to_string(dataset.records())
            .map(|json| json.len())
            .unwrap_or(0);

        Self {
            title: title_from_file_name(file_name),
            file_name: file_name.to_string(),
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            size_bytes,
        }
    }

    pub fn formatted_size(&self) -> String {
        format_bytes(self.size_bytes as u64)
    }
}

/// Tab title for a file: the name without a `.csv`/`.txt` extension, at most 20 characters
pub fn title_from_file_name(file_name: &str) -> String {
    let lower = file_name.to_ascii_lowercase();
    let stem = if lower.ends_with(".csv") || lower.ends_with(".txt") {
        &file_name[..file_name.len() - 4]
    } else {
        file_name
    };
    stem.chars().take(MAX_TITLE_CHARS).collect()
}

/// Human readable byte count with one decimal place, trailing `.0` dropped
pub fn format_bytes(bytes: u64) -> String {
    const SIZES: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes = bytes as f64;
    let exponent = (bytes.ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(SIZES.len() - 1);
    let scaled = (bytes / 1024f64.powi(exponent as i32) * 10.0).round() / 10.0;
    format!("{} {}", scaled, SIZES[exponent])
}
