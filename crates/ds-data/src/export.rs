//! Dataset export to CSV

use std::fs::File;
use std::io::Write;
use std::path::Path;
use csv::WriterBuilder;
use tracing::info;

use ds_core::{Dataset, Value};
use crate::DataError;

/// Write the dataset as CSV: a header row, then one row per record.
///
/// Null and absent cells become empty fields.
pub fn export_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<(), DataError> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(dataset.headers())?;

    for record in dataset.records() {
        let row = dataset
            .headers()
            .iter()
            .map(|header| record.get(header).map(Value::to_string).unwrap_or_default());
        csv_writer.write_record(row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export to a file on disk
pub fn write_csv_file(dataset: &Dataset, path: &Path) -> Result<(), DataError> {
    let file = File::create(path)?;
    export_csv(dataset, file)?;
    info!("Exported {} rows to {}", dataset.row_count(), path.display());
    Ok(())
}

/// File name for an exported dataset: whitespace runs become `_`
pub fn export_file_name(title: &str) -> String {
    let mut name = String::with_capacity(title.len() + 4);
    let mut in_whitespace = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else {
            name.push(c);
            in_whitespace = false;
        }
    }
    name.push_str(".csv");
    name
}
