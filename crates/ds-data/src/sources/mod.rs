pub mod csv_source;

pub use csv_source::CsvSource;

use ds_core::Dataset;
use crate::DataError;

/// Trait for anything that can produce a dataset
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Load the full dataset
    async fn load(&self) -> Result<Dataset, DataError>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}
