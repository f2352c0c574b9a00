//! Dataset profiling for DataScope
//!
//! Column type inference, descriptive statistics, Pearson correlation and
//! the data quality validation score. Everything here is a pure computation
//! over a borrowed [`Dataset`](ds_core::Dataset), except the [`Session`]
//! which owns the loaded tabs and caches derived results per dataset version.

pub mod charts;
pub mod column_types;
pub mod correlation;
pub mod format;
pub mod session;
pub mod stats;
pub mod validation;

use thiserror::Error;

use ds_core::PageError;

// Re-exports
pub use charts::{prepare_chart, ChartData, ChartKind, Insights, PreparedChart};
pub use column_types::{classify, classify_values, ColumnType, ColumnTypeMap};
pub use correlation::{
    correlate, correlation_matrix, pearson, CorrelationMatrix, CorrelationRecord,
    CorrelationStrength, Relationship, StrongestCorrelation,
};
pub use session::{Session, Tab, TabId};
pub use stats::{stats, CategoricalStats, ColumnStats, NumericStats, ValueCount};
pub use validation::{
    score_statuses, validate, CheckKind, CheckStatus, CorrelationBreakdown, Grade,
    IndependenceCheck, ValidationCheckResult, ValidationReport, ValidationScore,
};

/// Errors raised by chart preparation and session bookkeeping
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Select at least one column")]
    NoColumnSelected,

    #[error("Select a chart type")]
    NoChartSelected,

    #[error("Select at least {required} columns for {chart}")]
    NotEnoughColumns { chart: ChartKind, required: usize },

    #[error("Select at least {required} numeric columns")]
    NotEnoughNumericColumns { chart: ChartKind, required: usize },

    #[error("Select numeric columns for {0}")]
    NoNumericColumns(ChartKind),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Unknown chart type: {0}")]
    UnknownChartKind(String),

    #[error("No tab with id {0}")]
    UnknownTab(TabId),

    #[error("Cannot close the last tab")]
    LastTab,

    #[error("Load a dataset first")]
    NoData,

    #[error(transparent)]
    Page(#[from] PageError),
}
