//! Data quality validation
//!
//! Four independent checks each resolve to pass, warning or fail. Their
//! statuses combine into a weighted score out of 100 and a grade.

mod checks;
mod scoring;

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use ds_core::Dataset;

use crate::column_types::ColumnTypeMap;
use crate::correlation::CorrelationRecord;

pub use checks::{check_independence, check_missing_data, check_numeric_vars, check_row_count};
pub use scoring::{score_statuses, CorrelationBreakdown, Grade, ValidationScore, BREAKDOWN_LIMIT};

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Fail,
    Warning,
    Pass,
}

impl CheckStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "✅",
            CheckStatus::Warning => "⚠️",
            CheckStatus::Fail => "❌",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Warning => "warning",
            CheckStatus::Fail => "fail",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four checks, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckKind {
    RowCount,
    NumericVars,
    MissingData,
    Independence,
}

impl CheckKind {
    pub const ALL: [CheckKind; 4] = [
        CheckKind::RowCount,
        CheckKind::NumericVars,
        CheckKind::MissingData,
        CheckKind::Independence,
    ];

    /// Points awarded for a pass. The weights sum to 100.
    pub fn weight(&self) -> f64 {
        match self {
            CheckKind::RowCount => 25.0,
            CheckKind::NumericVars => 30.0,
            CheckKind::MissingData => 25.0,
            CheckKind::Independence => 20.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckKind::RowCount => "Row count",
            CheckKind::NumericVars => "Numeric variables",
            CheckKind::MissingData => "Missing data",
            CheckKind::Independence => "Variable independence",
        }
    }
}

/// Status and human readable detail of one check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationCheckResult {
    pub status: CheckStatus,
    pub detail: String,
}

impl ValidationCheckResult {
    pub fn new(status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn icon(&self) -> &'static str {
        self.status.icon()
    }
}

/// Independence check result with the correlations it was judged on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndependenceCheck {
    #[serde(flatten)]
    pub result: ValidationCheckResult,
    /// Every numeric pair, empty when fewer than two numeric columns exist
    pub correlations: Vec<CorrelationRecord>,
    pub dependent_pairs: Vec<CorrelationRecord>,
    pub independent_pairs: Vec<CorrelationRecord>,
}

impl IndependenceCheck {
    pub fn status(&self) -> CheckStatus {
        self.result.status
    }

    pub fn breakdown(&self) -> CorrelationBreakdown {
        CorrelationBreakdown::new(self)
    }
}

/// All four checks and the derived score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub row_count: ValidationCheckResult,
    pub numeric_vars: ValidationCheckResult,
    pub missing_data: ValidationCheckResult,
    pub independence: IndependenceCheck,
    pub score: ValidationScore,
}

impl ValidationReport {
    pub fn result(&self, kind: CheckKind) -> &ValidationCheckResult {
        match kind {
            CheckKind::RowCount => &self.row_count,
            CheckKind::NumericVars => &self.numeric_vars,
            CheckKind::MissingData => &self.missing_data,
            CheckKind::Independence => &self.independence.result,
        }
    }

    /// Statuses in [`CheckKind::ALL`] order
    pub fn statuses(&self) -> [CheckStatus; 4] {
        CheckKind::ALL.map(|kind| self.result(kind).status)
    }
}

/// Run every check and score the dataset
pub fn validate(dataset: &Dataset, types: &ColumnTypeMap) -> ValidationReport {
    let row_count = check_row_count(dataset);
    let numeric_vars = check_numeric_vars(dataset, types);
    let missing_data = check_missing_data(dataset);
    let independence = check_independence(dataset, types);

    debug!(
        "Checks: rows={}, numeric={}, missing={}, independence={}",
        row_count.status, numeric_vars.status, missing_data.status, independence.result.status
    );

    let score = ValidationScore::from_statuses(&[
        row_count.status,
        numeric_vars.status,
        missing_data.status,
        independence.result.status,
    ]);

    info!(
        "Validated {} rows x {} columns: score {} ({})",
        dataset.row_count(),
        dataset.column_count(),
        score.score,
        score.grade
    );

    ValidationReport {
        row_count,
        numeric_vars,
        missing_data,
        independence,
        score,
    }
}
