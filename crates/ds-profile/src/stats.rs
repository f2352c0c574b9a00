//! Descriptive statistics per column
//!
//! Numeric columns get count, sum, mean, min, max, median and the population
//! standard deviation. Every other column type gets a frequency table keyed
//! by the string form of each value.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::Serialize;

use ds_core::{Dataset, Value};

use crate::column_types::{ColumnType, ColumnTypeMap};

/// Summary of a numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Element at `floor(count / 2)` of the ascending sort
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub sum: f64,
}

impl NumericStats {
    /// Compute from already parsed values
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        let sum: f64 = values.iter().sum();
        let mean = sum / count as f64;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let (min, max, median) = match (sorted.first(), sorted.last()) {
            (Some(first), Some(last)) => (*first, *last, sorted[count / 2]),
            _ => (f64::NAN, f64::NAN, f64::NAN),
        };

        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Self {
            count,
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
            sum,
        }
    }
}

/// One entry of a frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Frequency summary of a non-numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalStats {
    /// Number of non-empty values
    pub total_count: usize,
    pub unique_count: usize,
    /// Counts in first-seen order
    pub value_counts: IndexMap<String, usize>,
    /// Counts by descending count, ties in first-seen order
    pub sorted_counts: Vec<ValueCount>,
    pub most_common: Option<ValueCount>,
    pub least_common: Option<ValueCount>,
}

impl CategoricalStats {
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut value_counts: IndexMap<String, usize> = IndexMap::new();
        let mut total_count = 0;
        for value in values {
            *value_counts.entry(value.to_key()).or_insert(0) += 1;
            total_count += 1;
        }

        let mut sorted_counts: Vec<ValueCount> = value_counts
            .iter()
            .map(|(value, count)| ValueCount {
                value: value.clone(),
                count: *count,
            })
            .collect();
        // Stable, so equal counts keep insertion order
        sorted_counts.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            total_count,
            unique_count: value_counts.len(),
            most_common: sorted_counts.first().cloned(),
            least_common: sorted_counts.last().cloned(),
            value_counts,
            sorted_counts,
        }
    }

    /// The `n` most frequent values
    pub fn top(&self, n: usize) -> &[ValueCount] {
        &self.sorted_counts[..n.min(self.sorted_counts.len())]
    }
}

/// Statistics for one column, shaped by its type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnStats {
    Numeric(NumericStats),
    Categorical(CategoricalStats),
}

impl ColumnStats {
    /// True when a numeric column had no parsable values, so every
    /// derived figure is NaN
    pub fn is_insufficient(&self) -> bool {
        match self {
            ColumnStats::Numeric(numeric) => numeric.count == 0,
            ColumnStats::Categorical(_) => false,
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericStats> {
        match self {
            ColumnStats::Numeric(numeric) => Some(numeric),
            ColumnStats::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalStats> {
        match self {
            ColumnStats::Categorical(categorical) => Some(categorical),
            ColumnStats::Numeric(_) => None,
        }
    }
}

/// Compute statistics for `column`.
///
/// The column type decides the shape. Unknown columns produce an empty
/// frequency table.
pub fn stats(dataset: &Dataset, types: &ColumnTypeMap, column: &str) -> ColumnStats {
    let values = dataset.non_empty_values(column);
    if types.get(column) == Some(ColumnType::Numeric) {
        let parsed: Vec<f64> = values.filter_map(Value::as_number).collect();
        ColumnStats::Numeric(NumericStats::from_values(&parsed))
    } else {
        ColumnStats::Categorical(CategoricalStats::from_values(values))
    }
}
