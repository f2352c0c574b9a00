//! Column type inference
//!
//! Each column is classified from its non-empty values. Rules are tried in
//! order and the first match wins:
//!
//! 1. no values: `empty`
//! 2. more than 90% numeric: `numeric`
//! 3. more than 90% boolean tokens: `boolean`
//! 4. fewer distinct values than `min(50, 10% of values)`: `categorical`
//! 5. otherwise `text`

use std::fmt;

use ahash::AHashSet;
use indexmap::IndexMap;
use serde::Serialize;

use ds_core::{Dataset, Value};

/// Share of values that must be numeric (strictly exceeded)
const NUMERIC_RATIO: f64 = 0.9;
/// Share of values that must be boolean tokens (strictly exceeded)
const BOOLEAN_RATIO: f64 = 0.9;
/// Upper bound on distinct values for a categorical column
const MAX_CATEGORIES: f64 = 50.0;
/// Distinct values must stay below this share of the value count
const CATEGORY_RATIO: f64 = 0.1;

const BOOLEAN_TOKENS: [&str; 8] = ["true", "false", "1", "0", "yes", "no", "t", "f"];

/// Semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Boolean,
    Categorical,
    Text,
    Empty,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Boolean => "boolean",
            ColumnType::Categorical => "categorical",
            ColumnType::Text => "text",
            ColumnType::Empty => "empty",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column name to inferred type, in header order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColumnTypeMap(IndexMap<String, ColumnType>);

impl ColumnTypeMap {
    pub fn get(&self, column: &str) -> Option<ColumnType> {
        self.0.get(column).copied()
    }

    pub fn is_numeric(&self, column: &str) -> bool {
        self.get(column) == Some(ColumnType::Numeric)
    }

    /// Numeric columns in header order
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, ty)| **ty == ColumnType::Numeric)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// How many columns have the given type
    pub fn count_of(&self, column_type: ColumnType) -> usize {
        self.0.values().filter(|ty| **ty == column_type).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.0.iter().map(|(name, ty)| (name.as_str(), *ty))
    }
}

impl FromIterator<(String, ColumnType)> for ColumnTypeMap {
    fn from_iter<I: IntoIterator<Item = (String, ColumnType)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Infer the type of every column
pub fn classify(dataset: &Dataset) -> ColumnTypeMap {
    dataset
        .headers()
        .iter()
        .map(|header| (header.clone(), classify_values(dataset.non_empty_values(header))))
        .collect()
}

/// Classify a column from its non-empty values
pub fn classify_values<'a>(values: impl IntoIterator<Item = &'a Value>) -> ColumnType {
    let values: Vec<&Value> = values.into_iter().collect();
    if values.is_empty() {
        return ColumnType::Empty;
    }
    let total = values.len() as f64;

    let numeric_count = values.iter().filter(|v| v.is_numeric()).count();
    if numeric_count as f64 / total > NUMERIC_RATIO {
        return ColumnType::Numeric;
    }

    let boolean_count = values.iter().filter(|v| is_boolean_token(v)).count();
    if boolean_count as f64 / total > BOOLEAN_RATIO {
        return ColumnType::Boolean;
    }

    let distinct: AHashSet<String> = values.iter().map(|v| v.to_key()).collect();
    if (distinct.len() as f64) < MAX_CATEGORIES.min(total * CATEGORY_RATIO) {
        return ColumnType::Categorical;
    }

    ColumnType::Text
}

fn is_boolean_token(value: &Value) -> bool {
    let key = value.to_key().to_lowercase();
    BOOLEAN_TOKENS.contains(&key.as_str())
}
