//! Dataset, record and cell value types

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Source of dataset versions. Every freshly built dataset gets a new one.
static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

fn next_version() -> u64 {
    NEXT_VERSION.fetch_add(1, Ordering::Relaxed)
}

/// Parse text as a floating point number.
///
/// Surrounding whitespace is ignored; the remaining text must parse in full.
/// The only spelled-out value accepted is `Infinity` with an optional sign, so
/// `inf`, `INF` and `nan` stay text. NaN is never returned.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let unsigned = trimmed
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(trimmed);
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) && unsigned != "Infinity" {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Null or the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Empty, or a number that is NaN
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Number(n) => n.is_nan(),
            other => other.is_empty(),
        }
    }

    /// Whether the value counts as numeric when inferring a column type.
    ///
    /// Numbers always do, text does when it parses as a float.
    pub fn is_numeric(&self) -> bool {
        match self {
            Value::Number(_) => true,
            Value::Text(s) => parse_number(s).is_some(),
            _ => false,
        }
    }

    /// The value as a number, if it has one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if !n.is_nan() => Some(*n),
            Value::Text(s) => parse_number(s),
            _ => None,
        }
    }

    /// String form used for frequency counting and display
    pub fn to_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// One row: column name to value, in the order columns were seen.
///
/// Columns may be missing from a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Get the value of a column, `None` when the column is absent
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Set the value of a column
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(column.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A decoded tabular dataset
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    /// Column names, unique, in first-seen order
    headers: Vec<String>,
    /// Rows in load order
    records: Vec<Record>,
    /// Changes whenever the records are replaced
    #[serde(skip)]
    version: u64,
}

impl Dataset {
    /// Create a dataset from headers and records.
    ///
    /// Duplicate headers are dropped, keeping the first occurrence.
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(headers.len());
        for header in headers {
            if !unique.contains(&header) {
                unique.push(header);
            }
        }

        Self {
            headers: unique,
            records,
            version: next_version(),
        }
    }

    /// Create a dataset whose headers are the keys of its records in first-seen order
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut headers: IndexSet<String> = IndexSet::new();
        for record in &records {
            for key in record.keys() {
                if !headers.contains(key) {
                    headers.insert(key.to_string());
                }
            }
        }

        Self::new(headers.into_iter().collect(), records)
    }

    /// An empty dataset with no columns
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of cells in the rows × headers grid
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.column_count()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace all rows. The dataset gets a new version.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.version = next_version();
    }

    /// Values of a column, one entry per record (`None` where absent)
    pub fn column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        self.records.iter().map(move |record| record.get(column))
    }

    /// Values of a column that are neither null, absent nor the empty string
    pub fn non_empty_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.column(column).flatten().filter(|v| !v.is_empty())
    }

    /// Count of cells that are null, absent, empty or NaN
    pub fn missing_cell_count(&self) -> usize {
        self.records
            .iter()
            .map(|record| {
                self.headers
                    .iter()
                    .filter(|h| record.get(h).map_or(true, Value::is_missing))
                    .count()
            })
            .sum()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}
