//! Pearson correlation between numeric columns

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use ds_core::{Dataset, Value};

/// `|r|` above this is a dependent pair
pub const DEPENDENT_THRESHOLD: f64 = 0.7;
/// `|r|` below this is an independent pair
pub const INDEPENDENT_THRESHOLD: f64 = 0.3;

/// Strength class of a column pair, judged on `|r|`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Dependent,
    Moderate,
    Independent,
}

impl Relationship {
    pub fn from_abs(abs_correlation: f64) -> Self {
        if abs_correlation > DEPENDENT_THRESHOLD {
            Relationship::Dependent
        } else if abs_correlation < INDEPENDENT_THRESHOLD {
            Relationship::Independent
        } else {
            Relationship::Moderate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Dependent => "dependent",
            Relationship::Moderate => "moderate",
            Relationship::Independent => "independent",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction and strength label for a signed coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CorrelationStrength {
    StrongPositive,
    StrongNegative,
    ModeratePositive,
    ModerateNegative,
    Weak,
}

impl CorrelationStrength {
    pub fn from_correlation(r: f64) -> Self {
        if r > 0.7 {
            CorrelationStrength::StrongPositive
        } else if r < -0.7 {
            CorrelationStrength::StrongNegative
        } else if r > 0.3 {
            CorrelationStrength::ModeratePositive
        } else if r < -0.3 {
            CorrelationStrength::ModerateNegative
        } else {
            CorrelationStrength::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CorrelationStrength::StrongPositive => "Strong Positive",
            CorrelationStrength::StrongNegative => "Strong Negative",
            CorrelationStrength::ModeratePositive => "Moderate Positive",
            CorrelationStrength::ModerateNegative => "Moderate Negative",
            CorrelationStrength::Weak => "Weak",
        }
    }

    /// Coarser label used for the strongest pair of a heatmap, where
    /// anything short of strong reads as moderate
    pub fn heatmap_label(r: f64) -> &'static str {
        match Self::from_correlation(r) {
            CorrelationStrength::StrongPositive => "Strong Positive",
            CorrelationStrength::StrongNegative => "Strong Negative",
            _ => "Moderate",
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Correlation of one unordered column pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationRecord {
    pub col1: String,
    pub col2: String,
    pub correlation: f64,
    pub abs_correlation: f64,
    pub relationship: Relationship,
}

impl CorrelationRecord {
    pub fn new(col1: impl Into<String>, col2: impl Into<String>, correlation: f64) -> Self {
        let abs_correlation = correlation.abs();
        Self {
            col1: col1.into(),
            col2: col2.into(),
            correlation,
            abs_correlation,
            relationship: Relationship::from_abs(abs_correlation),
        }
    }
}

/// The pair with the largest `|r|`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrongestCorrelation {
    pub col1: String,
    pub col2: String,
    pub correlation: f64,
}

impl StrongestCorrelation {
    /// `"a & b"`
    pub fn pair_label(&self) -> String {
        format!("{} & {}", self.col1, self.col2)
    }
}

/// Pairwise correlations of a set of columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Square matrix in `columns` order, diagonal fixed to 1
    pub values: Vec<Vec<f64>>,
    /// One record per pair `i < j`
    pub records: Vec<CorrelationRecord>,
    pub strongest: Option<StrongestCorrelation>,
}

impl CorrelationMatrix {
    pub fn get(&self, col1: &str, col2: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == col1)?;
        let j = self.columns.iter().position(|c| c == col2)?;
        Some(self.values[i][j])
    }

    pub fn count(&self, relationship: Relationship) -> usize {
        self.records
            .iter()
            .filter(|r| r.relationship == relationship)
            .count()
    }
}

/// `(x, y)` samples from rows where both columns hold a number
pub fn paired_samples(dataset: &Dataset, col1: &str, col2: &str) -> Vec<(f64, f64)> {
    dataset
        .records()
        .iter()
        .filter_map(|record| {
            let x = record.get(col1).and_then(Value::as_number)?;
            let y = record.get(col2).and_then(Value::as_number)?;
            Some((x, y))
        })
        .collect()
}

/// Pearson's r by the sum formula.
///
/// Fewer than two samples or a zero denominator give 0.
pub fn pearson(samples: &[(f64, f64)]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }

    let n = samples.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for &(x, y) in samples {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator == 0.0 || denominator.is_nan() {
        return 0.0;
    }
    (numerator / denominator).clamp(-1.0, 1.0)
}

/// Correlation of two columns over the rows where both are numeric
pub fn correlate(dataset: &Dataset, col1: &str, col2: &str) -> f64 {
    pearson(&paired_samples(dataset, col1, col2))
}

/// Correlate every pair of `columns`
pub fn correlation_matrix<S: AsRef<str> + Sync>(dataset: &Dataset, columns: &[S]) -> CorrelationMatrix {
    let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
    let n = columns.len();

    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect();

    // par_iter keeps output order
    let records: Vec<CorrelationRecord> = pairs
        .par_iter()
        .map(|&(i, j)| {
            CorrelationRecord::new(
                columns[i].clone(),
                columns[j].clone(),
                correlate(dataset, &columns[i], &columns[j]),
            )
        })
        .collect();

    let mut values = vec![vec![0.0; n]; n];
    for (i, row) in values.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    for (&(i, j), record) in pairs.iter().zip(&records) {
        values[i][j] = record.correlation;
        values[j][i] = record.correlation;
    }

    let mut strongest: Option<StrongestCorrelation> = None;
    let mut best = 0.0;
    for record in &records {
        if record.abs_correlation > best {
            best = record.abs_correlation;
            strongest = Some(StrongestCorrelation {
                col1: record.col1.clone(),
                col2: record.col2.clone(),
                correlation: record.correlation,
            });
        }
    }

    CorrelationMatrix {
        columns,
        values,
        records,
        strongest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_core::Record;

    fn dataset() -> Dataset {
        let rows = [
            (1.0, 2.0, 5.0, 3.0),
            (2.0, 4.1, 4.0, 1.0),
            (3.0, 6.2, 3.0, 4.0),
            (4.0, 7.9, 2.0, 1.0),
            (5.0, 10.0, 1.0, 5.0),
        ];
        Dataset::from_records(
            rows.iter()
                .map(|(a, b, c, d)| {
                    Record::new()
                        .with("a", *a)
                        .with("b", *b)
                        .with("c", *c)
                        .with("d", *d)
                })
                .collect(),
        )
    }

    #[test]
    fn test_relationship_thresholds() {
        assert_eq!(Relationship::from_abs(0.71), Relationship::Dependent);
        assert_eq!(Relationship::from_abs(0.7), Relationship::Moderate);
        assert_eq!(Relationship::from_abs(0.3), Relationship::Moderate);
        assert_eq!(Relationship::from_abs(0.29), Relationship::Independent);
    }

    #[test]
    fn test_perfect_negative() {
        let ds = dataset();
        assert!((correlate(&ds, "a", "c") + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry_and_self_correlation() {
        let ds = dataset();
        assert_eq!(correlate(&ds, "a", "b"), correlate(&ds, "b", "a"));
        assert!((correlate(&ds, "d", "d") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fewer_than_two_pairs_is_zero() {
        let ds = Dataset::from_records(vec![
            Record::new().with("x", 1.0).with("y", 2.0),
            Record::new().with("x", "n/a").with("y", 3.0),
            Record::new().with("x", 4.0),
        ]);
        assert_eq!(correlate(&ds, "x", "y"), 0.0);
        assert_eq!(pearson(&[]), 0.0);
    }

    #[test]
    fn test_constant_column_is_zero() {
        assert_eq!(pearson(&[(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)]), 0.0);
    }

    #[test]
    fn test_pairwise_deletion() {
        let ds = Dataset::from_records(vec![
            Record::new().with("x", 1.0).with("y", 1.0),
            Record::new().with("x", 2.0).with("y", Value::Null),
            Record::new().with("x", 3.0).with("y", 3.0),
            Record::new().with("x", "bad").with("y", 100.0),
            Record::new().with("x", 5.0).with("y", 5.0),
        ]);
        assert_eq!(paired_samples(&ds, "x", "y").len(), 3);
        assert!((correlate(&ds, "x", "y") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_matrix_records_and_strongest() {
        let ds = dataset();
        let matrix = correlation_matrix(&ds, &["a", "b", "c", "d"]);

        assert_eq!(matrix.records.len(), 6);
        assert_eq!(matrix.records[0].col1, "a");
        assert_eq!(matrix.records[0].col2, "b");
        assert_eq!(matrix.records[5].col1, "c");
        assert_eq!(matrix.records[5].col2, "d");
        for i in 0..4 {
            assert_eq!(matrix.values[i][i], 1.0);
        }
        assert_eq!(matrix.get("b", "a"), matrix.get("a", "b"));

        // a and c are perfectly anti-correlated and come before any tie
        let strongest = matrix.strongest.unwrap();
        assert_eq!(strongest.pair_label(), "a & c");
        assert!(strongest.correlation < -0.99);
    }

    #[test]
    fn test_matrix_of_one_column() {
        let matrix = correlation_matrix(&dataset(), &["a"]);
        assert!(matrix.records.is_empty());
        assert!(matrix.strongest.is_none());
        assert_eq!(matrix.values, vec![vec![1.0]]);
    }

    #[test]
    fn test_strength_labels() {
        assert_eq!(CorrelationStrength::from_correlation(0.85).label(), "Strong Positive");
        assert_eq!(CorrelationStrength::from_correlation(-0.75).label(), "Strong Negative");
        assert_eq!(CorrelationStrength::from_correlation(0.5).label(), "Moderate Positive");
        assert_eq!(CorrelationStrength::from_correlation(-0.31).label(), "Moderate Negative");
        assert_eq!(CorrelationStrength::from_correlation(0.3).label(), "Weak");
        assert_eq!(CorrelationStrength::heatmap_label(0.5), "Moderate");
        assert_eq!(CorrelationStrength::heatmap_label(-0.9), "Strong Negative");
    }
}
