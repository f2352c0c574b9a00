use ds_core::Dataset;

use super::{CheckStatus, IndependenceCheck, ValidationCheckResult};
use crate::column_types::ColumnTypeMap;
use crate::correlation::{correlation_matrix, Relationship};
use crate::format::format_count;

const PASS_ROWS: usize = 10_000;
const WARN_ROWS: usize = 1_000;

const PASS_HEADERS: usize = 10;
const PASS_NUMERIC: usize = 7;
const WARN_HEADERS: usize = 8;
const WARN_NUMERIC: usize = 5;

const PASS_MISSING_PERCENT: f64 = 5.0;
const WARN_MISSING_PERCENT: f64 = 10.0;

/// Percentage of pairs that must be independent for a healthy mix
const INDEPENDENT_PERCENT: usize = 30;

/// Enough rows to train on?
pub fn check_row_count(dataset: &Dataset) -> ValidationCheckResult {
    let rows = dataset.row_count();
    let count = format_count(rows);

    if rows >= PASS_ROWS {
        ValidationCheckResult::new(CheckStatus::Pass, format!("{} rows - excellent for ML", count))
    } else if rows >= WARN_ROWS {
        ValidationCheckResult::new(
            CheckStatus::Warning,
            format!("{} rows - more data recommended", count),
        )
    } else {
        ValidationCheckResult::new(
            CheckStatus::Fail,
            format!("{} rows - insufficient (need 10,000+)", count),
        )
    }
}

/// Enough columns, and enough of them numeric?
pub fn check_numeric_vars(dataset: &Dataset, types: &ColumnTypeMap) -> ValidationCheckResult {
    let total = dataset.column_count();
    let numeric = dataset
        .headers()
        .iter()
        .filter(|h| types.is_numeric(h))
        .count();

    if total >= PASS_HEADERS && numeric >= PASS_NUMERIC {
        ValidationCheckResult::new(CheckStatus::Pass, format!("{} numeric of {} total", numeric, total))
    } else if total >= WARN_HEADERS && numeric >= WARN_NUMERIC {
        ValidationCheckResult::new(
            CheckStatus::Warning,
            format!("{} numeric of {} total", numeric, total),
        )
    } else {
        ValidationCheckResult::new(
            CheckStatus::Fail,
            format!("{} numeric of {} - need ≥7 of 10+", numeric, total),
        )
    }
}

/// Share of missing cells in the rows × headers grid, as a percentage.
///
/// A grid without cells counts as entirely missing.
pub fn missing_percent(dataset: &Dataset) -> f64 {
    let cells = dataset.cell_count();
    if cells == 0 {
        return 100.0;
    }
    dataset.missing_cell_count() as f64 / cells as f64 * 100.0
}

/// Few enough missing cells?
pub fn check_missing_data(dataset: &Dataset) -> ValidationCheckResult {
    let percent = missing_percent(dataset);

    if percent < PASS_MISSING_PERCENT {
        ValidationCheckResult::new(CheckStatus::Pass, format!("{:.1}% missing - excellent", percent))
    } else if percent < WARN_MISSING_PERCENT {
        ValidationCheckResult::new(
            CheckStatus::Warning,
            format!("{:.1}% missing - acceptable", percent),
        )
    } else {
        ValidationCheckResult::new(
            CheckStatus::Fail,
            format!("{:.1}% missing - exceeds 10%", percent),
        )
    }
}

/// A healthy mix of independent and dependent numeric pairs?
///
/// Only fails when there are fewer than two numeric columns.
pub fn check_independence(dataset: &Dataset, types: &ColumnTypeMap) -> IndependenceCheck {
    let numeric: Vec<&str> = dataset
        .headers()
        .iter()
        .filter(|h| types.is_numeric(h))
        .map(String::as_str)
        .collect();

    if numeric.len() < 2 {
        return IndependenceCheck {
            result: ValidationCheckResult::new(CheckStatus::Fail, "Not enough numeric columns"),
            correlations: Vec::new(),
            dependent_pairs: Vec::new(),
            independent_pairs: Vec::new(),
        };
    }

    let matrix = correlation_matrix(dataset, &numeric);
    let dependent_pairs: Vec<_> = matrix
        .records
        .iter()
        .filter(|r| r.relationship == Relationship::Dependent)
        .cloned()
        .collect();
    let independent_pairs: Vec<_> = matrix
        .records
        .iter()
        .filter(|r| r.relationship == Relationship::Independent)
        .cloned()
        .collect();

    let total = matrix.records.len();
    let dependent = dependent_pairs.len();
    let independent = independent_pairs.len();
    // Integer form of `independent >= 0.3 * total`, exact at the boundary
    let has_independent = independent * 100 >= total * INDEPENDENT_PERCENT;
    let has_dependent = dependent >= 1;

    let result = match (has_independent, has_dependent) {
        (true, true) => ValidationCheckResult::new(
            CheckStatus::Pass,
            format!("Good mix: {} independent, {} dependent pairs", independent, dependent),
        ),
        (true, false) => ValidationCheckResult::new(
            CheckStatus::Warning,
            format!(
                "{} independent pairs, but no strongly dependent pairs for supervised learning",
                independent
            ),
        ),
        (false, true) => ValidationCheckResult::new(
            CheckStatus::Warning,
            format!("High multicollinearity: {} dependent pairs detected", dependent),
        ),
        (false, false) => {
            ValidationCheckResult::new(CheckStatus::Warning, "Moderate correlations across variables")
        }
    };

    IndependenceCheck {
        result,
        correlations: matrix.records,
        dependent_pairs,
        independent_pairs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column_types::{classify, ColumnType};
    use ds_core::{Record, Value};

    fn rows(n: usize) -> Dataset {
        Dataset::new(
            vec!["a".into()],
            (0..n).map(|i| Record::new().with("a", i as f64)).collect(),
        )
    }

    fn numeric_types(names: &[&str]) -> ColumnTypeMap {
        names
            .iter()
            .map(|n| (n.to_string(), ColumnType::Numeric))
            .collect()
    }

    #[test]
    fn test_row_count_bands() {
        assert_eq!(check_row_count(&rows(999)).status, CheckStatus::Fail);
        assert_eq!(check_row_count(&rows(1000)).status, CheckStatus::Warning);
        assert_eq!(
            check_row_count(&rows(9999)).detail,
            "9,999 rows - more data recommended"
        );
        let pass = check_row_count(&rows(10_000));
        assert_eq!(pass.status, CheckStatus::Pass);
        assert_eq!(pass.detail, "10,000 rows - excellent for ML");
    }

    #[test]
    fn test_numeric_vars_bands() {
        let headers = |n: usize| (0..n).map(|i| format!("c{}", i)).collect::<Vec<_>>();
        let types = |numeric: usize| {
            (0..numeric)
                .map(|i| (format!("c{}", i), ColumnType::Numeric))
                .collect::<ColumnTypeMap>()
        };

        let ds = Dataset::new(headers(10), Vec::new());
        let pass = check_numeric_vars(&ds, &types(7));
        assert_eq!(pass.status, CheckStatus::Pass);
        assert_eq!(pass.detail, "7 numeric of 10 total");

        let ds = Dataset::new(headers(8), Vec::new());
        assert_eq!(check_numeric_vars(&ds, &types(5)).status, CheckStatus::Warning);
        let fail = check_numeric_vars(&ds, &types(4));
        assert_eq!(fail.status, CheckStatus::Fail);
        assert_eq!(fail.detail, "4 numeric of 8 - need ≥7 of 10+");

        // Nine headers with eight numeric only reaches the warning band
        let ds = Dataset::new(headers(9), Vec::new());
        assert_eq!(check_numeric_vars(&ds, &types(8)).status, CheckStatus::Warning);
    }

    #[test]
    fn test_missing_data_bands() {
        let with_missing = |missing: usize| {
            Dataset::new(
                vec!["a".into()],
                (0..100)
                    .map(|i| {
                        if i < missing {
                            Record::new().with("a", Value::Null)
                        } else {
                            Record::new().with("a", 1.0)
                        }
                    })
                    .collect(),
            )
        };

        let pass = check_missing_data(&with_missing(4));
        assert_eq!(pass.status, CheckStatus::Pass);
        assert_eq!(pass.detail, "4.0% missing - excellent");
        assert_eq!(check_missing_data(&with_missing(5)).status, CheckStatus::Warning);
        assert_eq!(check_missing_data(&with_missing(9)).detail, "9.0% missing - acceptable");
        assert_eq!(check_missing_data(&with_missing(10)).status, CheckStatus::Fail);
    }

    #[test]
    fn test_absent_columns_count_as_missing() {
        let ds = Dataset::new(
            vec!["a".into(), "b".into()],
            vec![
                Record::new().with("a", 1.0),
                Record::new().with("a", 1.0).with("b", 2.0),
            ],
        );
        assert_eq!(missing_percent(&ds), 25.0);
    }

    #[test]
    fn test_independence_needs_two_numeric_columns() {
        let ds = rows(10);
        let check = check_independence(&ds, &classify(&ds));
        assert_eq!(check.result.status, CheckStatus::Fail);
        assert_eq!(check.result.detail, "Not enough numeric columns");
        assert!(check.correlations.is_empty());
    }

    #[test]
    fn test_independence_high_multicollinearity() {
        let ds = Dataset::from_records(
            (0..20)
                .map(|i| {
                    let x = i as f64;
                    Record::new().with("x", x).with("y", x * 3.0 + 1.0)
                })
                .collect(),
        );
        let check = check_independence(&ds, &numeric_types(&["x", "y"]));
        assert_eq!(check.result.status, CheckStatus::Warning);
        assert_eq!(check.result.detail, "High multicollinearity: 1 dependent pairs detected");
        assert_eq!(check.dependent_pairs.len(), 1);
    }

    #[test]
    fn test_independence_without_dependent_pairs() {
        // Constant columns correlate as 0 with everything
        let ds = Dataset::from_records(
            (0..20)
                .map(|i| Record::new().with("x", i as f64).with("y", 4.0).with("z", 2.0))
                .collect(),
        );
        let check = check_independence(&ds, &numeric_types(&["x", "y", "z"]));
        assert_eq!(check.result.status, CheckStatus::Warning);
        assert_eq!(
            check.result.detail,
            "3 independent pairs, but no strongly dependent pairs for supervised learning"
        );
        assert_eq!(check.correlations.len(), 3);
    }

    /// Five numeric columns over eight rows, giving ten pairs
    fn five_columns(columns: [[f64; 8]; 5]) -> Dataset {
        Dataset::from_records(
            (0..8)
                .map(|row| {
                    (0..5)
                        .map(|c| (format!("c{}", c), columns[c][row]))
                        .collect::<Record>()
                })
                .collect(),
        )
    }

    #[test]
    fn test_independence_exactly_thirty_percent_passes() {
        // One dependent pair (c0, c3), three independent, six moderate
        let ds = five_columns([
            [4.0, 6.0, 6.0, 0.0, 5.0, 9.0, 2.0, 6.0],
            [2.0, 0.0, 7.0, 6.0, 0.0, 3.0, 8.0, 6.0],
            [1.0, 8.0, 1.0, 8.0, 8.0, 8.0, 5.0, 4.0],
            [1.0, 6.0, 3.0, 2.0, 5.0, 9.0, 0.0, 5.0],
            [5.0, 9.0, 1.0, 5.0, 3.0, 0.0, 6.0, 3.0],
        ]);
        let check = check_independence(&ds, &numeric_types(&["c0", "c1", "c2", "c3", "c4"]));
        assert_eq!(check.correlations.len(), 10);
        assert_eq!(check.independent_pairs.len(), 3);
        assert_eq!(check.dependent_pairs.len(), 1);
        assert_eq!(check.result.status, CheckStatus::Pass);
        assert_eq!(check.result.detail, "Good mix: 3 independent, 1 dependent pairs");
    }

    #[test]
    fn test_independence_below_thirty_percent_warns() {
        // One dependent pair (c2, c3), two independent, seven moderate
        let ds = five_columns([
            [5.0, 1.0, 9.0, 9.0, 8.0, 4.0, 2.0, 6.0],
            [1.0, 8.0, 6.0, 0.0, 9.0, 7.0, 2.0, 6.0],
            [7.0, 8.0, 0.0, 7.0, 4.0, 4.0, 7.0, 7.0],
            [0.0, 0.0, 9.0, 0.0, 6.0, 8.0, 2.0, 6.0],
            [1.0, 8.0, 3.0, 0.0, 1.0, 9.0, 0.0, 8.0],
        ]);
        let check = check_independence(&ds, &numeric_types(&["c0", "c1", "c2", "c3", "c4"]));
        assert_eq!(check.correlations.len(), 10);
        assert_eq!(check.independent_pairs.len(), 2);
        assert_eq!(check.dependent_pairs.len(), 1);
        assert_eq!(check.result.status, CheckStatus::Warning);
        assert_eq!(check.result.detail, "High multicollinearity: 1 dependent pairs detected");
    }

    #[test]
    fn test_independence_moderate_only() {
        // x and y share a trend but with heavy noise: 0.3 <= |r| <= 0.7
        let noise = [3.0, -3.0, 2.0, -4.0, 3.0, -2.0, 4.0, -3.0];
        let ds = Dataset::from_records(
            noise
                .iter()
                .enumerate()
                .map(|(i, n)| Record::new().with("x", i as f64).with("y", i as f64 + n))
                .collect(),
        );
        let r = crate::correlation::correlate(&ds, "x", "y");
        assert!(r.abs() >= 0.3 && r.abs() <= 0.7, "r = {}", r);

        let check = check_independence(&ds, &numeric_types(&["x", "y"]));
        assert_eq!(check.result.status, CheckStatus::Warning);
        assert_eq!(check.result.detail, "Moderate correlations across variables");
    }
}
