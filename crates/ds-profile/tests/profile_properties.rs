//! Property-based tests for classification, statistics, correlation and scoring

use proptest::prelude::*;

use ds_core::{Dataset, Record, Value};
use ds_profile::{
    classify, correlate, pearson, score_statuses, stats, CheckStatus, ColumnStats, ColumnType,
};

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1_000.0f64..1_000.0).prop_map(Value::Number),
        "[a-d]{0,3}".prop_map(Value::Text),
        (-50i32..50).prop_map(|n| Value::Text(n.to_string())),
    ]
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(
        (value_strategy(), value_strategy(), value_strategy()),
        0..60,
    )
    .prop_map(|rows| {
        let records = rows
            .into_iter()
            .map(|(a, b, c)| Record::new().with("a", a).with("b", b).with("c", c))
            .collect();
        Dataset::new(vec!["a".into(), "b".into(), "c".into()], records)
    })
}

fn status_strategy() -> impl Strategy<Value = CheckStatus> {
    prop_oneof![
        Just(CheckStatus::Fail),
        Just(CheckStatus::Warning),
        Just(CheckStatus::Pass),
    ]
}

fn upgrade(status: CheckStatus) -> CheckStatus {
    match status {
        CheckStatus::Fail => CheckStatus::Warning,
        _ => CheckStatus::Pass,
    }
}

proptest! {
    /// Property: classification is a pure function of the dataset
    #[test]
    fn prop_classification_is_deterministic(dataset in dataset_strategy()) {
        let first = classify(&dataset);
        let second = classify(&dataset);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), 3);
    }

    /// Property: a column with no rows, or only nulls, is empty
    #[test]
    fn prop_null_columns_are_empty(rows in 0usize..40) {
        let dataset = Dataset::new(
            vec!["a".into()],
            (0..rows).map(|_| Record::new().with("a", Value::Null)).collect(),
        );
        prop_assert_eq!(classify(&dataset).get("a"), Some(ColumnType::Empty));
    }

    /// Property: numeric median is the element at floor(n/2) of the sorted values
    #[test]
    fn prop_median_is_upper_middle(values in prop::collection::vec(-1e6f64..1e6, 1..80)) {
        let dataset = Dataset::new(
            vec!["x".into()],
            values.iter().map(|v| Record::new().with("x", *v)).collect(),
        );
        let types = classify(&dataset);
        prop_assert_eq!(types.get("x"), Some(ColumnType::Numeric));

        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        match stats(&dataset, &types, "x") {
            ColumnStats::Numeric(numeric) => {
                prop_assert_eq!(numeric.count, values.len());
                prop_assert_eq!(numeric.median, sorted[values.len() / 2]);
                prop_assert_eq!(numeric.min, sorted[0]);
                prop_assert_eq!(numeric.max, sorted[values.len() - 1]);
                prop_assert!(numeric.std_dev >= 0.0);
            }
            other => prop_assert!(false, "expected numeric stats, got {:?}", other),
        }
    }

    /// Property: frequency counts add up to the non-empty value count
    #[test]
    fn prop_frequency_counts_sum(dataset in dataset_strategy()) {
        let types = classify(&dataset);
        for column in ["a", "b", "c"] {
            if let ColumnStats::Categorical(categorical) = stats(&dataset, &types, column) {
                let sum: usize = categorical.sorted_counts.iter().map(|vc| vc.count).sum();
                prop_assert_eq!(sum, categorical.total_count);
                prop_assert_eq!(categorical.value_counts.len(), categorical.unique_count);
                for pair in categorical.sorted_counts.windows(2) {
                    prop_assert!(pair[0].count >= pair[1].count);
                }
            }
        }
    }

    /// Property: correlation is symmetric and bounded
    #[test]
    fn prop_correlation_symmetric_and_bounded(
        pairs in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 0..50)
    ) {
        let dataset = Dataset::from_records(
            pairs.iter().map(|(x, y)| Record::new().with("x", *x).with("y", *y)).collect(),
        );
        let xy = correlate(&dataset, "x", "y");
        let yx = correlate(&dataset, "y", "x");
        prop_assert_eq!(xy, yx);
        prop_assert!((-1.0..=1.0).contains(&xy));
        if pairs.len() < 2 {
            prop_assert_eq!(xy, 0.0);
        }
    }

    /// Property: a varying column correlates with itself at 1
    #[test]
    fn prop_self_correlation_is_one(values in prop::collection::vec(-1e3f64..1e3, 2..50)) {
        let first = values[0];
        prop_assume!(values.iter().any(|v| (v - first).abs() > 1.0));
        let samples: Vec<(f64, f64)> = values.iter().map(|v| (*v, *v)).collect();
        prop_assert!((pearson(&samples) - 1.0).abs() < 1e-6);
    }

    /// Property: score stays within 0..=100
    #[test]
    fn prop_score_bounds(
        a in status_strategy(),
        b in status_strategy(),
        c in status_strategy(),
        d in status_strategy(),
    ) {
        let score = score_statuses(&[a, b, c, d]);
        prop_assert!(score <= 100);
    }

    /// Property: improving any single check never lowers the score
    #[test]
    fn prop_score_monotonic(
        statuses in prop::array::uniform4(status_strategy()),
        index in 0usize..4,
    ) {
        let before = score_statuses(&statuses);
        let mut improved = statuses;
        improved[index] = upgrade(improved[index]);
        prop_assert!(score_statuses(&improved) >= before);
    }
}
