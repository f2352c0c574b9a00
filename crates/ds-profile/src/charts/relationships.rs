//! Multi-column charts: scatter plot and correlation heatmap

use ds_core::Dataset;

use super::{ChartData, ChartKind, Insights, PreparedChart};
use crate::column_types::ColumnTypeMap;
use crate::correlation::{correlation_matrix, paired_samples, pearson, CorrelationStrength};
use crate::format::{format_count, format_fixed};
use crate::stats::stats;
use crate::ProfileError;

/// Scatter of the first two selected columns with their correlation
pub fn scatter(
    dataset: &Dataset,
    types: &ColumnTypeMap,
    selected: &[String],
) -> Result<PreparedChart, ProfileError> {
    let (x_column, y_column) = match selected {
        [x, y, ..] => (x.as_str(), y.as_str()),
        _ => {
            return Err(ProfileError::NotEnoughColumns {
                chart: ChartKind::Scatter,
                required: 2,
            })
        }
    };

    let points = paired_samples(dataset, x_column, y_column);
    let correlation = pearson(&points);

    let mean = |column: &str| {
        stats(dataset, types, column)
            .as_numeric()
            .map(|n| format_fixed(n.mean, 2))
            .unwrap_or_else(|| "N/A".to_string())
    };

    let mut insights = Insights::new();
    insights.insert("Data Points".into(), format_count(points.len()));
    insights.insert("Correlation".into(), format!("{:.3}", correlation));
    insights.insert(
        "Relationship".into(),
        CorrelationStrength::from_correlation(correlation).label().to_string(),
    );
    insights.insert(format!("{} Mean", x_column), mean(x_column));
    insights.insert(format!("{} Mean", y_column), mean(y_column));

    Ok(PreparedChart {
        kind: ChartKind::Scatter,
        title: format!("Scatter: {} vs {}", x_column, y_column),
        data: ChartData::Scatter {
            x_column: x_column.to_string(),
            y_column: y_column.to_string(),
            points,
            correlation,
        },
        insights,
        notice: None,
    })
}

/// Correlation matrix of the selected numeric columns
pub fn heatmap(
    dataset: &Dataset,
    types: &ColumnTypeMap,
    selected: &[String],
) -> Result<PreparedChart, ProfileError> {
    let numeric: Vec<&str> = selected
        .iter()
        .map(String::as_str)
        .filter(|c| types.is_numeric(c))
        .collect();
    if numeric.len() < 2 {
        return Err(ProfileError::NotEnoughNumericColumns {
            chart: ChartKind::Heatmap,
            required: 2,
        });
    }

    let matrix = correlation_matrix(dataset, &numeric);

    let (pair, value) = match &matrix.strongest {
        Some(strongest) => (strongest.pair_label(), strongest.correlation),
        None => ("N/A".to_string(), 0.0),
    };

    let mut insights = Insights::new();
    insights.insert("Variables".into(), numeric.len().to_string());
    insights.insert("Strongest Correlation".into(), pair);
    insights.insert("Correlation Value".into(), format!("{:.3}", value));
    insights.insert(
        "Relationship".into(),
        CorrelationStrength::heatmap_label(value).to_string(),
    );

    Ok(PreparedChart {
        kind: ChartKind::Heatmap,
        title: "Correlation Heatmap".to_string(),
        data: ChartData::Heatmap { matrix },
        insights,
        notice: None,
    })
}
