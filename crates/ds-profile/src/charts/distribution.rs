//! Single-column distribution charts: histogram, bar, pie and box plot

use tracing::warn;

use ds_core::{Dataset, Value};

use super::{color_scale, BoxSeries, ChartData, ChartKind, Insights, PreparedChart};
use crate::column_types::ColumnTypeMap;
use crate::format::{format_count, format_fixed, format_percent};
use crate::stats::{stats, CategoricalStats, ColumnStats, NumericStats, ValueCount};
use crate::ProfileError;

const MAX_HISTOGRAM_BINS: usize = 30;
const HISTOGRAM_CATEGORIES: usize = 20;
const BAR_CATEGORIES: usize = 25;
const PIE_SLICES: usize = 10;

const PIE_NOTICE: &str = "Pie charts work best with categorical data";

fn numeric_values(dataset: &Dataset, column: &str) -> Vec<f64> {
    dataset
        .non_empty_values(column)
        .filter_map(Value::as_number)
        .collect()
}

/// `"value (count)"`, or `N/A` for an empty column
fn value_with_count(entry: Option<&ValueCount>) -> String {
    entry
        .map(|vc| format!("{} ({})", vc.value, vc.count))
        .unwrap_or_else(|| "N/A".to_string())
}

/// `"count (share%)"`
fn count_with_share(entry: Option<&ValueCount>, total: usize) -> String {
    entry
        .map(|vc| format!("{} ({})", vc.count, format_percent(vc.count, total)))
        .unwrap_or_else(|| "N/A".to_string())
}

fn value_or_na(entry: Option<&ValueCount>) -> String {
    entry
        .map(|vc| vc.value.clone())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Histogram of a numeric column, or value counts of any other column
pub fn histogram(dataset: &Dataset, types: &ColumnTypeMap, column: &str) -> PreparedChart {
    match stats(dataset, types, column) {
        ColumnStats::Numeric(numeric) => numeric_histogram(dataset, column, &numeric),
        ColumnStats::Categorical(categorical) => value_count_histogram(column, &categorical),
    }
}

fn numeric_histogram(dataset: &Dataset, column: &str, numeric: &NumericStats) -> PreparedChart {
    let values = numeric_values(dataset, column);
    let bins = MAX_HISTOGRAM_BINS.min((values.len() as f64).sqrt().ceil() as usize);

    let mut insights = Insights::new();
    insights.insert("Total Values".into(), format_count(numeric.count));
    insights.insert("Mean".into(), format_fixed(numeric.mean, 2));
    insights.insert("Median".into(), format_fixed(numeric.median, 2));
    insights.insert("Std Dev".into(), format_fixed(numeric.std_dev, 2));
    insights.insert("Min".into(), format_fixed(numeric.min, 2));
    insights.insert("Max".into(), format_fixed(numeric.max, 2));

    PreparedChart {
        kind: ChartKind::Histogram,
        title: format!("Histogram: {}", column),
        data: ChartData::Histogram { values, bins },
        insights,
        notice: None,
    }
}

fn value_count_histogram(column: &str, categorical: &CategoricalStats) -> PreparedChart {
    let categories = categorical.top(HISTOGRAM_CATEGORIES).to_vec();
    let labels = categories.iter().map(|vc| vc.count.to_string()).collect();
    let colors = (0..categories.len())
        .map(|i| format!("hsl({}, 70%, 55%)", 210 + i * 15))
        .collect();

    let coverage = categorical
        .most_common
        .as_ref()
        .map(|top| format!("{} by top value", format_percent(top.count, categorical.total_count)))
        .unwrap_or_else(|| "N/A".to_string());

    let mut insights = Insights::new();
    insights.insert("Total Values".into(), format_count(categorical.total_count));
    insights.insert("Distinct Values".into(), format_count(categorical.unique_count));
    insights.insert("Most Common".into(), value_with_count(categorical.most_common.as_ref()));
    insights.insert("Least Common".into(), value_with_count(categorical.least_common.as_ref()));
    insights.insert("Coverage".into(), coverage);

    PreparedChart {
        kind: ChartKind::Histogram,
        title: format!("Histogram: {}", column),
        data: ChartData::Bars {
            categories,
            labels,
            colors,
        },
        insights,
        notice: None,
    }
}

/// Bar chart of the most frequent values. Numeric columns are binned into
/// a histogram instead.
pub fn bar_chart(dataset: &Dataset, types: &ColumnTypeMap, column: &str) -> PreparedChart {
    let categorical = match stats(dataset, types, column) {
        ColumnStats::Categorical(categorical) => categorical,
        ColumnStats::Numeric(numeric) => return numeric_histogram(dataset, column, &numeric),
    };

    let total = categorical.total_count;
    let categories = categorical.top(BAR_CATEGORIES).to_vec();
    let labels = categories
        .iter()
        .map(|vc| format!("{} ({})", vc.count, format_percent(vc.count, total)))
        .collect();
    let colors = color_scale(categories.len());

    let mut insights = Insights::new();
    insights.insert("Total Records".into(), format_count(total));
    insights.insert("Distinct Values".into(), format_count(categorical.unique_count));
    insights.insert("Most Frequent".into(), value_or_na(categorical.most_common.as_ref()));
    insights.insert(
        "Most Freq Count".into(),
        count_with_share(categorical.most_common.as_ref(), total),
    );
    insights.insert("Least Frequent".into(), value_or_na(categorical.least_common.as_ref()));
    insights.insert(
        "Least Freq Count".into(),
        count_with_share(categorical.least_common.as_ref(), total),
    );

    PreparedChart {
        kind: ChartKind::Bar,
        title: format!("Bar Chart: {}", column),
        data: ChartData::Bars {
            categories,
            labels,
            colors,
        },
        insights,
        notice: None,
    }
}

/// Pie of the ten most frequent values, the remainder grouped as `Other`
pub fn pie_chart(dataset: &Dataset, types: &ColumnTypeMap, column: &str) -> PreparedChart {
    let categorical = match stats(dataset, types, column) {
        ColumnStats::Categorical(categorical) => categorical,
        ColumnStats::Numeric(numeric) => {
            warn!("{}: {}", PIE_NOTICE, column);
            let mut chart = numeric_histogram(dataset, column, &numeric);
            chart.notice = Some(PIE_NOTICE.to_string());
            return chart;
        }
    };

    let total = categorical.total_count;
    let mut slices = categorical.top(PIE_SLICES).to_vec();
    let other: usize = categorical
        .sorted_counts
        .iter()
        .skip(PIE_SLICES)
        .map(|vc| vc.count)
        .sum();
    if other > 0 {
        slices.push(ValueCount {
            value: "Other".to_string(),
            count: other,
        });
    }
    let colors = color_scale(slices.len());

    let segment = |entry: Option<&ValueCount>| {
        entry
            .map(|vc| format!("{} ({})", vc.value, format_percent(vc.count, total)))
            .unwrap_or_else(|| "N/A".to_string())
    };

    let mut insights = Insights::new();
    insights.insert("Total Records".into(), format_count(total));
    insights.insert("Categories Shown".into(), slices.len().to_string());
    insights.insert("Largest Segment".into(), segment(categorical.most_common.as_ref()));
    insights.insert("Smallest Segment".into(), segment(categorical.least_common.as_ref()));

    PreparedChart {
        kind: ChartKind::Pie,
        title: format!("Pie Chart: {}", column),
        data: ChartData::Pie { slices, colors },
        insights,
        notice: None,
    }
}

/// Box plot of every selected numeric column
pub fn box_plot(
    dataset: &Dataset,
    types: &ColumnTypeMap,
    selected: &[String],
) -> Result<PreparedChart, ProfileError> {
    let numeric: Vec<&String> = selected.iter().filter(|c| types.is_numeric(c)).collect();
    if numeric.is_empty() {
        return Err(ProfileError::NoNumericColumns(ChartKind::BoxPlot));
    }

    let colors = color_scale(numeric.len());
    let mut insights = Insights::new();
    let mut series = Vec::with_capacity(numeric.len());

    for (column, color) in numeric.iter().zip(colors) {
        let median = stats(dataset, types, column)
            .as_numeric()
            .map(|n| n.median)
            .unwrap_or(f64::NAN);
        insights.insert(format!("{} Median", column), format_fixed(median, 2));
        series.push(BoxSeries {
            column: column.to_string(),
            values: numeric_values(dataset, column),
            color,
        });
    }
    insights.insert("Variables".into(), numeric.len().to_string());

    Ok(PreparedChart {
        kind: ChartKind::BoxPlot,
        title: "Box Plot".to_string(),
        data: ChartData::BoxPlot { series },
        insights,
        notice: None,
    })
}
