//! Chart data preparation
//!
//! Turns a column selection into the series a renderer needs plus a small
//! table of "insights" (label to formatted value) describing the chart.
//! Nothing here draws; the output is plain data.

mod distribution;
mod relationships;

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use ds_core::Dataset;

use crate::column_types::ColumnTypeMap;
use crate::correlation::CorrelationMatrix;
use crate::stats::ValueCount;
use crate::ProfileError;

pub use distribution::{bar_chart, box_plot, histogram, pie_chart};
pub use relationships::{heatmap, scatter};

/// Ordered insight label to display value
pub type Insights = IndexMap<String, String>;

const BASE_COLORS: [&str; 10] = [
    "#007aff", "#34c759", "#ff9500", "#ff3b30", "#5856d6", "#af52de", "#00c7be", "#ff2d55",
    "#64d2ff", "#ffd60a",
];

/// Supported chart types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Histogram,
    Bar,
    Pie,
    Scatter,
    Heatmap,
    #[serde(rename = "boxplot")]
    BoxPlot,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Histogram,
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Scatter,
        ChartKind::Heatmap,
        ChartKind::BoxPlot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Histogram => "histogram",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Heatmap => "heatmap",
            ChartKind::BoxPlot => "boxplot",
        }
    }

    /// Human readable name used in messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ChartKind::Histogram => "histogram",
            ChartKind::Bar => "bar chart",
            ChartKind::Pie => "pie chart",
            ChartKind::Scatter => "scatter plot",
            ChartKind::Heatmap => "heatmap",
            ChartKind::BoxPlot => "box plot",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ChartKind {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "histogram" | "hist" => Ok(ChartKind::Histogram),
            "bar" => Ok(ChartKind::Bar),
            "pie" => Ok(ChartKind::Pie),
            "scatter" => Ok(ChartKind::Scatter),
            "heatmap" => Ok(ChartKind::Heatmap),
            "boxplot" | "box" => Ok(ChartKind::BoxPlot),
            other => Err(ProfileError::UnknownChartKind(other.to_string())),
        }
    }
}

/// One labelled series of a box plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSeries {
    pub column: String,
    pub values: Vec<f64>,
    pub color: String,
}

/// Series for each chart shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ChartData {
    /// Raw numeric values to be binned
    Histogram { values: Vec<f64>, bins: usize },
    /// Counted categories, one bar each
    Bars {
        categories: Vec<ValueCount>,
        /// Text shown on each bar
        labels: Vec<String>,
        colors: Vec<String>,
    },
    Pie {
        slices: Vec<ValueCount>,
        colors: Vec<String>,
    },
    Scatter {
        x_column: String,
        y_column: String,
        points: Vec<(f64, f64)>,
        correlation: f64,
    },
    Heatmap { matrix: CorrelationMatrix },
    #[serde(rename = "boxplot")]
    BoxPlot { series: Vec<BoxSeries> },
}

/// A chart ready to hand to a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedChart {
    /// The chart actually produced, which differs from the request when a
    /// numeric column falls back to a histogram
    pub kind: ChartKind,
    pub title: String,
    pub data: ChartData,
    pub insights: Insights,
    /// Advice for the user when the request was adjusted
    pub notice: Option<String>,
}

/// Prepare a chart of `kind` for the selected columns.
///
/// Histogram, bar and pie charts use the first selected column.
pub fn prepare_chart(
    kind: Option<ChartKind>,
    dataset: &Dataset,
    types: &ColumnTypeMap,
    selected: &[String],
) -> Result<PreparedChart, ProfileError> {
    if selected.is_empty() {
        return Err(ProfileError::NoColumnSelected);
    }
    let kind = kind.ok_or(ProfileError::NoChartSelected)?;

    if let Some(unknown) = selected.iter().find(|c| !dataset.has_column(c)) {
        return Err(ProfileError::UnknownColumn(unknown.clone()));
    }

    debug!("Preparing {} for {:?}", kind, selected);

    let first = selected[0].as_str();
    match kind {
        ChartKind::Histogram => Ok(histogram(dataset, types, first)),
        ChartKind::Bar => Ok(bar_chart(dataset, types, first)),
        ChartKind::Pie => Ok(pie_chart(dataset, types, first)),
        ChartKind::Scatter => scatter(dataset, types, selected),
        ChartKind::Heatmap => heatmap(dataset, types, selected),
        ChartKind::BoxPlot => box_plot(dataset, types, selected),
    }
}

/// `count` distinct colours: the fixed palette while it lasts, evenly
/// spaced hues beyond that
pub fn color_scale(count: usize) -> Vec<String> {
    if count <= BASE_COLORS.len() {
        return BASE_COLORS[..count].iter().map(|c| c.to_string()).collect();
    }
    (0..count)
        .map(|i| {
            let hue = (i as f64 * 360.0 / count as f64) % 360.0;
            format!("hsl({}, 65%, 55%)", hue)
        })
        .collect()
}
