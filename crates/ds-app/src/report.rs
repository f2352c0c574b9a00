//! Plain text rendering of profiling results
//!
//! Each view wraps a borrowed result and implements [`fmt::Display`], so the
//! commands can `print!` it and tests can compare the rendered string.

use std::fmt;

use ds_core::Record;
use ds_data::DatasetInfo;
use ds_profile::format::{format_count, format_fixed};
use ds_profile::{
    ChartData, ColumnStats, ColumnTypeMap, CorrelationMatrix, CorrelationRecord,
    PreparedChart, ValidationReport,
};

/// Widest cell printed in a row table
const MAX_CELL_WIDTH: usize = 24;

/// Category rows listed under a bar or pie chart
const MAX_CHART_ROWS: usize = 10;

/// Headline facts about a loaded file
pub struct InfoText<'a>(pub &'a DatasetInfo);

impl fmt::Display for InfoText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.0;
        writeln!(f, "{}", info.title)?;
        writeln!(f, "  File:    {}", info.file_name)?;
        writeln!(f, "  Rows:    {}", format_count(info.row_count))?;
        writeln!(f, "  Columns: {}", format_count(info.column_count))?;
        writeln!(f, "  Size:    {}", info.formatted_size())
    }
}

/// One page of rows as an aligned table
pub struct TableText<'a> {
    pub headers: &'a [String],
    pub rows: &'a [Record],
    /// Footer such as "Page 1 of 3"
    pub footer: String,
}

impl TableText<'_> {
    fn cell(&self, row: &Record, header: &str) -> String {
        let text = row.get(header).map(ToString::to_string).unwrap_or_default();
        truncate(&text, MAX_CELL_WIDTH)
    }
}

impl fmt::Display for TableText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| self.headers.iter().map(|h| self.cell(row, h)).collect())
            .collect();

        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(truncate(header, MAX_CELL_WIDTH).chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let headers: Vec<String> = self.headers.iter().map(|h| truncate(h, MAX_CELL_WIDTH)).collect();
        write_row(f, &headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(f, &rule, &widths)?;
        for row in &cells {
            write_row(f, row, &widths)?;
        }
        writeln!(f, "{}", self.footer)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    writeln!(f, "{}", line.join("  ").trim_end())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(max - 1).collect();
        short.push('…');
        short
    }
}

/// Inferred type per column
pub struct TypesText<'a>(pub &'a ColumnTypeMap);

impl fmt::Display for TypesText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.0.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
        for (name, column_type) in self.0.iter() {
            writeln!(f, "{:<width$}  {}", name, column_type, width = width)?;
        }
        Ok(())
    }
}

/// Statistics of one column
pub struct StatsText<'a> {
    pub column: &'a str,
    pub stats: &'a ColumnStats,
}

impl fmt::Display for StatsText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stats {
            ColumnStats::Numeric(numeric) => {
                writeln!(f, "{} (numeric)", self.column)?;
                if self.stats.is_insufficient() {
                    return writeln!(f, "  Insufficient data");
                }
                writeln!(f, "  Count:   {}", format_count(numeric.count))?;
                writeln!(f, "  Min:     {}", format_fixed(numeric.min, 2))?;
                writeln!(f, "  Max:     {}", format_fixed(numeric.max, 2))?;
                writeln!(f, "  Mean:    {}", format_fixed(numeric.mean, 2))?;
                writeln!(f, "  Median:  {}", format_fixed(numeric.median, 2))?;
                writeln!(f, "  Std Dev: {}", format_fixed(numeric.std_dev, 2))?;
                writeln!(f, "  Sum:     {}", format_fixed(numeric.sum, 2))
            }
            ColumnStats::Categorical(categorical) => {
                writeln!(f, "{} (categorical)", self.column)?;
                writeln!(f, "  Values:  {}", format_count(categorical.total_count))?;
                writeln!(f, "  Unique:  {}", format_count(categorical.unique_count))?;
                if let Some(most) = &categorical.most_common {
                    writeln!(f, "  Most common:  {} ({})", most.value, format_count(most.count))?;
                }
                if let Some(least) = &categorical.least_common {
                    writeln!(f, "  Least common: {} ({})", least.value, format_count(least.count))?;
                }
                Ok(())
            }
        }
    }
}

/// Square correlation matrix with the strongest pair underneath
pub struct MatrixText<'a>(pub &'a CorrelationMatrix);

impl fmt::Display for MatrixText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let matrix = self.0;
        if matrix.columns.is_empty() {
            return writeln!(f, "No numeric columns to correlate");
        }

        let labels: Vec<String> = matrix.columns.iter().map(|c| truncate(c, 12)).collect();
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0).max(6);

        write!(f, "{:width$}", "", width = width)?;
        for label in &labels {
            write!(f, "  {:>width$}", label, width = width)?;
        }
        writeln!(f)?;

        for (label, row) in labels.iter().zip(&matrix.values) {
            write!(f, "{:<width$}", label, width = width)?;
            for value in row {
                write!(f, "  {:>width$.3}", value, width = width)?;
            }
            writeln!(f)?;
        }

        if let Some(strongest) = &matrix.strongest {
            writeln!(
                f,
                "\nStrongest: {} ({:.3})",
                strongest.pair_label(),
                strongest.correlation
            )?;
        }
        Ok(())
    }
}

/// Chart title, insights and a summary of the prepared series
pub struct ChartText<'a>(pub &'a PreparedChart);

impl fmt::Display for ChartText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chart = self.0;
        writeln!(f, "{}", chart.title)?;
        if let Some(notice) = &chart.notice {
            writeln!(f, "Note: {}", notice)?;
        }
        writeln!(f)?;

        match &chart.data {
            ChartData::Histogram { values, bins } => {
                writeln!(f, "{} values in {} bins", format_count(values.len()), bins)?;
            }
            ChartData::Bars { categories, labels, .. } => {
                for (category, label) in categories.iter().zip(labels).take(MAX_CHART_ROWS) {
                    writeln!(f, "  {:<20} {}", truncate(&category.value, 20), label)?;
                }
                if categories.len() > MAX_CHART_ROWS {
                    writeln!(f, "  + {} more", categories.len() - MAX_CHART_ROWS)?;
                }
            }
            ChartData::Pie { slices, .. } => {
                for slice in slices {
                    writeln!(f, "  {:<20} {}", truncate(&slice.value, 20), format_count(slice.count))?;
                }
            }
            ChartData::Scatter { points, .. } => {
                writeln!(f, "{} points", format_count(points.len()))?;
            }
            ChartData::Heatmap { matrix } => {
                write!(f, "{}", MatrixText(matrix))?;
            }
            ChartData::BoxPlot { series } => {
                for s in series {
                    writeln!(f, "  {:<20} {} values", truncate(&s.column, 20), format_count(s.values.len()))?;
                }
            }
        }

        if !chart.insights.is_empty() {
            writeln!(f, "\nInsights")?;
            let width = chart.insights.keys().map(|k| k.chars().count()).max().unwrap_or(0);
            for (key, value) in &chart.insights {
                writeln!(f, "  {:<width$}  {}", key, value, width = width)?;
            }
        }
        Ok(())
    }
}

/// Check results and score, optionally followed by the pair breakdown
pub struct ValidationText<'a> {
    pub report: &'a ValidationReport,
    pub details: bool,
}

impl fmt::Display for ValidationText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(
            f,
            "Data quality: {}/100 ({})",
            report.score.score,
            report.score.grade.label()
        )?;
        writeln!(f)?;
        for (label, result) in [
            ("Row count", &report.row_count),
            ("Numeric variables", &report.numeric_vars),
            ("Missing data", &report.missing_data),
            ("Independence", &report.independence.result),
        ] {
            writeln!(f, "{} {}: {}", result.icon(), label, result.detail)?;
        }

        let breakdown = report.independence.breakdown();
        if !self.details || breakdown.is_empty() {
            return Ok(());
        }

        if breakdown.dependent_count > 0 {
            writeln!(f, "\nDependent pairs ({})", breakdown.dependent_count)?;
            for pair in &breakdown.dependent {
                let direction = if pair.correlation > 0.0 { "↗ Positive" } else { "↘ Negative" };
                write_pair(f, pair, direction)?;
            }
            if breakdown.more_dependent > 0 {
                writeln!(f, "  + {} more dependent pairs", breakdown.more_dependent)?;
            }
        }

        if breakdown.independent_count > 0 {
            writeln!(f, "\nIndependent pairs ({})", breakdown.independent_count)?;
            for pair in &breakdown.independent {
                write_pair(f, pair, "Weak")?;
            }
            if breakdown.more_independent > 0 {
                writeln!(f, "  + {} more independent pairs", breakdown.more_independent)?;
            }
        }

        writeln!(
            f,
            "\nDependent: {}  Moderate: {}  Independent: {}",
            breakdown.dependent_count, breakdown.moderate_count, breakdown.independent_count
        )?;
        writeln!(f, "Total: {} variable pairs analyzed", breakdown.total_pairs)
    }
}

fn write_pair(f: &mut fmt::Formatter<'_>, pair: &CorrelationRecord, direction: &str) -> fmt::Result {
    writeln!(
        f,
        "  {} ⟷ {}  {:.3}  {:>3.0}%  {}",
        pair.col1,
        pair.col2,
        pair.correlation,
        pair.abs_correlation * 100.0,
        direction
    )
}
