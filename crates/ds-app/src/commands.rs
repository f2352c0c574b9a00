//! Subcommand handlers
//!
//! Each handler works on the active tab and prints either a text report or
//! pretty JSON to stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use ds_core::Record;
use ds_data::{export_file_name, write_csv_file, DatasetInfo};
use ds_profile::{correlation_matrix, ChartKind, ColumnStats, Tab};

use crate::report::{
    ChartText, InfoText, MatrixText, StatsText, TableText, TypesText, ValidationText,
};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn info(info: &DatasetInfo, json: bool) -> Result<()> {
    if json {
        return print_json(info);
    }
    print!("{}", InfoText(info));
    Ok(())
}

#[derive(Serialize)]
struct PageOutput<'a> {
    page: usize,
    total_pages: usize,
    rows: &'a [Record],
}

pub fn head(tab: &mut Tab, page: usize, json: bool) -> Result<()> {
    tab.seek_to(page)?;
    let pager = tab.pager();

    if json {
        return print_json(&PageOutput {
            page: pager.current_page(),
            total_pages: pager.display_total_pages(),
            rows: tab.page_rows(),
        });
    }

    print!(
        "{}",
        TableText {
            headers: tab.dataset().headers(),
            rows: tab.page_rows(),
            footer: pager.label(),
        }
    );
    Ok(())
}

pub fn types(tab: &Tab, json: bool) -> Result<()> {
    let types = tab.column_types();
    if json {
        return print_json(types.as_ref());
    }
    print!("{}", TypesText(&types));
    Ok(())
}

#[derive(Serialize)]
struct ColumnSummary {
    column: String,
    #[serde(flatten)]
    stats: ColumnStats,
}

pub fn stats(tab: &Tab, column: Option<&str>, json: bool) -> Result<()> {
    let columns: Vec<&str> = match column {
        Some(column) => vec![column],
        None => tab.dataset().headers().iter().map(String::as_str).collect(),
    };

    let summaries = columns
        .into_iter()
        .map(|column| {
            Ok(ColumnSummary {
                column: column.to_string(),
                stats: tab.stats(column)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if json {
        return print_json(&summaries);
    }
    for (i, summary) in summaries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!(
            "{}",
            StatsText {
                column: &summary.column,
                stats: &summary.stats,
            }
        );
    }
    Ok(())
}

pub fn correlate(tab: &Tab, columns: &[String], json: bool) -> Result<()> {
    let types = tab.column_types();
    let selected: Vec<&str> = if columns.is_empty() {
        types.numeric_columns()
    } else {
        columns.iter().map(String::as_str).collect()
    };
    debug!("Correlating {} columns", selected.len());

    let matrix = correlation_matrix(tab.dataset(), &selected);
    if json {
        return print_json(&matrix);
    }
    print!("{}", MatrixText(&matrix));
    Ok(())
}

pub fn chart(tab: &mut Tab, kind: &str, columns: &[String], json: bool) -> Result<()> {
    let kind: ChartKind = kind.parse()?;
    tab.select_columns(columns)?;
    tab.set_chart_kind(Some(kind));

    let chart = tab.prepare_chart()?;
    if json {
        return print_json(&chart);
    }
    print!("{}", ChartText(&chart));
    Ok(())
}

pub fn validate(tab: &Tab, details: bool, json: bool) -> Result<()> {
    let report = tab.validation()?;
    if json {
        return print_json(report.as_ref());
    }
    print!(
        "{}",
        ValidationText {
            report: &report,
            details,
        }
    );
    Ok(())
}

pub fn export(tab: &Tab, info: &DatasetInfo, output: Option<PathBuf>) -> Result<()> {
    let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(&info.title)));
    write_csv_file(tab.dataset(), &path)
        .with_context(|| format!("Failed to export to {}", path.display()))?;
    println!("Exported {} rows to {}", tab.dataset().row_count(), path.display());
    Ok(())
}
