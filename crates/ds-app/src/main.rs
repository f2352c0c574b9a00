//! DataScope command line entry point

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ds_data::{CsvSource, DataSource, DatasetInfo, LoadConfig};
use ds_profile::Session;

mod commands;
mod report;

/// DataScope - profile CSV datasets and score their readiness for machine learning
#[derive(Parser)]
#[command(name = "datascope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with CSV loading options
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat common placeholders (NA, N/A, null, None, -, ?) as missing values
    #[arg(long, global = true)]
    common_nulls: bool,

    /// Treat this exact text as a missing value (repeatable)
    #[arg(long = "null", value_name = "TEXT", global = true)]
    null_patterns: Vec<String>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display dataset information
    Info {
        /// Path to CSV file
        path: PathBuf,
    },
    /// Display one page of rows
    Head {
        /// Path to CSV file
        path: PathBuf,
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Display the inferred type of every column
    Types {
        /// Path to CSV file
        path: PathBuf,
    },
    /// Descriptive statistics for one column, or all columns
    Stats {
        /// Path to CSV file
        path: PathBuf,
        /// Column name
        column: Option<String>,
    },
    /// Pearson correlation matrix of numeric columns
    Correlate {
        /// Path to CSV file
        path: PathBuf,
        /// Columns to correlate (default: every numeric column)
        columns: Vec<String>,
    },
    /// Prepare a chart and print its insights
    Chart {
        /// Path to CSV file
        path: PathBuf,
        /// Chart type: histogram, bar, pie, scatter, heatmap or boxplot
        kind: String,
        /// Selected columns
        #[arg(required = true)]
        columns: Vec<String>,
    },
    /// Run the data quality checks and print the score
    Validate {
        /// Path to CSV file
        path: PathBuf,
        /// List the correlated and independent pairs
        #[arg(long)]
        details: bool,
    },
    /// Write the dataset back out as CSV
    Export {
        /// Path to CSV file
        path: PathBuf,
        /// Output file (default: derived from the dataset title)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    fn path(&self) -> &Path {
        match self {
            Commands::Info { path }
            | Commands::Head { path, .. }
            | Commands::Types { path }
            | Commands::Stats { path, .. }
            | Commands::Correlate { path, .. }
            | Commands::Chart { path, .. }
            | Commands::Validate { path, .. }
            | Commands::Export { path, .. } => path,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.common_nulls, &cli.null_patterns)?;
    let (mut session, info) = load_session(cli.command.path(), config).await?;
    let json = cli.json;
    let tab = session.active_mut();

    match cli.command {
        Commands::Info { .. } => commands::info(&info, json),
        Commands::Head { page, .. } => commands::head(tab, page, json),
        Commands::Types { .. } => commands::types(tab, json),
        Commands::Stats { column, .. } => commands::stats(tab, column.as_deref(), json),
        Commands::Correlate { columns, .. } => commands::correlate(tab, &columns, json),
        Commands::Chart { kind, columns, .. } => commands::chart(tab, &kind, &columns, json),
        Commands::Validate { details, .. } => commands::validate(tab, details, json),
        Commands::Export { output, .. } => commands::export(tab, &info, output),
    }
}

/// Log to stderr so that stdout carries only the report
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loading options from the config file, then the null flags on top
fn load_config(path: Option<&Path>, common_nulls: bool, null_patterns: &[String]) -> Result<LoadConfig> {
    let mut config = match path {
        Some(config_path) => LoadConfig::from_json_file(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?,
        None => LoadConfig::default(),
    };

    if common_nulls {
        config.null_config.include_common_placeholders();
    }
    for pattern in null_patterns {
        config.null_config.add_pattern(pattern.as_str());
    }

    debug!("Load config: {:?}", config);
    Ok(config)
}

/// Load a CSV file into the active tab of a fresh session
async fn load_session(path: &Path, config: LoadConfig) -> Result<(Session, DatasetInfo)> {

    let source = CsvSource::new(path.to_path_buf(), config)?;
    let dataset = source
        .load()
        .await
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let info = DatasetInfo::new(&dataset, source.source_name());
    info!("Opened {} ({})", info.title, info.formatted_size());

    let mut session = Session::new();
    session.load_into_active(dataset, info.file_name.clone(), info.title.clone());
    Ok((session, info))
}
