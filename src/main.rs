//! zillow-prep command line entry point

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use zillow_prep::explore::{AssociationEngine, AssociationResult};
use zillow_prep::io::{read_csv, write_csv, write_json, write_records_csv, CachedSource, DataSource};
use zillow_prep::ml::{SelectKBest, Splitter};
use zillow_prep::zillow::{self, null_report, split_features_target};
use zillow_prep::{PipelineConfig, RecordTable};

#[derive(Parser)]
#[command(name = "zillow-prep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Prepare and explore the Zillow single-family property extract")]
struct Cli {
    /// Pipeline configuration (TOML); defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the raw extract, using the CSV cache when present
    Acquire {
        /// Query the database even if a cache exists
        #[arg(long)]
        refresh: bool,
    },
    /// Report the null share of every column of the raw extract
    Nulls {
        /// Raw CSV; the configured source is used when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Largest null fraction to report
        #[arg(long)]
        max_null_percent: Option<f64>,

        /// Report file (.csv or .json); printed when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Clean the raw extract and derive modeling features
    Prepare {
        /// Raw CSV; the configured source is used when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Prepared CSV to write
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Pairwise Pearson correlation of the configured columns
    Correlate {
        /// Prepared CSV; the raw source is prepared when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// One-sample t-tests of each county against the rest
    Ttest {
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rank predictors of the training partition by F-statistic
    Select {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Number of predictors to keep
        #[arg(short)]
        k: Option<usize>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write encoded and scaled train/validate/test partitions
    Split {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory receiving train.csv, validate.csv, test.csv and scalers.json
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_toml_file(path)?,
        None => PipelineConfig::default(),
    };

    match cli.command {
        Commands::Acquire { refresh } => {
            config.source.refresh |= refresh;
            let raw = CachedSource::from_config(&config.source).fetch()?;
            println!(
                "{} rows x {} columns",
                raw.row_count(),
                raw.column_count()
            );
        }
        Commands::Nulls {
            input,
            max_null_percent,
            output,
        } => {
            let raw = load_raw(input.as_deref(), &config)?;
            let max = max_null_percent.unwrap_or(config.analysis.max_null_percent);
            let report = null_report(&raw, max)?;
            emit(&report, output.as_deref(), |r| {
                format!("{:<32} {:>8.4} {:>8}", r.column_name, r.percent_null, r.count_null)
            })?;
        }
        Commands::Prepare { input, output } => {
            let raw = load_raw(input.as_deref(), &config)?;
            let prepared = zillow::prepare(&raw, &config.prepare)?;
            write_csv(&prepared, &output)?;
            info!("wrote {} rows to {}", prepared.row_count(), output.display());
        }
        Commands::Correlate { input, output } => {
            let prepared = load_prepared(input.as_deref(), &config)?;
            let results = AssociationEngine::from_config(&config.analysis)
                .pairwise_correlations(&prepared, &config.analysis.correlation_columns)?;
            emit(&results, output.as_deref(), format_association)?;
        }
        Commands::Ttest { input, output } => {
            let prepared = load_prepared(input.as_deref(), &config)?;
            let results = AssociationEngine::from_config(&config.analysis).subgroup_ttests(
                &prepared,
                &config.analysis.category_columns,
                &config.analysis.continuous_columns,
            )?;
            emit(&results, output.as_deref(), format_association)?;
        }
        Commands::Select { input, k, output } => {
            let prepared = load_prepared(input.as_deref(), &config)?;
            let split = Splitter::new(config.split.clone()).split(&prepared)?;
            let frames = zillow::model_ready(&split, &config)?;
            let (x, y) = split_features_target(
                &frames.frames.train,
                &config.analysis.target_column,
                &config.analysis.identifier_columns,
            )?;
            let ranking = SelectKBest::new(k.unwrap_or(config.analysis.k)).fit(&x, &y)?;
            emit(&ranking.scores, output.as_deref(), |s| {
                format!(
                    "{:<40} {:>14.4} {:>12.4e} {}",
                    s.column,
                    s.f_statistic,
                    s.p_value,
                    if s.selected { "*" } else { "" }
                )
            })?;
        }
        Commands::Split { input, out_dir } => {
            let prepared = load_prepared(input.as_deref(), &config)?;
            let split = Splitter::new(config.split.clone()).split(&prepared)?;
            let frames = zillow::model_ready(&split, &config)?;

            std::fs::create_dir_all(&out_dir)?;
            write_csv(&frames.frames.train, out_dir.join("train.csv"))?;
            write_csv(&frames.frames.validate, out_dir.join("validate.csv"))?;
            write_csv(&frames.frames.test, out_dir.join("test.csv"))?;
            write_json(&frames.bindings, out_dir.join("scalers.json"))?;

            let (train, validate, test) = frames.frames.sizes();
            println!("train {}, validate {}, test {}", train, validate, test);
        }
    }

    Ok(())
}

fn load_raw(input: Option<&Path>, config: &PipelineConfig) -> zillow_prep::Result<RecordTable> {
    match input {
        Some(path) => read_csv(path),
        None => CachedSource::from_config(&config.source).fetch(),
    }
}

fn load_prepared(input: Option<&Path>, config: &PipelineConfig) -> zillow_prep::Result<RecordTable> {
    match input {
        Some(path) => read_csv(path),
        None => zillow::prepare(&load_raw(None, config)?, &config.prepare),
    }
}

fn format_association(result: &AssociationResult) -> String {
    format!(
        "{:<60} {:>10.4} {:>12.4e} {}",
        result.label, result.statistic, result.p_value, result.reject_null
    )
}

/// Writes `rows` to `output` (JSON when the extension is `.json`, CSV
/// otherwise) or prints them
fn emit<T, F>(rows: &[T], output: Option<&Path>, line: F) -> zillow_prep::Result<()>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    match output {
        Some(path) if path.extension().map_or(false, |ext| ext == "json") => write_json(rows, path),
        Some(path) => write_records_csv(rows, path),
        None => {
            for row in rows {
                println!("{}", line(row));
            }
            Ok(())
        }
    }
}
