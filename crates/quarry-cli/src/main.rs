use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quarry_cli::pipeline::write_outputs;
use quarry_cli::{run_experiment, CorpusFormat, ProgressPrinter};
use quarry_core::config::{CliOverrides, QuarryConfig};
use quarry_core::errors::{ConfigError, DataError, LearningError, QuarryErrorCode, StorageError};
use quarry_core::events::LoopEventHandler;

#[derive(Parser)]
#[command(
    name = "quarry",
    version,
    about = "Active-learning experiment runner for binary text classification"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the full experiment on a labeled corpus
    Run {
        /// JSONL file or a directory with pos/ and neg/ subdirectories
        #[arg(long)]
        corpus: PathBuf,
        /// Corpus layout; detected from the path when omitted
        #[arg(long, value_enum)]
        format: Option<CorpusFormat>,
        #[command(flatten)]
        settings: SettingsArgs,
        /// Sampling cycles after the initial fit
        #[arg(long)]
        iterations: Option<usize>,
        /// Examples requested per sampling step
        #[arg(long)]
        sampling_size: Option<usize>,
        #[arg(long)]
        max_epochs: Option<usize>,
        /// Non-improving epochs tolerated before early stopping
        #[arg(long)]
        patience: Option<usize>,
        #[arg(long)]
        checkpoint_dir: Option<String>,
        /// Per-epoch metrics export (.csv or .json)
        #[arg(long)]
        metrics_out: Option<String>,
        /// JSON run report
        #[arg(long)]
        report_out: Option<String>,
        /// Suppress per-round progress lines
        #[arg(long)]
        quiet: bool,
    },
    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(clap::Args)]
struct SettingsArgs {
    /// Config file; defaults to ./quarry.toml when present
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    quarry_core::tracing::init_tracing();

    match dispatch(cli.cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", render_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cmd: Cmd) -> Result<()> {
    match cmd {
        Cmd::Run {
            corpus,
            format,
            settings,
            iterations,
            sampling_size,
            max_epochs,
            patience,
            checkpoint_dir,
            metrics_out,
            report_out,
            quiet,
        } => {
            let overrides = CliOverrides {
                num_iterations: iterations,
                sampling_size,
                max_epochs,
                early_stopping_patience: patience,
                checkpoint_dir,
                metrics_path: metrics_out,
                report_path: report_out,
            };
            let config = load_config(settings.config.as_deref(), &overrides)?;
            run(&corpus, format, &config, quiet)
        }
        Cmd::Config { settings } => {
            let config = load_config(settings.config.as_deref(), &CliOverrides::default())?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<QuarryConfig> {
    let config = match path {
        Some(path) => QuarryConfig::load_file(path, Some(overrides))?,
        None => {
            let cwd = std::env::current_dir().context("resolve working directory")?;
            QuarryConfig::load(&cwd, Some(overrides))?
        }
    };
    Ok(config)
}

fn run(corpus: &Path, format: Option<CorpusFormat>, config: &QuarryConfig, quiet: bool) -> Result<()> {
    let format = format.unwrap_or_else(|| CorpusFormat::detect(corpus));
    let handlers: Vec<Arc<dyn LoopEventHandler>> = if quiet {
        Vec::new()
    } else {
        vec![Arc::new(ProgressPrinter)]
    };

    let outcome = run_experiment(corpus, format, config, handlers)?;
    write_outputs(&outcome, &config.output)?;

    let report = &outcome.report;
    let eval = &report.final_evaluation;
    println!(
        "best round {} | val loss {:.4} | test accuracy {:.4} | fp {} fn {} | train {} | reservoir {} pos / {} neg",
        report.best_round,
        report.best_validation_loss,
        eval.accuracy,
        eval.false_positives,
        eval.false_negatives,
        report.final_train_size,
        report.reservoir_remaining_positive,
        report.reservoir_remaining_negative,
    );
    Ok(())
}

/// Coded `[CODE] message` for workspace errors, the full chain otherwise.
fn render_error(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<LearningError>() {
        e.coded_string()
    } else if let Some(e) = err.downcast_ref::<ConfigError>() {
        e.coded_string()
    } else if let Some(e) = err.downcast_ref::<DataError>() {
        e.coded_string()
    } else if let Some(e) = err.downcast_ref::<StorageError>() {
        e.coded_string()
    } else {
        format!("{err:#}")
    }
}
