mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Deserialize;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use turnover_roi_core::inputs::InputField;
use turnover_roi_core::RoiError;

use commands::roi::{ExportArgs, RoiArgs};
use commands::sensitivity::SensitivityArgs;

const CALCULATION_FAILED: &str =
    "An error occurred in the calculation. Please check the values entered.";

/// HR turnover cost and system ROI calculator
#[derive(Parser)]
#[command(
    name = "troi",
    version,
    about = "HR turnover cost and system ROI calculator",
    long_about = "Estimates what employee turnover costs a company and how quickly an HR \
                  system that reduces it pays for itself. Reports turnover rate, cost per \
                  departure, annual turnover cost, projected savings, ROI and payback, \
                  with advisory insights."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (defaults to the config file setting, then json)
    #[arg(long, global = true)]
    output: Option<OutputFormat>,

    /// Config file (defaults to the nearest .turnover-roi.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate turnover cost, savings, ROI, payback and insights
    Calculate(RoiArgs),
    /// Formatted results card (pt-BR currency and percentages)
    Report(RoiArgs),
    /// Snapshot of the key figures for sharing
    Export(ExportArgs),
    /// Sweep one input and watch ROI move
    Sensitivity(SensitivityArgs),
    /// Show the cost parameters used when none are given
    Defaults,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.config {
        Some(ref path) => match config::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e);
                process::exit(1);
            }
        },
        None => config::discover(),
    };
    let defaults = &config.parameters;
    let format = cli.output.or(config.output).unwrap_or(OutputFormat::Json);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::roi::run_calculate(args, defaults),
        Commands::Report(args) => commands::roi::run_report(args, defaults),
        Commands::Export(args) => commands::roi::run_export(args, defaults),
        Commands::Sensitivity(args) => commands::sensitivity::run_sensitivity(args, defaults),
        Commands::Defaults => serde_json::to_value(defaults).map_err(Into::into),
        Commands::Version => {
            println!("troi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Err(e) => {
            report_error(e.as_ref());
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Validation problems are shown as-is with the field to correct. Any other
/// failure inside the engine gets one generic message; details go to the log.
fn report_error(err: &(dyn std::error::Error + 'static)) {
    let prefix = "error".red().bold();
    match err.downcast_ref::<RoiError>() {
        Some(roi) if roi.is_validation() => {
            eprintln!("{}: {}", prefix, roi);
            if let Some(field) = roi.field() {
                match InputField::from_key(field) {
                    Some(known) => eprintln!("  field: {} ({})", known.label(), known.key()),
                    None => eprintln!("  field: {}", field),
                }
            }
        }
        Some(roi) => {
            tracing::error!(error = %roi, "calculation failed");
            eprintln!("{}: {}", prefix, CALCULATION_FAILED);
        }
        None => eprintln!("{}: {}", prefix, err),
    }
}
