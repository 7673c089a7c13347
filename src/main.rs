use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use recall_eval::config::{EvalConfig, TieBreak, DEFAULT_MIN_OVERLAP};
use recall_eval::evaluator::evaluate_directories;
use tracing::Level;

#[derive(Parser)]
#[command(name = "recall-eval")]
#[command(about = "Compute object detection recall by IoU matching detections against ground truth")]
struct Cli {
    /// Minimum IoU for a detection to count, in (0.0, 1.0]
    #[arg(long, short = 'm', default_value_t = DEFAULT_MIN_OVERLAP)]
    min_overlap: f64,

    /// Directory with one ground truth file per image
    #[arg(long, default_value = "input/ground-truth")]
    ground_truth: PathBuf,

    /// Directory with one detection results file per image
    #[arg(long, default_value = "input/detection-results")]
    detection_results: PathBuf,

    /// How to pick between ground truth boxes with the same IoU
    #[arg(long, value_enum, default_value_t = TieBreak::FirstSeen)]
    tie_break: TieBreak,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> recall_eval::Result<()> {
    // Validated before touching the filesystem.
    let config = EvalConfig::new(cli.min_overlap)?.with_tie_break(cli.tie_break);
    tracing::info!("Minimum overlap value for IoU: {}", config.min_overlap());

    let report = evaluate_directories(&cli.ground_truth, &cli.detection_results, &config)?;

    match cli.format {
        Format::Text => print!("{}", report.to_text()?),
        Format::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
