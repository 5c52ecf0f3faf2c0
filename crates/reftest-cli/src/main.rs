//! CLI tool for checking binary reference vectors.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser, Subcommand};
use reftest_core::CheckReport;

use crate::commands::{
    BoundsArgs, BoundsTimes, CorridorArgs, SimilarityArgs, ThresholdArgs, check_bounds,
    check_corridor, check_similarity, check_threshold, cmd_dump, cmd_inspect, print_report,
};
use crate::error::CliResult;

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the header of a blob (type tag, element size, element count)
    Inspect { file: PathBuf },

    /// Print the values stored in a blob, one per line
    Dump { file: PathBuf },

    /// Check min[i] <= test[i] <= max[i] for every sample
    Bounds {
        #[arg(long)]
        test: PathBuf,

        #[arg(long)]
        min: PathBuf,

        #[arg(long)]
        max: PathBuf,

        /// Time base of --test; enables time-varying bounds
        #[arg(long = "test-time", requires_all = ["min_time", "max_time"])]
        test_time: Option<PathBuf>,

        #[arg(long = "min-time", requires = "test_time")]
        min_time: Option<PathBuf>,

        #[arg(long = "max-time", requires = "test_time")]
        max_time: Option<PathBuf>,
    },

    /// Compare a series with a paired reference
    #[command(group(
        ArgGroup::new("metric")
            .required(true)
            .multiple(true)
            .args(["variance", "mean_diff"])
    ))]
    Similarity {
        #[arg(long)]
        test: PathBuf,

        #[arg(long)]
        reference: PathBuf,

        /// Maximum mean squared deviation from the reference
        #[arg(long)]
        variance: Option<f64>,

        /// Maximum absolute difference of the means
        #[arg(long = "mean-diff")]
        mean_diff: Option<f64>,
    },

    /// Require a minimum number of samples beyond a threshold
    Threshold {
        #[arg(long)]
        test: PathBuf,

        #[arg(long, allow_negative_numbers = true)]
        threshold: f64,

        #[arg(long = "min-count")]
        min_count: usize,

        /// Count samples strictly below the threshold instead of above
        #[arg(long, default_value_t = false)]
        below: bool,

        /// Require the samples to be adjacent
        #[arg(long, default_value_t = false)]
        consecutive: bool,
    },

    /// Check that a 2D trajectory stays between two boundary polylines
    Corridor {
        #[arg(long)]
        x: PathBuf,

        #[arg(long)]
        y: PathBuf,

        #[arg(long = "x-left")]
        x_left: PathBuf,

        #[arg(long = "y-left")]
        y_left: PathBuf,

        #[arg(long = "x-right")]
        x_right: PathBuf,

        #[arg(long = "y-right")]
        y_right: PathBuf,
    },
}

#[derive(Debug, Parser)]
#[command(name = "reftest", version, about = "Reference-data checks over binary vector blobs")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    cmd: Command,
}

fn finish(report: CheckReport, json: bool) -> CliResult<bool> {
    print_report(&report, json)?;
    Ok(report.all_passed())
}

/// Returns whether every check passed.
fn run(cli: Cli) -> CliResult<bool> {
    let json = cli.json;
    match cli.cmd {
        Command::Inspect { file } => cmd_inspect(&file, json).map(|()| true),
        Command::Dump { file } => cmd_dump(&file, json).map(|()| true),
        Command::Bounds {
            test,
            min,
            max,
            test_time,
            min_time,
            max_time,
        } => {
            let times = match (test_time, min_time, max_time) {
                (Some(test), Some(min), Some(max)) => Some(BoundsTimes { test, min, max }),
                _ => None,
            };
            finish(check_bounds(&BoundsArgs { test, min, max, times })?, json)
        }
        Command::Similarity {
            test,
            reference,
            variance,
            mean_diff,
        } => finish(
            check_similarity(&SimilarityArgs {
                test,
                reference,
                variance,
                mean_diff,
            })?,
            json,
        ),
        Command::Threshold {
            test,
            threshold,
            min_count,
            below,
            consecutive,
        } => finish(
            check_threshold(&ThresholdArgs {
                test,
                threshold,
                min_count,
                below,
                consecutive,
            })?,
            json,
        ),
        Command::Corridor {
            x,
            y,
            x_left,
            y_left,
            x_right,
            y_right,
        } => finish(
            check_corridor(&CorridorArgs {
                x,
                y,
                x_left,
                y_left,
                x_right,
                y_right,
            })?,
            json,
        ),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
