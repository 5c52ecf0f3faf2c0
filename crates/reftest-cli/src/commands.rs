//! Subcommand implementations.
//!
//! Every blob is loaded with whatever element type its tag names and widened
//! to `f64`, so `f32` and `f64` references can be mixed freely.

use std::path::{Path, PathBuf};

use log::debug;
use reftest_core::codec::{AnyVector, load_any_vector, load_header};
use reftest_core::threshold::{
    has_at_least_n_consecutive_samples_with_condition_true,
    has_at_least_n_samples_with_condition_true,
};
use reftest_core::{
    CheckReport, is_mean_difference_within_threshold, is_variance_within_threshold,
    is_within_2d_corridor, is_within_bounds, is_within_time_varying_bounds,
};
use serde::Serialize;
use snafu::ResultExt;

use crate::error::{
    CheckSnafu, CliResult, LoadHeaderSnafu, LoadValuesSnafu, LoadVectorSnafu, RenderJsonSnafu,
};

fn load_series(what: &'static str, path: &Path) -> CliResult<Vec<f64>> {
    let data = load_any_vector(path).context(LoadVectorSnafu { what })?;
    debug!(
        "loaded --{what} {} ({} {} values)",
        path.display(),
        data.len(),
        data.type_tag()
    );
    Ok(data.into_f64())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value).context(RenderJsonSnafu)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn print_report(report: &CheckReport, json: bool) -> CliResult<()> {
    if json {
        print_json(report)
    } else {
        println!("{report}");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct HeaderView<'a> {
    type_tag: &'a str,
    element_size: u64,
    element_count: u64,
}

pub(crate) fn cmd_inspect(file: &Path, json: bool) -> CliResult<()> {
    let header = load_header(file).context(LoadHeaderSnafu)?;
    if json {
        return print_json(&HeaderView {
            type_tag: &header.type_tag,
            element_size: header.element_size,
            element_count: header.element_count,
        });
    }
    println!("type: {}", header.type_tag);
    println!("element size: {}", header.element_size);
    println!("elements: {}", header.element_count);
    Ok(())
}

pub(crate) fn cmd_dump(file: &Path, json: bool) -> CliResult<()> {
    let data = load_any_vector(file).context(LoadValuesSnafu)?;
    match (data, json) {
        (AnyVector::F32(v), true) => print_json(&v),
        (AnyVector::F64(v), true) => print_json(&v),
        (AnyVector::F32(v), false) => {
            v.iter().for_each(|x| println!("{x}"));
            Ok(())
        }
        (AnyVector::F64(v), false) => {
            v.iter().for_each(|x| println!("{x}"));
            Ok(())
        }
    }
}

pub(crate) struct BoundsArgs {
    pub test: PathBuf,
    pub min: PathBuf,
    pub max: PathBuf,
    pub times: Option<BoundsTimes>,
}

pub(crate) struct BoundsTimes {
    pub test: PathBuf,
    pub min: PathBuf,
    pub max: PathBuf,
}

pub(crate) fn check_bounds(args: &BoundsArgs) -> CliResult<CheckReport> {
    let test = load_series("test", &args.test)?;
    let min = load_series("min", &args.min)?;
    let max = load_series("max", &args.max)?;

    let mut report = CheckReport::new();
    match &args.times {
        None => {
            report.expect("within bounds", is_within_bounds(&test, &min, &max));
        }
        Some(times) => {
            let test_time = load_series("test-time", &times.test)?;
            let min_time = load_series("min-time", &times.min)?;
            let max_time = load_series("max-time", &times.max)?;
            report.expect(
                "within time-varying bounds",
                is_within_time_varying_bounds(&test_time, &test, &min_time, &min, &max_time, &max),
            );
        }
    }
    Ok(report)
}

pub(crate) struct SimilarityArgs {
    pub test: PathBuf,
    pub reference: PathBuf,
    pub variance: Option<f64>,
    pub mean_diff: Option<f64>,
}

pub(crate) fn check_similarity(args: &SimilarityArgs) -> CliResult<CheckReport> {
    let test = load_series("test", &args.test)?;
    let reference = load_series("reference", &args.reference)?;

    let mut report = CheckReport::new();
    if let Some(threshold) = args.variance {
        report.expect(
            format!("variance <= {threshold}"),
            is_variance_within_threshold(&test, &reference, threshold),
        );
    }
    if let Some(threshold) = args.mean_diff {
        report.expect(
            format!("mean difference <= {threshold}"),
            is_mean_difference_within_threshold(&test, &reference, threshold),
        );
    }
    Ok(report)
}

pub(crate) struct ThresholdArgs {
    pub test: PathBuf,
    pub threshold: f64,
    pub min_count: usize,
    pub below: bool,
    pub consecutive: bool,
}

pub(crate) fn check_threshold(args: &ThresholdArgs) -> CliResult<CheckReport> {
    let test = load_series("test", &args.test)?;
    let threshold = args.threshold;
    let below = args.below;
    let side = if below { "below" } else { "above" };
    let condition = move |v: f64| if below { v < threshold } else { v > threshold };

    let mut report = CheckReport::new();
    if args.consecutive {
        report.expect(
            format!(
                "at least {} consecutive samples {side} {threshold}",
                args.min_count
            ),
            has_at_least_n_consecutive_samples_with_condition_true(
                &test,
                condition,
                args.min_count,
            ),
        );
    } else {
        report.expect(
            format!("at least {} samples {side} {threshold}", args.min_count),
            has_at_least_n_samples_with_condition_true(&test, condition, args.min_count),
        );
    }
    Ok(report)
}

pub(crate) struct CorridorArgs {
    pub x: PathBuf,
    pub y: PathBuf,
    pub x_left: PathBuf,
    pub y_left: PathBuf,
    pub x_right: PathBuf,
    pub y_right: PathBuf,
}

pub(crate) fn check_corridor(args: &CorridorArgs) -> CliResult<CheckReport> {
    let x = load_series("x", &args.x)?;
    let y = load_series("y", &args.y)?;
    let x_left = load_series("x-left", &args.x_left)?;
    let y_left = load_series("y-left", &args.y_left)?;
    let x_right = load_series("x-right", &args.x_right)?;
    let y_right = load_series("y-right", &args.y_right)?;

    let inside = is_within_2d_corridor(&x, &y, &x_left, &y_left, &x_right, &y_right)
        .context(CheckSnafu { check: "corridor" })?;

    let mut report = CheckReport::new();
    report.expect("within corridor", inside);
    Ok(report)
}
