mod input;
mod provenance;
mod report;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use overlaps::layout::{self, Layout, LayoutCfg};
use overlaps::{OverlapError, PartitionTree};
use serde_json::json;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

use crate::input::InputError;
use crate::provenance::Payload;
use crate::report::Report;

const EXIT_FAILURE: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;
const EXIT_TIMEOUT: u8 = 3;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Find every group of overlapping rectangles", version)]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Decompose an input file and print the intersections
    Run(RunArgs),
    /// Write a generated input file
    Generate(GenerateArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args)]
struct RunArgs {
    /// JSON file of the form {"rects":[{"x":..,"y":..,"w":..,"h":..}]}
    input: PathBuf,
    /// Give up after this many seconds
    #[arg(long, default_value_t = PartitionTree::DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,
    /// Run without a deadline
    #[arg(long, conflicts_with = "timeout")]
    no_timeout: bool,
    /// Keep only the first N rectangles
    #[arg(long)]
    max_rects: Option<usize>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Also write the JSON report here, with a provenance sidecar
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long, value_enum)]
    layout: LayoutArg,
    #[arg(long)]
    count: usize,
    #[arg(long, default_value_t = LayoutCfg::default().seed)]
    seed: u64,
    /// Random origins fall in [0, span)
    #[arg(long, default_value_t = LayoutCfg::default().span)]
    span: i64,
    #[arg(long, default_value_t = LayoutCfg::default().max_side)]
    max_side: i64,
    /// Output file; stdout when absent
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    Random,
    Concentric,
    Identical,
    Grid,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Random => Layout::Random,
            LayoutArg::Concentric => Layout::Concentric,
            LayoutArg::Identical => Layout::Identical,
            LayoutArg::Grid => Layout::Grid,
        }
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let outcome = match cmd.action {
        Action::Run(args) => run(&args),
        Action::Generate(args) => generate(&args),
        Action::Report => report(),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = exit_code(&err);
            tracing::debug!(code, "exiting with failure");
            eprintln!("error: {err:#}");
            ExitCode::from(code)
        }
    }
}

/// 2 for bad input, 3 for a timeout, 1 for everything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<OverlapError>() {
        return match e {
            OverlapError::Timeout { .. } => EXIT_TIMEOUT,
            e if e.is_user_facing() => EXIT_INVALID_INPUT,
            _ => EXIT_FAILURE,
        };
    }
    if err.downcast_ref::<InputError>().is_some() {
        return EXIT_INVALID_INPUT;
    }
    EXIT_FAILURE
}

fn run(args: &RunArgs) -> Result<()> {
    let loaded = input::read_rects(&args.input, args.max_rects)?;
    if loaded.discarded > 0 {
        tracing::warn!(
            limit = ?args.max_rects,
            discarded = loaded.discarded,
            "discarding rectangles over the limit"
        );
    }
    let timeout = (!args.no_timeout).then(|| Duration::from_secs(args.timeout));
    tracing::info!(
        input = %args.input.display(),
        rects = loaded.rects.len(),
        timeout_secs = ?timeout.map(|t| t.as_secs()),
        "run"
    );

    let tree = PartitionTree::new(loaded.rects, timeout)
        .with_context(|| format!("decomposing {}", args.input.display()))?;
    let stats = tree.stats();
    tracing::info!(
        groups = stats.groups,
        calls = stats.calls,
        max_depth = stats.max_depth,
        slices = stats.slices,
        peak_arena = stats.peak_arena,
        elapsed_ms = millis(stats.elapsed),
        "partitioned"
    );

    let report = Report::from_tree(&tree)?;
    match args.format {
        Format::Text => print!("{}", report.to_text()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(out) = &args.out {
        write_file(out, &serde_json::to_vec_pretty(&report)?)?;
        let payload = Payload::new(json!({
            "timeout_secs": timeout.map(|t| t.as_secs()),
            "max_rects": args.max_rects,
            "discarded": loaded.discarded,
        }))
        .with_source(&args.input)
        .with_summary(json!({
            "inputs": stats.inputs,
            "groups": stats.groups,
            "slices": stats.slices,
            "peak_arena": stats.peak_arena,
            "elapsed_ms": millis(stats.elapsed),
        }));
        let sidecar = provenance::write_sidecar(out, payload)?;
        tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote report");
    }
    Ok(())
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let cfg = LayoutCfg {
        count: args.count,
        span: args.span,
        max_side: args.max_side,
        seed: args.seed,
    };
    let family: Layout = args.layout.into();
    let rects = layout::generate(family, &cfg);
    tracing::info!(layout = ?family, count = rects.len(), seed = cfg.seed, "generated");
    let text = input::to_json(&rects)?;
    match &args.out {
        None => println!("{text}"),
        Some(out) => {
            write_file(out, text.as_bytes())?;
            let payload = Payload::new(json!({
                "layout": format!("{family:?}"),
                "count": cfg.count,
                "seed": cfg.seed,
                "span": cfg.span,
                "max_side": cfg.max_side,
            }));
            let sidecar = provenance::write_sidecar(out, payload)?;
            tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote layout");
        }
    }
    Ok(())
}

fn report() -> Result<()> {
    let mut doc = provenance::header();
    doc["params"] = json!({});
    doc["outputs"] = json!([]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::from_micros(999)), 0);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
