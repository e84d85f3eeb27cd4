use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use labelscan::detection::build_standard_pipeline;
use labelscan::{process_batch, write_run, DelimitedWriter, LabelJob, LabelParser, ParserConfig};

#[derive(Parser)]
#[command(name = "labelscan")]
#[command(about = "Extract sender, receiver and tracking number from shipping label images")]
struct Cli {
    /// Label images, or directories containing them
    #[arg(value_name = "PATH", required = true)]
    inputs: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON parser configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the ocrs detection and recognition models
    #[arg(long, value_name = "DIR")]
    model_dir: Option<PathBuf>,

    /// Extra given names for person detection, one per line
    #[arg(long, value_name = "FILE")]
    names: Option<PathBuf>,

    /// Number of labels processed in parallel
    #[arg(short, long, default_value_t = default_workers())]
    workers: usize,

    /// Save preprocessing images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("labelscan={}", level).parse()?);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
    Ok(())
}

/// Expand directories and keep only files with a known raster image extension
fn collect_images(inputs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file())
                .collect();
            entries.sort();
            images.extend(entries.into_iter().filter(|path| is_image(path)));
        } else if is_image(input) {
            images.push(input.clone());
        } else {
            warn!(path = %input.display(), "Skipping non-image input");
        }
    }
    Ok(images)
}

fn is_image(path: &Path) -> bool {
    image::ImageFormat::from_path(path).is_ok()
}

fn run_timestamp() -> anyhow::Result<String> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    Ok(now.format(format)?)
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose)?;

    // Read the local offset before any runtime threads exist
    let run_ts = run_timestamp()?;

    let mut config = match &args.config {
        Some(path) => ParserConfig::from_json_file(path)?,
        None => ParserConfig::default(),
    };
    if args.model_dir.is_some() {
        config.model_dir = args.model_dir.clone();
    }
    if args.names.is_some() {
        config.names_file = args.names.clone();
    }

    let mut parser = LabelParser::from_config(config)?;
    if let Some(debug_dir) = args.debug_out {
        let pipeline = build_standard_pipeline(parser.config()).with_debug(debug_dir)?;
        parser = parser.with_preprocessor(pipeline);
    }

    let images = collect_images(&args.inputs)?;
    info!(images = images.len(), "Job started");

    let jobs: Vec<LabelJob> = images.into_iter().map(LabelJob::from_path).collect();
    let job_count = jobs.len();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let outcomes = runtime.block_on(process_batch(Arc::new(parser), jobs, args.workers));

    let stdout = std::io::stdout();
    let mut writer = DelimitedWriter::new(stdout.lock());
    let summary = write_run(&mut writer, &run_ts, &outcomes)?;

    info!(succeeded = summary.succeeded, failed = summary.failed, "Job completed");

    if summary.all_failed() {
        anyhow::bail!("All {} labels failed", job_count);
    }

    Ok(())
}
