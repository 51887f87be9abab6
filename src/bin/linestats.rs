//! linestats - corpus statistics from the command line
//!
//! Reads every input file in parallel, aggregates line and token statistics,
//! and writes a two-row tab-separated report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use linestats::frequency::KeywordCounter;
use linestats::quantiles::DEFAULT_HISTOGRAM_BOUND;
use linestats::report::TabularRecord;
use linestats::{Coordinator, EngineConfig, LineSource};

/// Command-line arguments for linestats
#[derive(Parser, Debug)]
#[command(name = "linestats")]
#[command(about = "Line, token, duplicate and keyword statistics for text files")]
#[command(version)]
struct Args {
    /// Text files to read
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Newline-delimited keyword vocabulary
    #[arg(short, long, env = "LINESTATS_KEYWORDS")]
    keywords: Option<PathBuf>,

    /// Where to write the tab-separated report
    #[arg(short, long, default_value = "results.tsv", env = "LINESTATS_OUTPUT")]
    output: PathBuf,

    /// Aggregation worker threads (default: available parallelism)
    #[arg(short, long, env = "LINESTATS_WORKERS")]
    workers: Option<usize>,

    /// Lines that may wait for a worker (default: 64 per worker)
    #[arg(long, env = "LINESTATS_QUEUE_DEPTH")]
    queue_depth: Option<usize>,

    /// Lengths at or above this are left out of the medians
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BOUND, env = "LINESTATS_HISTOGRAM_BOUND")]
    histogram_bound: usize,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default().with_histogram_bound(self.histogram_bound);
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(depth) = self.queue_depth {
            config = config.with_queue_depth(depth);
        }
        config
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linestats=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let keywords = match &args.keywords {
        Some(path) => KeywordCounter::from_path(path).context("Failed to load keywords")?,
        None => KeywordCounter::default(),
    };
    info!(
        inputs = args.inputs.len(),
        keywords = keywords.len(),
        "Starting linestats"
    );

    let coordinator = Coordinator::new(args.engine_config(), keywords)
        .context("Invalid engine configuration")?;
    let snapshot = coordinator
        .run(LineSource::from_paths(args.inputs.iter().cloned()))
        .context("Aggregation failed")?;

    let record = TabularRecord::from_snapshot(&snapshot)
        .context("Corpus too small to report every statistic")?;
    record
        .write_to_path(&args.output)
        .with_context(|| format!("Failed to write report to {}", args.output.display()))?;

    info!(output = %args.output.display(), "Report written");
    Ok(())
}
