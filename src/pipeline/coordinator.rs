//! Fan-out of lines to the aggregators and fan-in before reading results

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use bstr::ByteSlice;
use crossbeam::channel::{self, Receiver, Sender};
use crossbeam::sync::WaitGroup;
use tracing::{debug, error, info, warn};

use super::config::EngineConfig;
use super::snapshot::{LengthSummary, Snapshot};
use crate::error::{OutOfRange, StatsError};
use crate::frequency::KeywordCounter;
use crate::membership::DuplicateTracker;
use crate::quantiles::MedianEstimator;
use crate::statistics::VarianceAccumulator;

/// Every aggregator for one run
///
/// Each aggregator guards its own state; none reads another's.
#[derive(Debug)]
pub struct Aggregates {
    line_length: VarianceAccumulator,
    line_median: MedianEstimator,
    token_length: VarianceAccumulator,
    token_median: MedianEstimator,
    duplicates: DuplicateTracker,
    keywords: KeywordCounter,
    lines: AtomicU64,
    tokens: AtomicU64,
    rejected_line_lengths: AtomicU64,
    rejected_token_lengths: AtomicU64,
}

impl Aggregates {
    /// Fresh aggregators with the given histogram bound and vocabulary
    ///
    /// # Panics
    ///
    /// Panics if `histogram_bound` is 0
    pub fn new(histogram_bound: usize, keywords: KeywordCounter) -> Self {
        Self {
            line_length: VarianceAccumulator::default(),
            line_median: MedianEstimator::with_bound(histogram_bound),
            token_length: VarianceAccumulator::default(),
            token_median: MedianEstimator::with_bound(histogram_bound),
            duplicates: DuplicateTracker::new(),
            keywords,
            lines: AtomicU64::new(0),
            tokens: AtomicU64::new(0),
            rejected_line_lengths: AtomicU64::new(0),
            rejected_token_lengths: AtomicU64::new(0),
        }
    }

    /// Apply every update one line contributes
    ///
    /// The line feeds the duplicate tracker and the line-length aggregators;
    /// its whitespace tokens feed the keyword counter and, as one batch each,
    /// the token-length aggregators. A length the histogram refuses is counted
    /// and skipped for that aggregator only.
    ///
    /// Lengths are in bytes and duplicates compare bytes, so invalid UTF-8 is
    /// neither merged nor resized. Only the keyword lookup decodes a token.
    pub fn apply_line(&self, line: impl Into<Vec<u8>>) {
        let line = line.into();
        let line_len = line.len();
        self.line_length.observe(line_len as f64);
        if let Err(rejected) = self.line_median.observe(line_len) {
            self.rejected_line_lengths.fetch_add(1, Ordering::Relaxed);
            log_rejection("line", rejected);
        }

        let token_lengths: Vec<usize> = line
            .fields()
            .map(|token| {
                self.keywords.observe(&token.to_str_lossy());
                token.len()
            })
            .collect();

        if !token_lengths.is_empty() {
            self.tokens
                .fetch_add(token_lengths.len() as u64, Ordering::Relaxed);
            self.token_length
                .observe_many(token_lengths.iter().map(|&len| len as f64));
            let rejected = self.token_median.observe_many(token_lengths);
            if !rejected.is_empty() {
                self.rejected_token_lengths
                    .fetch_add(rejected.len() as u64, Ordering::Relaxed);
                for r in rejected {
                    log_rejection("token", r);
                }
            }
        }

        self.duplicates.observe(line);
        self.lines.fetch_add(1, Ordering::Relaxed);
    }

    /// Current state of every aggregator
    ///
    /// Exact once all updates have finished; a point-in-time view otherwise.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lines: self.lines.load(Ordering::Relaxed),
            tokens: self.tokens.load(Ordering::Relaxed),
            duplicates: self.duplicates.duplicate_count(),
            distinct_lines: self.duplicates.distinct_count(),
            line_length: LengthSummary::read(&self.line_length, &self.line_median),
            token_length: LengthSummary::read(&self.token_length, &self.token_median),
            keywords: self.keywords.snapshot(),
            rejected_line_lengths: self.rejected_line_lengths.load(Ordering::Relaxed),
            rejected_token_lengths: self.rejected_token_lengths.load(Ordering::Relaxed),
        }
    }
}

fn log_rejection(kind: &'static str, rejected: OutOfRange) {
    debug!(
        kind,
        length = rejected.value,
        bound = rejected.bound,
        "length skipped by median histogram"
    );
}

/// Stops a running [`Coordinator`] from another thread
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Ask the run to stop before the next line
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One line waiting for a worker. Holds the completion signal until dropped.
struct Job {
    line: Vec<u8>,
    _done: WaitGroup,
}

/// Drives one aggregation run
///
/// Lines are pulled one at a time and handed to a fixed pool of worker
/// threads through a bounded queue, so at most `queue_depth + workers` lines
/// are in flight. Results are read only after every dispatched line has been
/// fully applied.
///
/// # Example
///
/// ```
/// use linestats::frequency::KeywordCounter;
/// use linestats::pipeline::{Coordinator, EngineConfig};
/// use linestats::StatsError;
///
/// let coordinator = Coordinator::new(
///     EngineConfig::default().with_workers(2),
///     KeywordCounter::from_keywords(["go"]),
/// )
/// .unwrap();
///
/// let lines = ["Go is fun", "go go", "Go is fun"].map(Ok::<_, StatsError>);
/// let snapshot = coordinator.run(lines).unwrap();
///
/// assert_eq!(snapshot.lines, 3);
/// assert_eq!(snapshot.duplicates, 1);
/// assert_eq!(snapshot.keyword_count("go"), Some(4));
/// assert_eq!(snapshot.line_length.median, Ok(9.0));
/// ```
#[derive(Debug)]
pub struct Coordinator {
    config: EngineConfig,
    aggregates: Arc<Aggregates>,
    cancel: CancelHandle,
}

impl Coordinator {
    /// Validate the configuration and build empty aggregators
    pub fn new(config: EngineConfig, keywords: KeywordCounter) -> Result<Self, StatsError> {
        config.validate()?;
        let aggregates = Arc::new(Aggregates::new(config.histogram_bound, keywords));
        Ok(Self {
            config,
            aggregates,
            cancel: CancelHandle::default(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Handle that cancels this coordinator's run
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Aggregate every line and return the final statistics
    ///
    /// An `Err` item (an unreadable input) aborts the run and is returned as is.
    pub fn run<I, L>(self, lines: I) -> Result<Snapshot, StatsError>
    where
        I: IntoIterator<Item = Result<L, StatsError>>,
        L: Into<Vec<u8>>,
    {
        let started = Instant::now();
        info!(
            workers = self.config.workers,
            queue_depth = self.config.queue_depth,
            histogram_bound = self.config.histogram_bound,
            "starting aggregation run"
        );

        let (jobs, queue) = channel::bounded::<Job>(self.config.queue_depth);
        let workers: Vec<JoinHandle<()>> = (0..self.config.workers)
            .map(|_| {
                let queue = queue.clone();
                let aggregates = Arc::clone(&self.aggregates);
                thread::spawn(move || work(queue, aggregates))
            })
            .collect();
        drop(queue);

        let done = WaitGroup::new();
        let dispatched = self.dispatch(lines, &jobs, &done);

        // Workers exit once the queue is closed and drained
        drop(jobs);
        done.wait();
        let panicked = join_workers(workers);

        let dispatched = match dispatched {
            Ok(_) if panicked > 0 => Err(StatsError::WorkerPanicked),
            other => other,
        };
        let dispatched = match dispatched {
            Ok(n) => n,
            Err(e) => {
                error!(error = %e, panicked, "aggregation run aborted");
                return Err(e);
            }
        };

        let snapshot = self.aggregates.snapshot();
        if snapshot.has_rejections() {
            warn!(
                rejected_line_lengths = snapshot.rejected_line_lengths,
                rejected_token_lengths = snapshot.rejected_token_lengths,
                histogram_bound = self.config.histogram_bound,
                "lengths at or above the histogram bound were left out of the medians"
            );
        }
        info!(
            lines = dispatched,
            tokens = snapshot.tokens,
            duplicates = snapshot.duplicates,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "aggregation run finished"
        );
        Ok(snapshot)
    }

    fn dispatch<I, L>(
        &self,
        lines: I,
        jobs: &Sender<Job>,
        done: &WaitGroup,
    ) -> Result<u64, StatsError>
    where
        I: IntoIterator<Item = Result<L, StatsError>>,
        L: Into<Vec<u8>>,
    {
        let mut dispatched = 0u64;
        for item in lines {
            if self.cancel.is_cancelled() {
                return Err(StatsError::Cancelled);
            }
            let job = Job {
                line: item?.into(),
                _done: done.clone(),
            };
            // Fails only when every worker is gone
            jobs.send(job).map_err(|_| StatsError::WorkerPanicked)?;
            dispatched += 1;
        }
        Ok(dispatched)
    }
}

fn work(queue: Receiver<Job>, aggregates: Arc<Aggregates>) {
    for job in queue {
        aggregates.apply_line(job.line);
    }
}

/// Join every worker, returning how many panicked
fn join_workers(workers: Vec<JoinHandle<()>>) -> usize {
    workers
        .into_iter()
        .map(JoinHandle::join)
        .filter(Result::is_err)
        .count()
}
