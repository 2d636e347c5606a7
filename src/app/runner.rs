use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::Client;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::{
    args::HitterArgs,
    error::{AppResult, SinkError},
    executor::Executor,
    http::{RequestTemplate, build_client, execute_request, record_outcome},
    metrics::{LogSink, ProgressReporter, RunSummary, StatsAggregator},
    shutdown::ShutdownReceiver,
};

/// Result of one benchmark run.
#[derive(Debug)]
pub struct RunReport {
    pub summary: RunSummary,
    /// Requests handed to the executor; lower than requested when interrupted.
    pub submitted: u64,
    pub failure_log: Vec<u8>,
}

/// Submits `args.requests` requests through a bounded executor and collects the results.
///
/// A message on `shutdown_rx` stops further submissions; everything already
/// admitted still runs to completion before the summary is taken.
///
/// # Errors
///
/// Returns an error if the client or request template cannot be built, the
/// executor stops unexpectedly, or the collected stats cannot be read.
pub async fn run_benchmark(
    args: &HitterArgs,
    body: Bytes,
    reporter: Box<dyn ProgressReporter>,
    shutdown_rx: &mut ShutdownReceiver,
) -> AppResult<RunReport> {
    let client = build_client(args)?;
    let template = Arc::new(RequestTemplate::from_args(&client, args, body)?);
    let total = args.requests.get();
    let expected_status = args.expected_status_code;

    let stats = Arc::new(StatsAggregator::new(total, reporter));
    let sink = Arc::new(LogSink::new());
    let executor = Executor::new(args.concurrency.non_zero());
    debug!(
        "Executor started with capacity {} for {} requests",
        executor.capacity(),
        total
    );

    let run_start = Instant::now();
    let mut submitted: u64 = 0;
    while submitted < total {
        let work = request_work(
            client.clone(),
            Arc::clone(&template),
            Arc::clone(&stats),
            Arc::clone(&sink),
            expected_status,
        );
        tokio::select! {
            biased;
            Ok(()) = shutdown_rx.recv() => {
                warn!(
                    "Interrupted after submitting {} of {} requests; waiting for in-flight requests.",
                    submitted, total
                );
                break;
            }
            result = executor.submit(work) => result?,
        }
        submitted = submitted.saturating_add(1);
    }

    executor.shutdown().await?;
    let elapsed = run_start.elapsed();
    stats.finish()?;

    let snapshot = stats.snapshot()?;
    let summary = RunSummary::from_snapshot(&snapshot, elapsed)?;
    info!(
        "Run finished: {} requests, {} failed",
        summary.total, summary.failed
    );

    Ok(RunReport {
        summary,
        submitted,
        failure_log: sink.snapshot()?,
    })
}

async fn request_work(
    client: Client,
    template: Arc<RequestTemplate>,
    stats: Arc<StatsAggregator>,
    sink: Arc<LogSink>,
    expected_status: u16,
) {
    let outcome = execute_request(&client, &template).await;
    record_outcome(&outcome, expected_status, &stats, &sink);
}

/// Writes the failure log, replacing any previous file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn save_failure_log(path: &Path, contents: &[u8]) -> Result<(), SinkError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| SinkError::WriteLog {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Failure log written to {}", path.display());
    Ok(())
}
