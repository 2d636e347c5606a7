use std::sync::Mutex;
use std::time::Duration;

use crate::error::MetricsError;

use super::ProgressReporter;

/// Counts seen by the progress reporter after each recorded outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub finished: u64,
    pub failed: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Default)]
pub struct StatsSnapshot {
    pub finished: u64,
    pub failed: u64,
    /// One entry per finished item, in completion order.
    pub latencies: Vec<Duration>,
}

struct StatsState {
    finished: u64,
    failed: u64,
    latencies: Vec<Duration>,
    reporter: Box<dyn ProgressReporter>,
}

/// Shared outcome accumulator for one run.
///
/// Every field sits behind a single mutex, and the progress reporter runs
/// while it is held, so progress output is ordered with the count updates.
pub struct StatsAggregator {
    total: u64,
    state: Mutex<StatsState>,
}

impl std::fmt::Debug for StatsAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsAggregator")
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}

impl StatsAggregator {
    #[must_use]
    pub fn new(total: u64, reporter: Box<dyn ProgressReporter>) -> Self {
        let capacity = usize::try_from(total).unwrap_or(0);
        Self {
            total,
            state: Mutex::new(StatsState {
                finished: 0,
                failed: 0,
                latencies: Vec::with_capacity(capacity),
                reporter,
            }),
        }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Records one finished item and reports progress.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::LockPoisoned`] if a previous holder panicked.
    pub fn record(&self, latency: Duration, success: bool) -> Result<(), MetricsError> {
        let mut state = self.state.lock().map_err(|err| {
            tracing::error!("Statistics lock poisoned: {}", err);
            MetricsError::LockPoisoned
        })?;

        state.finished = state.finished.saturating_add(1);
        if !success {
            state.failed = state.failed.saturating_add(1);
        }
        state.latencies.push(latency);

        let progress = Progress {
            finished: state.finished,
            failed: state.failed,
            total: self.total,
        };
        state.reporter.report(progress);
        Ok(())
    }

    /// Copies the current counters and latency samples.
    ///
    /// Only a complete view once all producers have stopped.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::LockPoisoned`] if a previous holder panicked.
    pub fn snapshot(&self) -> Result<StatsSnapshot, MetricsError> {
        let state = self.state.lock().map_err(|err| {
            tracing::error!("Statistics lock poisoned: {}", err);
            MetricsError::LockPoisoned
        })?;
        Ok(StatsSnapshot {
            finished: state.finished,
            failed: state.failed,
            latencies: state.latencies.clone(),
        })
    }

    /// Lets the reporter finish its output (e.g. end the progress line).
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::LockPoisoned`] if a previous holder panicked.
    pub fn finish(&self) -> Result<(), MetricsError> {
        let mut state = self.state.lock().map_err(|err| {
            tracing::error!("Statistics lock poisoned: {}", err);
            MetricsError::LockPoisoned
        })?;
        state.reporter.finish();
        Ok(())
    }
}
