use std::time::Duration;

use crate::error::MetricsError;

use super::{LatencyHistogram, StatsSnapshot};

const MICROS_PER_SEC: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyStats {
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
    pub p50: Duration,
    pub p90: Duration,
    pub p99: Duration,
}

/// Figures derived from a final snapshot and the run's wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub elapsed: Duration,
    pub total: u64,
    pub failed: u64,
    /// Requests per second scaled by 10^6; zero when `elapsed` is zero.
    pub throughput_micros: u128,
    /// `None` when no latency was recorded.
    pub latency: Option<LatencyStats>,
}

impl RunSummary {
    /// # Errors
    ///
    /// Returns an error if the latency histogram cannot be built.
    pub fn from_snapshot(snapshot: &StatsSnapshot, elapsed: Duration) -> Result<Self, MetricsError> {
        Ok(Self {
            elapsed,
            total: snapshot.finished,
            failed: snapshot.failed,
            throughput_micros: throughput_micros(snapshot.finished, elapsed),
            latency: latency_stats(&snapshot.latencies)?,
        })
    }

    #[must_use]
    pub fn throughput_text(&self) -> String {
        format_fixed(self.throughput_micros)
    }
}

#[must_use]
pub(super) fn throughput_micros(total: u64, elapsed: Duration) -> u128 {
    u128::from(total)
        .saturating_mul(MICROS_PER_SEC)
        .saturating_mul(NANOS_PER_SEC)
        .checked_div(elapsed.as_nanos())
        .unwrap_or(0)
}

fn latency_stats(latencies: &[Duration]) -> Result<Option<LatencyStats>, MetricsError> {
    let (Some(min), Some(max)) = (latencies.iter().min(), latencies.iter().max()) else {
        return Ok(None);
    };

    let sum_nanos = latencies
        .iter()
        .fold(0_u128, |sum, latency| sum.saturating_add(latency.as_nanos()));
    let count = u128::try_from(latencies.len()).unwrap_or(u128::MAX);
    let avg_nanos = sum_nanos.checked_div(count).unwrap_or(0);
    let avg = Duration::from_nanos(u64::try_from(avg_nanos).unwrap_or(u64::MAX));

    let (p50, p90, p99) = LatencyHistogram::from_latencies(latencies)?.percentiles();

    Ok(Some(LatencyStats {
        min: *min,
        max: *max,
        avg,
        p50,
        p90,
        p99,
    }))
}

/// Renders a value scaled by 10^6 with six decimals.
#[must_use]
pub fn format_fixed(value_micros: u128) -> String {
    format!(
        "{}.{:06}",
        value_micros.checked_div(MICROS_PER_SEC).unwrap_or(0),
        value_micros.checked_rem(MICROS_PER_SEC).unwrap_or(0)
    )
}

#[must_use]
pub fn format_seconds(duration: Duration) -> String {
    format!("{}.{:06}", duration.as_secs(), duration.subsec_micros())
}

#[must_use]
pub fn format_millis(duration: Duration) -> String {
    let micros = duration.as_micros();
    format!(
        "{}.{:03}ms",
        micros.checked_div(1000).unwrap_or(0),
        micros.checked_rem(1000).unwrap_or(0)
    )
}
