use std::time::Duration;

use hdrhistogram::Histogram;

use crate::error::MetricsError;

/// Latency distribution in microseconds, 3 significant digits.
#[derive(Debug)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create a new latency histogram.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created.
    pub fn new() -> Result<Self, MetricsError> {
        let hist = Histogram::<u64>::new(3).map_err(|err| MetricsError::Histogram {
            context: "create",
            source: Box::new(err),
        })?;
        Ok(Self { hist })
    }

    /// Builds a histogram from recorded samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created or a value cannot be recorded.
    pub fn from_latencies(latencies: &[Duration]) -> Result<Self, MetricsError> {
        let mut histogram = Self::new()?;
        for latency in latencies {
            histogram.record(*latency)?;
        }
        Ok(histogram)
    }

    /// Record a latency value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be recorded.
    pub fn record(&mut self, latency: Duration) -> Result<(), MetricsError> {
        let value = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX).max(1);
        self.hist.record(value).map_err(|err| MetricsError::Histogram {
            context: "record",
            source: Box::new(err),
        })
    }

    /// p50, p90 and p99; zero when nothing was recorded.
    #[must_use]
    pub fn percentiles(&self) -> (Duration, Duration, Duration) {
        if self.count() == 0 {
            return (Duration::ZERO, Duration::ZERO, Duration::ZERO);
        }

        (
            Duration::from_micros(self.hist.value_at_quantile(0.5)),
            Duration::from_micros(self.hist.value_at_quantile(0.9)),
            Duration::from_micros(self.hist.value_at_quantile(0.99)),
        )
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }
}
