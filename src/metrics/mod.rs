//! Result aggregation: the locked statistics accumulator, the failure-log
//! sink, and the derived run summary.
mod aggregator;
mod histogram;
mod progress;
mod sink;
mod summary;


pub use aggregator::{Progress, StatsAggregator, StatsSnapshot};
pub use histogram::LatencyHistogram;
pub use progress::{NoProgress, ProgressReporter, TerminalProgress};
pub use sink::LogSink;
pub use summary::{LatencyStats, RunSummary, format_millis, format_seconds};
