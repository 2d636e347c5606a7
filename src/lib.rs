//! Core library for the `hitter` CLI.
//!
//! `hitter` fires a fixed number of HTTP requests at one endpoint while never
//! letting more than a configured number run at once, then reports
//! throughput, failures and latency. The building blocks live here: the
//! bounded executor, the locked stats aggregator and failure-log sink, CLI
//! and config handling, and the request work item. The binary is a thin
//! wrapper around [`run`].
pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod metrics;
pub mod shutdown;

mod entry;
mod logger;

pub use entry::run;
