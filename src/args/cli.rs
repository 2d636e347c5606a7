use clap::Parser;
use std::time::Duration;

use super::defaults::DEFAULT_LOG_PATH;
use super::parsers::{parse_duration_arg, parse_header, parse_positive_u64, parse_positive_usize};
use super::types::{PositiveU64, PositiveUsize, RequestMethod};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fire a fixed number of HTTP requests at an endpoint under a concurrency cap and report throughput and latency."
)]
pub struct HitterArgs {
    /// Total number of requests to send
    #[arg(long, short = 'n', default_value = "1", value_parser = parse_positive_u64)]
    pub requests: PositiveU64,

    /// Maximum number of requests in flight at once
    #[arg(long, short = 'c', default_value = "1", value_parser = parse_positive_usize)]
    pub concurrency: PositiveUsize,

    /// Target URL
    #[arg(long, short = 'a')]
    pub url: Option<String>,

    /// Request method (any valid HTTP method token)
    #[arg(long, short = 'm', default_value = "GET")]
    pub method: RequestMethod,

    /// Request headers in 'name=value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body
    #[arg(long, short = 'b', default_value = "")]
    pub body: String,

    /// Read the request body from a file; ignored when --body is set
    #[arg(long = "body-file", short = 'f')]
    pub body_file: Option<String>,

    /// Don't write the failure log
    #[arg(long = "no-save-log", short = 's')]
    pub no_save_log: bool,

    /// Where to write the failure log
    #[arg(long = "log-path", default_value = DEFAULT_LOG_PATH)]
    pub log_path: String,

    /// HTTP status code counted as a success
    #[arg(long = "status", default_value = "200")]
    pub expected_status_code: u16,

    /// Whole-request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = "120s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Timeout for establishing a connection (supports ms/s/m/h)
    #[arg(long = "connect-timeout", default_value = "20s", value_parser = parse_duration_arg)]
    pub connect_timeout: Duration,

    /// Path to config file (TOML/JSON). Defaults to ./hitter.toml or ./hitter.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by HITTER_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
