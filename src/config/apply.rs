use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{HitterArgs, PositiveU64, PositiveUsize, RequestMethod, parse_header};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values given on the command line win over the config file.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut HitterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = PositiveU64::try_from(requests).map_err(|source| {
            AppError::config(ConfigError::FieldMustBePositive {
                field: "requests",
                source,
            })
        })?;
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = PositiveUsize::try_from(concurrency).map_err(|source| {
            AppError::config(ConfigError::FieldMustBePositive {
                field: "concurrency",
                source,
            })
        })?;
    }

    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method.as_deref()
    {
        args.method = method
            .parse::<RequestMethod>()
            .map_err(|source| AppError::config(ConfigError::InvalidMethod { source }))?;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(
                parse_header(header)
                    .map_err(|source| AppError::config(ConfigError::InvalidHeader { source }))?,
            );
        }
        args.headers = parsed;
    }

    if !is_cli(matches, "body")
        && let Some(body) = config.body.clone()
    {
        args.body = body;
    }

    if !is_cli(matches, "body_file")
        && let Some(path) = config.body_file.clone()
    {
        args.body_file = Some(path);
    }

    if !is_cli(matches, "no_save_log")
        && let Some(no_save_log) = config.no_save_log
    {
        args.no_save_log = no_save_log;
    }

    if !is_cli(matches, "log_path")
        && let Some(path) = config.log_path.clone()
    {
        args.log_path = path;
    }

    if !is_cli(matches, "expected_status_code")
        && let Some(status) = config.status
    {
        args.expected_status_code = status;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = timeout.to_duration().map_err(|source| {
            AppError::config(ConfigError::InvalidDuration {
                field: "timeout",
                source,
            })
        })?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = timeout.to_duration().map_err(|source| {
            AppError::config(ConfigError::InvalidDuration {
                field: "connect_timeout",
                source,
            })
        })?;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}
