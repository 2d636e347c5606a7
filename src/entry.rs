use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::warn;

use crate::app::{print_run_header, print_summary, run_benchmark, save_failure_log};
use crate::args::{DEFAULT_CONFIG_FILES, HitterArgs};
use crate::config::{apply_config, load_config};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::resolve_body;
use crate::metrics::TerminalProgress;
use crate::shutdown::{setup_signal_shutdown_handler, shutdown_channel};

/// Parses the command line, runs one benchmark, and prints its report.
///
/// # Errors
///
/// Returns an error for invalid arguments or config, a failed runtime or
/// client setup, or an unwritable failure log.
pub fn run() -> AppResult<()> {
    let (args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::logger::init_logging(args.verbose, args.no_color);

    let args = resolve_args(args, &matches)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<Option<(HitterArgs, ArgMatches)>> {
    let mut cmd = HitterArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = HitterArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

fn resolve_args(mut args: HitterArgs, matches: &ArgMatches) -> AppResult<HitterArgs> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }

    if args.url.is_none() {
        tracing::error!("Missing URL (set --url or provide in config).");
        return Err(AppError::validation(ValidationError::MissingUrl));
    }
    Ok(args)
}

async fn run_async(args: HitterArgs) -> AppResult<()> {
    let body = resolve_body(&args)?;
    print_run_header(&args, body.len());

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let reporter = Box::new(TerminalProgress::new(args.no_color));
    let result = run_benchmark(&args, body, reporter, &mut shutdown_rx).await;

    // Wakes the signal task so it exits; a send error only means it already did.
    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        warn!("Signal handler task failed: {}", err);
    }

    let report = result?;
    print_summary(&report.summary);

    if !args.no_save_log {
        save_failure_log(Path::new(&args.log_path), &report.failure_log).await?;
    }
    Ok(())
}
