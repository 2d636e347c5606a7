use super::runner::{run_benchmark, save_failure_log};
use super::summary::{run_header_lines, summary_lines};
use crate::args::HitterArgs;
use crate::error::{AppError, AppResult};
use crate::http::test_support::spawn_server;
use crate::metrics::{NoProgress, RunSummary, StatsSnapshot};
use crate::shutdown::shutdown_channel;
use bytes::Bytes;
use clap::Parser;
use std::time::Duration;

fn parse_args(extra: &[&str]) -> AppResult<HitterArgs> {
    let mut argv = vec!["hitter"];
    argv.extend_from_slice(extra);
    Ok(HitterArgs::try_parse_from(argv)?)
}

#[tokio::test]
async fn run_completes_every_request() -> AppResult<()> {
    let (url, server) = spawn_server("200 OK").await?;
    let args = parse_args(&["-a", &url, "-n", "20", "-c", "4"])?;
    let (_shutdown_tx, mut shutdown_rx) = shutdown_channel();

    let report = run_benchmark(&args, Bytes::new(), Box::new(NoProgress), &mut shutdown_rx).await?;
    server.abort();

    if report.submitted != 20 || report.summary.total != 20 || report.summary.failed != 0 {
        return Err(AppError::from(format!("Unexpected report: {:?}", report)));
    }
    if !report.failure_log.is_empty() {
        return Err("Failure log should be empty".into());
    }
    if report.summary.latency.is_none() {
        return Err("Expected latency stats".into());
    }
    Ok(())
}

#[tokio::test]
async fn unexpected_status_lands_in_failure_log() -> AppResult<()> {
    let (url, server) = spawn_server("500 Internal Server Error").await?;
    let args = parse_args(&["-a", &url, "-n", "6", "-c", "3"])?;
    let (_shutdown_tx, mut shutdown_rx) = shutdown_channel();

    let report = run_benchmark(&args, Bytes::new(), Box::new(NoProgress), &mut shutdown_rx).await?;
    server.abort();

    if report.summary.total != 6 || report.summary.failed != 6 {
        return Err(AppError::from(format!("Unexpected summary: {:?}", report.summary)));
    }
    let log = String::from_utf8(report.failure_log).map_err(|err| err.to_string())?;
    let lines: Vec<&str> = log.lines().collect();
    if lines.len() != 6 {
        return Err(AppError::from(format!("Expected 6 log lines, got {:?}", lines)));
    }
    if !lines.iter().all(|line| line.starts_with("[500]")) {
        return Err(AppError::from(format!("Unexpected log lines: {:?}", lines)));
    }
    Ok(())
}

#[tokio::test]
async fn interrupted_run_submits_nothing_more() -> AppResult<()> {
    let (url, server) = spawn_server("200 OK").await?;
    let args = parse_args(&["-a", &url, "-n", "50"])?;
    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    shutdown_tx
        .send(())
        .map_err(|err| AppError::from(err.to_string()))?;

    let report = run_benchmark(&args, Bytes::new(), Box::new(NoProgress), &mut shutdown_rx).await?;
    server.abort();

    if report.submitted != 0 || report.summary.total != 0 {
        return Err(AppError::from(format!("Unexpected report: {:?}", report)));
    }
    if report.summary.latency.is_some() {
        return Err("No latency stats expected for an empty run".into());
    }
    Ok(())
}

#[tokio::test]
async fn failure_log_is_written_to_disk() -> AppResult<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("failed.log");

    save_failure_log(&path, b"[-] connection refused\n").await?;

    let written = std::fs::read(&path)?;
    if written != b"[-] connection refused\n" {
        return Err("Failure log contents differ".into());
    }
    Ok(())
}

#[tokio::test]
async fn failure_log_reports_unwritable_path() -> AppResult<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("missing").join("failed.log");

    match save_failure_log(&path, b"").await {
        Err(crate::error::SinkError::WriteLog { path: reported, .. }) if reported == path => Ok(()),
        other => Err(AppError::from(format!("Expected WriteLog, got {:?}", other))),
    }
}

#[test]
fn header_lists_run_parameters() -> AppResult<()> {
    let args = parse_args(&[
        "-a",
        "http://localhost/",
        "-m",
        "POST",
        "-H",
        "a=1",
        "-H",
        "b=2",
        "-n",
        "10",
        "-c",
        "3",
    ])?;
    let lines = run_header_lines(&args, 12);
    let expected = [
        "url: http://localhost/",
        "method: POST",
        "headers: a=1,b=2",
        "body: 12 bytes",
        "request num: 10",
        "concurrency: 3",
    ];
    for line in expected {
        if !lines.iter().any(|candidate| candidate == line) {
            return Err(AppError::from(format!("Missing '{}' in {:?}", line, lines)));
        }
    }
    Ok(())
}

#[test]
fn summary_without_samples_prints_na() -> AppResult<()> {
    let summary = RunSummary::from_snapshot(&StatsSnapshot::default(), Duration::ZERO)?;
    let lines = summary_lines(&summary);
    if !lines.iter().any(|line| line == "qps: 0.000000") {
        return Err(AppError::from(format!("Expected zero qps in {:?}", lines)));
    }
    if !lines.iter().any(|line| line == "latency: n/a") {
        return Err(AppError::from(format!("Expected n/a latency in {:?}", lines)));
    }
    Ok(())
}

#[test]
fn summary_formats_latency_in_millis() -> AppResult<()> {
    let snapshot = StatsSnapshot {
        finished: 2,
        failed: 1,
        latencies: vec![Duration::from_millis(10), Duration::from_millis(30)],
    };
    let summary = RunSummary::from_snapshot(&snapshot, Duration::from_secs(1))?;
    let lines = summary_lines(&summary);
    let expected = [
        "total time: 1.000000 sec",
        "qps: 2.000000",
        "total: 2",
        "failed: 1",
        "latency avg/min/max: 20.000ms / 10.000ms / 30.000ms",
    ];
    for line in expected {
        if !lines.iter().any(|candidate| candidate == line) {
            return Err(AppError::from(format!("Missing '{}' in {:?}", line, lines)));
        }
    }
    Ok(())
}
