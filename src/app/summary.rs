use crate::{
    args::HitterArgs,
    metrics::{RunSummary, format_millis, format_seconds},
};

const SEPARATOR: &str = "----------------";

pub fn print_run_header(args: &HitterArgs, body_len: usize) {
    for line in run_header_lines(args, body_len) {
        println!("{}", line);
    }
}

pub fn print_summary(summary: &RunSummary) {
    for line in summary_lines(summary) {
        println!("{}", line);
    }
}

#[must_use]
pub(super) fn run_header_lines(args: &HitterArgs, body_len: usize) -> Vec<String> {
    let headers = args
        .headers
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(",");

    vec![
        format!("url: {}", args.url.as_deref().unwrap_or("-")),
        format!("method: {}", args.method),
        format!("headers: {}", headers),
        format!("body: {} bytes", body_len),
        format!("request num: {}", args.requests.get()),
        format!("concurrency: {}", args.concurrency.get()),
        SEPARATOR.to_owned(),
    ]
}

#[must_use]
pub(super) fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![
        SEPARATOR.to_owned(),
        format!("total time: {} sec", format_seconds(summary.elapsed)),
        format!("qps: {}", summary.throughput_text()),
        format!("total: {}", summary.total),
        format!("failed: {}", summary.failed),
    ];

    match summary.latency.as_ref() {
        Some(latency) => {
            lines.push(format!(
                "latency avg/min/max: {} / {} / {}",
                format_millis(latency.avg),
                format_millis(latency.min),
                format_millis(latency.max)
            ));
            lines.push(format!(
                "latency p50/p90/p99: {} / {} / {}",
                format_millis(latency.p50),
                format_millis(latency.p90),
                format_millis(latency.p99)
            ));
        }
        None => lines.push("latency: n/a".to_owned()),
    }

    lines
}
