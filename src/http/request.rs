use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Request, Url};
use tokio::time::Instant;
use tracing::{debug, error};

use crate::args::HitterArgs;
use crate::error::HttpError;
use crate::metrics::{LogSink, StatsAggregator};

/// The request every work item sends, built and validated once per run.
#[derive(Debug)]
pub struct RequestTemplate {
    request: Request,
}

impl RequestTemplate {
    /// # Errors
    ///
    /// Returns an error for an invalid URL, header, or request.
    pub fn from_args(client: &Client, args: &HitterArgs, body: Bytes) -> Result<Self, HttpError> {
        let raw_url = args.url.as_deref().unwrap_or_default();
        let url = Url::parse(raw_url).map_err(|source| HttpError::InvalidUrl {
            url: raw_url.to_owned(),
            source,
        })?;

        let mut headers = HeaderMap::new();
        for (name, value) in &args.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|source| {
                    HttpError::InvalidHeaderName {
                        name: name.clone(),
                        source,
                    }
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|source| HttpError::InvalidHeaderValue {
                    name: name.clone(),
                    source,
                })?;
            headers.append(header_name, header_value);
        }

        let request = client
            .request(args.method.as_method().clone(), url)
            .headers(headers)
            .body(body)
            .build()
            .map_err(|source| HttpError::BuildRequestFailed { source })?;

        Ok(Self { request })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        self.request.url()
    }

    /// # Errors
    ///
    /// Returns [`HttpError::CloneRequestFailed`] if the body cannot be cloned.
    pub fn instantiate(&self) -> Result<Request, HttpError> {
        self.request
            .try_clone()
            .ok_or(HttpError::CloneRequestFailed)
    }
}

/// Picks the request body: `--body` wins, then `--body-file`, else empty.
///
/// # Errors
///
/// Returns an error when the body file cannot be read.
pub fn resolve_body(args: &HitterArgs) -> Result<Bytes, HttpError> {
    if !args.body.is_empty() {
        return Ok(Bytes::from(args.body.clone()));
    }
    let Some(path) = args.body_file.as_ref() else {
        return Ok(Bytes::new());
    };
    let path = PathBuf::from(path);
    std::fs::read(&path)
        .map(Bytes::from)
        .map_err(|source| HttpError::ReadBodyFile { path, source })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    /// `None` when no response arrived.
    pub status: Option<u16>,
    pub latency: Duration,
    pub error: Option<String>,
}

impl RequestOutcome {
    #[must_use]
    pub fn is_success(&self, expected_status: u16) -> bool {
        self.error.is_none() && self.status == Some(expected_status)
    }

    /// One failure-log line: `[<status>] <error>`, `-` standing in for a missing status.
    #[must_use]
    pub fn failure_line(&self, expected_status: u16) -> String {
        let status = self
            .status
            .map_or_else(|| "-".to_owned(), |code| code.to_string());
        self.error.as_ref().map_or_else(
            || format!("[{}] unexpected status (expected {})", status, expected_status),
            |err| format!("[{}] {}", status, err),
        )
    }
}

/// Sends one request from the template and drains the response body.
///
/// Latency covers sending the request through reading the last body byte.
pub async fn execute_request(client: &Client, template: &RequestTemplate) -> RequestOutcome {
    let request = match template.instantiate() {
        Ok(request) => request,
        Err(err) => {
            return RequestOutcome {
                status: None,
                latency: Duration::ZERO,
                error: Some(err.to_string()),
            };
        }
    };

    let start = Instant::now();
    match client.execute(request).await {
        Ok(response) => {
            let status = response.status().as_u16();
            let drained = response.bytes().await;
            let latency = start.elapsed();
            RequestOutcome {
                status: Some(status),
                latency,
                error: drained.err().map(|err| format!("failed to read body: {}", err)),
            }
        }
        Err(err) => {
            let latency = start.elapsed();
            debug!("Request failed: {}", err);
            RequestOutcome {
                status: None,
                latency,
                error: Some(err.to_string()),
            }
        }
    }
}

/// Records one outcome in the aggregator, logging failures to the sink first.
pub fn record_outcome(
    outcome: &RequestOutcome,
    expected_status: u16,
    stats: &StatsAggregator,
    sink: &LogSink,
) {
    let success = outcome.is_success(expected_status);
    if !success
        && let Err(err) = sink.append_line(&outcome.failure_line(expected_status))
    {
        error!("Failed to append failure log line: {}", err);
    }
    if let Err(err) = stats.record(outcome.latency, success) {
        error!("Failed to record request outcome: {}", err);
    }
}
