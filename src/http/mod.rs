//! HTTP request construction and the per-request work item body.
mod client;
mod request;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::build_client;
pub use request::{RequestOutcome, RequestTemplate, execute_request, record_outcome, resolve_body};
