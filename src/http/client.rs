use reqwest::Client;

use crate::args::{DEFAULT_USER_AGENT, HitterArgs};
use crate::error::HttpError;

/// Builds the shared client; it is cloned into every work item.
///
/// # Errors
///
/// Returns an error when the underlying TLS backend or resolver cannot be set up.
pub fn build_client(args: &HitterArgs) -> Result<Client, HttpError> {
    Client::builder()
        .timeout(args.request_timeout)
        .connect_timeout(args.connect_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|source| {
            tracing::error!("Failed to build HTTP client: {}", source);
            HttpError::BuildClientFailed { source }
        })
}
