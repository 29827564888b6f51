use std::time::Duration;

use crate::{Error, Result};

/// Timeout used when the host does not configure one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client plugins use for outbound calls.
///
/// Every request made through it is bounded by `timeout`, so a hung remote
/// endpoint surfaces as [`Error::Timeout`] instead of blocking the host.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("superform/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::transport("building http client", e))
}
