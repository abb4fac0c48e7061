//! Shared HTTP client construction.

use std::time::Duration;

/// Build a `reqwest` client with a fixed per-request timeout.
pub fn build_client(timeout_secs: u64) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("rewise/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| format!("HTTP client error: {}", e))
}
