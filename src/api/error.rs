use thiserror::Error;

/// Failures surfaced by the bot API client.
///
/// Poll failures degrade the dashboard to stale data; trade failures resolve
/// the pending request with the error as its reason.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no response within {0}s")]
    Timeout(u64),
}
