//! Statistics gateway error types.

/// Errors from talking to the statistics API (or loading mock fixtures).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Mock fixture data could not be loaded
    #[error("fixture error: {0}")]
    Fixture(String),

    /// Gateway configuration is unusable
    #[error("not configured: {0}")]
    NotConfigured(String),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}

impl GatewayError {
    /// Build a JSON error, keeping a short excerpt of the offending body.
    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        GatewayError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}
