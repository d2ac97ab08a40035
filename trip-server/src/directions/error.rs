//! Directions provider error types.

use std::fmt;

/// Errors from a directions provider.
#[derive(Debug)]
pub enum DirectionsError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code or response code
    Api { status: u16, message: String },

    /// No route exists between the requested points
    NoRoute,

    /// Rate limited by the API
    RateLimited,

    /// Provider not configured or not available
    NotConfigured(String),
}

impl fmt::Display for DirectionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionsError::Http(e) => write!(f, "HTTP error: {e}"),
            DirectionsError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            DirectionsError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            DirectionsError::NoRoute => write!(f, "no route between the requested points"),
            DirectionsError::RateLimited => write!(f, "rate limited by directions API"),
            DirectionsError::NotConfigured(msg) => write!(f, "not configured: {msg}"),
        }
    }
}

impl std::error::Error for DirectionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectionsError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DirectionsError {
    fn from(err: reqwest::Error) -> Self {
        DirectionsError::Http(err)
    }
}
