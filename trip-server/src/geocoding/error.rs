//! Geocoding error types.

/// Errors that can occur when resolving addresses.
#[derive(Debug, thiserror::Error)]
pub enum GeocodingError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The query text was blank
    #[error("query text is empty")]
    EmptyQuery,

    /// The provider found no candidate locations
    #[error("no matching locations")]
    NoMatches,

    /// Provider not configured or not available
    #[error("not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(GeocodingError::EmptyQuery.to_string(), "query text is empty");
        assert_eq!(GeocodingError::NoMatches.to_string(), "no matching locations");
        let err = GeocodingError::Api {
            status: 503,
            message: "busy".into(),
        };
        assert_eq!(err.to_string(), "API error 503: busy");
    }
}
