//! HTTP client error types.

use storefront_commerce::CatalogError;
use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Failed to send the request or read the response.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The total request timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<FetchError> for CatalogError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::RequestError(msg) => CatalogError::Transport(msg),
            FetchError::InvalidUrl(msg) => CatalogError::Transport(format!("invalid URL: {msg}")),
            FetchError::HttpError { status, message } => CatalogError::Http { status, message },
            FetchError::ParseError(msg) | FetchError::JsonError(msg) => CatalogError::Decode(msg),
            FetchError::Timeout => CatalogError::Timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_maps_to_catalog_error() {
        assert_eq!(CatalogError::from(FetchError::Timeout), CatalogError::Timeout);
        assert_eq!(
            CatalogError::from(FetchError::HttpError {
                status: 502,
                message: "Bad Gateway".into(),
            }),
            CatalogError::Http {
                status: 502,
                message: "Bad Gateway".into(),
            }
        );
        assert!(matches!(
            CatalogError::from(FetchError::ParseError("eof".into())),
            CatalogError::Decode(_)
        ));
        assert!(matches!(
            CatalogError::from(FetchError::RequestError("connection refused".into())),
            CatalogError::Transport(_)
        ));
    }
}
