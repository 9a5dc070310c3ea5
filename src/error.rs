//! Error types for linnworks-query
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Two variants wrap everything the caller normally sees:
//! [`Error::Authentication`] for the credential exchange and
//! [`Error::ReportFetch`] for the paging loop. Transport and decoding
//! failures travel inside them as the `source`.

use thiserror::Error;

/// The main error type for linnworks-query
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    // ============================================================================
    // Report Errors
    // ============================================================================
    #[error("Report fetch failed on page {page}: {source}")]
    ReportFetch {
        page: u32,
        #[source]
        source: Box<Error>,
    },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Arrow/Parquet Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an authentication error with no underlying cause
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            source: None,
        }
    }

    /// Create an authentication error wrapping its cause
    pub fn auth_caused_by(message: impl Into<String>, source: Error) -> Self {
        Self::Authentication {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wrap a failure that happened while fetching `page`
    pub fn report_fetch(page: u32, source: Error) -> Self {
        Self::ReportFetch {
            page,
            source: Box::new(source),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Page number a report fetch failed on, if this is a fetch error
    pub fn page(&self) -> Option<u32> {
        match self {
            Error::ReportFetch { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// Check if this is an authentication failure
    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Authentication { .. })
    }

    /// Check if this error, or the error it wraps, is a request timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Http(e) => e.is_timeout(),
            Error::Authentication {
                source: Some(inner),
                ..
            } => inner.is_timeout(),
            Error::ReportFetch { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

/// Result type alias for linnworks-query
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_value("page_size", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'page_size': must be at least 1"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_report_fetch_display_and_page() {
        let err = Error::report_fetch(2, Error::http_status(500, "boom"));
        assert_eq!(
            err.to_string(),
            "Report fetch failed on page 2: HTTP 500: boom"
        );
        assert_eq!(err.page(), Some(2));
        assert!(err.source().is_some());
        assert_eq!(Error::decode("x").page(), None);
    }

    #[test]
    fn test_auth_error_source() {
        let err = Error::auth("missing credential: Token");
        assert!(err.is_authentication());
        assert!(err.source().is_none());

        let err = Error::auth_caused_by("request failed", Error::Timeout { timeout_ms: 10 });
        assert!(err.source().is_some());
        assert!(err.is_timeout());
    }

    #[test]
    fn test_is_timeout_through_fetch() {
        let err = Error::report_fetch(3, Error::Timeout { timeout_ms: 1000 });
        assert!(err.is_timeout());
        assert!(!Error::report_fetch(3, Error::decode("bad")).is_timeout());
    }
}
