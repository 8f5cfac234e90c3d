//! Error types for the Download Station API client.
//!
//! Every failure carries the endpoint URL or the API error code it came from,
//! so callers can report it without re-deriving context.

use std::path::PathBuf;

use thiserror::Error;

/// Known non-zero API error codes and their labels.
const KNOWN_ERROR_CODES: &[(i64, &str)] = &[(8196, "duplicate"), (4097, "not found")];

/// Returns the human-readable label for a known API error code.
#[must_use]
pub fn known_error_label(code: i64) -> Option<&'static str> {
    KNOWN_ERROR_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, label)| *label)
}

/// Errors that can occur while talking to the Download Station API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status other than 200.
    #[error("request error. status: {status} ({url})")]
    Transport {
        /// The endpoint URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The API envelope carried a non-zero `error` code.
    #[error("{}", format_api_error(*code, *label, reason))]
    Request {
        /// The API error code.
        code: i64,
        /// Label from the known error-code table, if any.
        label: Option<&'static str>,
        /// Server-supplied reason string.
        reason: String,
    },

    /// The login endpoint rejected the credentials.
    #[error("authentication failed: {}", format_api_error(*code, *label, reason))]
    Authentication {
        /// The API error code.
        code: i64,
        /// Label from the known error-code table, if any.
        label: Option<&'static str>,
        /// Server-supplied reason string.
        reason: String,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error calling {url}: {source}")]
    Network {
        /// The endpoint URL.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout calling {url}")]
    Timeout {
        /// The endpoint URL.
        url: String,
    },

    /// The response body was not a usable API envelope.
    #[error("invalid response from {url}: {message}")]
    InvalidResponse {
        /// The endpoint URL.
        url: String,
        /// What was wrong with the body.
        message: String,
    },

    /// The configured host or scheme does not form a valid URL.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// Reading a torrent file or stream failed.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// The file path (or stream name) being read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {message}")]
    ClientBuild {
        /// Builder failure description.
        message: String,
    },
}

fn format_api_error(code: i64, label: Option<&str>, reason: &str) -> String {
    match label {
        Some(label) => format!("{code}({label}) {reason}"),
        None => format!("{code} {reason}"),
    }
}

impl ApiError {
    /// Creates a transport error for a non-200 status.
    pub fn transport(url: impl Into<String>, status: u16) -> Self {
        Self::Transport {
            url: url.into(),
            status,
        }
    }

    /// Creates a request error, looking up the label for known codes.
    pub fn request(code: i64, reason: impl Into<String>) -> Self {
        Self::Request {
            code,
            label: known_error_label(code),
            reason: reason.into(),
        }
    }

    /// Creates an authentication error, looking up the label for known codes.
    pub fn authentication(code: i64, reason: impl Into<String>) -> Self {
        Self::Authentication {
            code,
            label: known_error_label(code),
            reason: reason.into(),
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an invalid-response error.
    pub fn invalid_response(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the API error code for envelope-level failures.
    #[must_use]
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Request { code, .. } | Self::Authentication { code, .. } => Some(*code),
            _ => None,
        }
    }
}

// No `From<reqwest::Error>`: every network variant needs the endpoint URL,
// which the source error does not reliably carry.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_error_label_lookup() {
        assert_eq!(known_error_label(8196), Some("duplicate"));
        assert_eq!(known_error_label(4097), Some("not found"));
        assert_eq!(known_error_label(1), None);
        assert_eq!(known_error_label(0), None);
    }

    #[test]
    fn test_transport_error_display_contains_status() {
        let error = ApiError::transport("http://nas/downloadstation/V4/Task/Query", 500);
        let msg = error.to_string();
        assert!(msg.contains("500"), "Expected '500' in: {msg}");
        assert!(msg.contains("Task/Query"), "Expected URL in: {msg}");
    }

    #[test]
    fn test_request_error_known_code_includes_label_and_reason() {
        let error = ApiError::request(8196, "dup");
        let msg = error.to_string();
        assert_eq!(msg, "8196(duplicate) dup");
    }

    #[test]
    fn test_request_error_unknown_code_omits_label() {
        let error = ApiError::request(5, "invalid parameter");
        assert_eq!(error.to_string(), "5 invalid parameter");
        assert_eq!(error.api_code(), Some(5));
    }

    #[test]
    fn test_authentication_error_display() {
        let error = ApiError::authentication(4097, "no such user");
        let msg = error.to_string();
        assert!(msg.starts_with("authentication failed"), "got: {msg}");
        assert!(msg.contains("4097(not found)"), "got: {msg}");
        assert!(msg.contains("no such user"), "got: {msg}");
    }

    #[test]
    fn test_io_error_display_contains_path() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = ApiError::io(PathBuf::from("/tmp/missing.torrent"), io_error);
        assert!(error.to_string().contains("/tmp/missing.torrent"));
        assert_eq!(error.api_code(), None);
    }
}
