// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for fetchkit
//!
//! Every failure of the request pipeline is one of these variants, so callers
//! (and error interceptors) can tell a cancelled request from a 404 from a
//! dropped connection by matching on the kind.

use thiserror::Error;

/// Result type alias for fetchkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fetchkit
#[derive(Error, Debug)]
pub enum Error {
    /// The server answered with a non-2xx, non-redirect status
    #[error("Request to {url} failed: {status} {reason}")]
    RequestFailed {
        url: String,
        status: u16,
        reason: String,
    },

    /// A request interceptor vetoed the request
    #[error("The request \"{url}\" was cancelled in interceptor: {reason}")]
    RequestCancelled { url: String, reason: String },

    /// `fetch` was called with a name that was never registered
    #[error("The endpoint \"{0}\" does not exist")]
    EndpointNotFound(String),

    /// The transport itself rejected (network failure, abort)
    #[error("Transport error for {url}: {reason}")]
    Transport {
        url: String,
        reason: String,
        aborted: bool,
    },

    /// 301/302 answer; the caller is expected to navigate to `location`
    #[error("Redirected ({status}) to {location}")]
    Redirect { status: u16, location: String },

    /// Response body could not be decoded with the selected strategy
    #[error("Decode error: {0}")]
    Decode(String),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// File reading failed
    #[error("FileReader failed: {0}")]
    FileRead(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport {
            url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            reason: err.to_string(),
            aborted: false,
        }
    }
}

impl From<multer::Error> for Error {
    fn from(err: multer::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl Error {
    /// Create a request failure from a status line
    pub fn request_failed(
        url: impl Into<String>,
        status: u16,
        reason: impl Into<String>,
    ) -> Self {
        Error::RequestFailed {
            url: url.into(),
            status,
            reason: reason.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::RequestCancelled {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a transport error
    pub fn transport(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Transport {
            url: url.into(),
            reason: reason.into(),
            aborted: false,
        }
    }

    /// Create the error an aborted transport call fails with
    pub fn aborted(url: impl Into<String>) -> Self {
        Error::Transport {
            url: url.into(),
            reason: "The operation was aborted".to_string(),
            aborted: true,
        }
    }

    /// Create a decode error
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Error::Decode(msg.into())
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Error::Storage(msg.into())
    }

    /// Create a file read error
    pub fn file_read<S: Into<String>>(msg: S) -> Self {
        Error::FileRead(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if a request interceptor cancelled the request
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::RequestCancelled { .. })
    }

    /// Check if the endpoint was unknown
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::EndpointNotFound(_))
    }

    /// Check if the transport rejected
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// Check if the request was aborted through its signal
    pub fn is_aborted(&self) -> bool {
        matches!(self, Error::Transport { aborted: true, .. })
    }

    /// Check if this is a redirect outcome
    pub fn is_redirect(&self) -> bool {
        matches!(self, Error::Redirect { .. })
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::RequestFailed { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::RequestFailed { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::RequestFailed { status, .. } => Some(*status),
            Error::Redirect { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::RequestFailed { url, .. } => Some(url),
            Error::RequestCancelled { url, .. } => Some(url),
            Error::Transport { url, .. } if !url.is_empty() => Some(url),
            Error::Redirect { location, .. } => Some(location),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Attach a URL to transport errors that lack one
    fn with_url(self, url: &str) -> Result<T>;

    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn with_url(self, url: &str) -> Result<T> {
        self.map_err(|e| match e.into() {
            Error::Transport {
                url: u,
                reason,
                aborted,
            } if u.is_empty() => Error::Transport {
                url: url.to_string(),
                reason,
                aborted,
            },
            other => other,
        })
    }

    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed() {
        let err = Error::request_failed("https://example.com/u/1", 404, "Not Found");

        assert!(err.is_client_error());
        assert!(!err.is_server_error());
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.url(), Some("https://example.com/u/1"));
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn test_aborted_is_transport() {
        let err = Error::aborted("https://example.com");

        assert!(err.is_transport());
        assert!(err.is_aborted());
        assert!(!Error::transport("https://example.com", "reset").is_aborted());
    }

    #[test]
    fn test_with_url_fills_missing_url() {
        let res: std::result::Result<(), Error> = Err(Error::transport("", "connection refused"));
        let err = res.with_url("https://example.com/a").unwrap_err();

        assert_eq!(err.url(), Some("https://example.com/a"));
    }

    #[test]
    fn test_context() {
        let res: std::result::Result<(), &str> = Err("boom");
        let err = res.context("loading settings").unwrap_err();

        assert_eq!(err.to_string(), "loading settings: boom");
    }
}
