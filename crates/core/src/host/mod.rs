//! Code-hosting platform abstraction.
//!
//! This module provides a `RepositoryHost` trait for enumerating the
//! repositories of an organization and downloading single files from them,
//! plus a GitHub REST implementation.

mod github;
mod types;

pub use github::GitHubClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to a code-hosting platform.
#[derive(Debug, Error)]
pub enum HostError {
    /// The requested file does not exist in the repository.
    #[error("File not found: {0}")]
    NotFound(String),

    /// HTTP transport failure (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Client not configured (missing token, bad base URL, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

impl HostError {
    /// Whether this error means the file is simply absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, HostError::NotFound(_))
    }
}

impl From<reqwest::Error> for HostError {
    fn from(e: reqwest::Error) -> Self {
        HostError::Http(e.to_string())
    }
}

/// Trait for code-hosting backends.
///
/// Implementations hide pagination and transport details. The collector only
/// needs the repository list and raw file bytes.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// List every repository of the organization, in server order.
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>, HostError>;

    /// Download the raw content of `path` in `org/repo`.
    ///
    /// Returns `HostError::NotFound` if the file does not exist. Does not
    /// retry.
    async fn fetch_file(&self, org: &str, repo: &str, path: &str) -> Result<Vec<u8>, HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        assert!(HostError::NotFound("CODEOWNERS".to_string()).is_not_found());
        assert!(!HostError::Http("timeout".to_string()).is_not_found());
        assert!(!HostError::Api {
            status: 500,
            message: "boom".to_string()
        }
        .is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = HostError::Api {
            status: 403,
            message: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 403 - rate limited");
    }
}
