//! Error types for the bootstrap layer

use std::path::PathBuf;
use thiserror::Error;

/// The directory could not be obtained. One kind only: the sole recovery is
/// disabling launch, so the reason is kept for logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("server directory unavailable: {reason}")]
pub struct FetchError {
    reason: String,
}

impl FetchError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("malformed directory body: {}", err))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BootstrapError {
    #[error(transparent)]
    DirectoryUnavailable(#[from] FetchError),

    #[error("launch ignored: {reason}")]
    InvalidLaunchAttempt { reason: &'static str },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode stored values: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("cannot determine config directory")]
    NoConfigDir,
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to start engine `{program}`: {source}")]
    Engine {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
