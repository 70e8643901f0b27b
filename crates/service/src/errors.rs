use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("malformed record {}: {reason}", .path.display())]
    MalformedRecord { path: PathBuf, reason: String },
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ServiceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn malformed_record(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::MalformedRecord { path: path.into(), reason: reason.to_string() }
    }

    /// Whether the failure was caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MalformedBody(_))
    }
}
