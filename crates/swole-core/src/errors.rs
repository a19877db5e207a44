//! Error types for failure handling across the chat client.
//!
//! Every failure the system can surface falls into one of four categories:
//! unresolved configuration, an unreadable staged file, a transport failure,
//! or an error reported by the completion service itself. The categories map
//! directly onto the reporting policy: configuration errors are fatal at
//! startup, staging errors are reported naming the offending path, and
//! network/API errors are reported without corrupting session history so the
//! user can resend manually. Nothing is retried automatically.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Cannot read staged file '{}': {message}", path.display())]
    Staging { path: PathBuf, message: String },
    #[error("Network failure: {0}")]
    Network(String),
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },
    #[error("Parsing error: {0}")]
    Parsing(String),
}

impl ChatError {
    pub fn staging(path: &Path, err: impl std::fmt::Display) -> ChatError {
        ChatError::Staging {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Network(err.to_string())
    }
}
