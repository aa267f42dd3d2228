//! Error types and handling for the CLI

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from schemaform-core
    #[error("Core error: {0}")]
    Core(#[from] schemaform_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The schema or form data failed validation
    #[error("Validation failed with {count} error(s)")]
    ValidationFailed { count: usize },

    /// The submit endpoint rejected or the request failed
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ValidationFailed { .. } | Self::SubmissionFailed(_) => 1,
            Self::FileNotFound { .. } | Self::Io(_) => 3,
            Self::Json(_) | Self::Core(_) => 4,
            Self::Other(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::ValidationFailed { count: 2 }.exit_code(), 1);
        assert_eq!(
            Error::FileNotFound {
                path: PathBuf::from("x.json")
            }
            .exit_code(),
            3
        );
    }

    #[test]
    fn test_display() {
        let err = Error::ValidationFailed { count: 3 };
        assert_eq!(err.to_string(), "Validation failed with 3 error(s)");
    }
}
