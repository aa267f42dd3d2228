//! Error types for the schemaform core library
//!
//! Field-level validation failures are *not* errors in this sense: they are
//! plain strings collected into the [`ErrorMap`](crate::validation::ErrorMap)
//! and never abort anything. The `Error` enum below covers the failures that
//! can stop an operation: malformed schemas, bad JSON input, and upload
//! transport problems.

use thiserror::Error;

/// Main error type for schemaform operations
#[derive(Error, Debug)]
pub enum Error {
    /// Structural problems in a field-definition tree
    #[error("Schema error at '{path}': {message}")]
    Schema { path: String, message: String },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Upload transport errors (non-success status, network, or body parse)
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Upload endpoint misconfiguration (bad URL or method, unbuildable client)
    #[error("Upload configuration error: {message}")]
    UploadConfig {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a schema error at a dotted field path
    pub fn schema<P, M>(path: P, message: M) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Error::Schema {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}
