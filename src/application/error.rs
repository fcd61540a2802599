//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("no node with key: {0}")]
    NodeNotFound(String),

    #[error("holdings cannot have children: {0}")]
    LeafLevel(String),

    #[error("no backup under key {0:?}, run `alloctree backup` first")]
    NoBackup(String),

    #[error("malformed snapshot under key {key:?}")]
    Snapshot {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
