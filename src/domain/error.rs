//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed input reaching the pure core.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid node key: {0:?}")]
    InvalidKey(String),

    #[error("invalid value {input:?} at level {depth}")]
    InvalidValue { input: String, depth: usize },
}
