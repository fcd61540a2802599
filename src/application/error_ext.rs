//! Error conversion helpers for storage I/O
//!
//! Provides extension traits for cleaner error handling with key context.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add storage-key context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// self.store.get(&self.live_key)
    ///     .with_key_context("load snapshot", &self.live_key)?;
    /// ```
    fn with_key_context(self, action: &str, key: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_key_context(self, action: &str, key: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, key),
            source: Box::new(e),
        })
    }
}
