//! Error types for the memo store.
//!
//! Every failure is an ordinary, recoverable result returned to the caller.
//! Nothing in the store panics on a missing or duplicate key.

use std::fmt;

use thiserror::Error;

/// Result type alias using `MemoError`.
pub type Result<T> = std::result::Result<T, MemoError>;

/// Main error type for memo store operations.
#[derive(Debug, Error)]
pub enum MemoError {
    // ═══════════════════════════════════════════════════════════════════════════
    // KEY ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// A live entry already occupies the key.
    #[error("Key already exists: {0}")]
    KeyAlreadyExists(String),

    /// The key is absent, or present but expired.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Configuration value is missing or malformed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl MemoError {
    /// Returns true if this is a `KeyNotFound` error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MemoError::KeyNotFound(_))
    }

    /// Returns true if this is a `KeyAlreadyExists` error.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, MemoError::KeyAlreadyExists(_))
    }

    /// Returns the key named by a key-level error.
    pub fn key(&self) -> Option<&str> {
        match self {
            MemoError::KeyAlreadyExists(key) | MemoError::KeyNotFound(key) => Some(key),
            _ => None,
        }
    }
}

/// Error returned by a rejected create.
///
/// A create that collides with a live entry leaves that entry untouched and
/// hands its value back alongside the `KeyAlreadyExists` error.
pub struct CreateError<V> {
    /// Value currently stored under the key.
    pub existing: V,
    /// Always `MemoError::KeyAlreadyExists`.
    pub error: MemoError,
}

impl<V> CreateError<V> {
    /// Builds the conflict error for `key`.
    pub fn already_exists(key: impl Into<String>, existing: V) -> Self {
        Self {
            existing,
            error: MemoError::KeyAlreadyExists(key.into()),
        }
    }

    /// Consumes the error, returning the value that is still stored.
    pub fn into_existing(self) -> V {
        self.existing
    }
}

impl<V: fmt::Debug> fmt::Debug for CreateError<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateError")
            .field("existing", &self.existing)
            .field("error", &self.error)
            .finish()
    }
}

impl<V> fmt::Display for CreateError<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<V: fmt::Debug> std::error::Error for CreateError<V> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<V> From<CreateError<V>> for MemoError {
    fn from(err: CreateError<V>) -> Self {
        err.error
    }
}
