//! Error types for the accessibility aggregation workspace.

use thiserror::Error;

/// Result type alias using [`AccessError`].
pub type AccessResult<T> = Result<T, AccessError>;

/// Primary error type shared across all accessibility crates.
#[derive(Debug, Error)]
pub enum AccessError {
    // === Configuration errors ===
    #[error("invalid configuration: {0}")]
    BadConfig(String),

    // === Geometry errors ===
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    // === Persisted-grid read errors ===
    #[error("truncated data: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("bad magic bytes: expected {expected:?}, got {actual:?}")]
    BadMagic { expected: String, actual: String },

    #[error("version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: i32, actual: i32 },

    // === Invariant violations (bug-detection guard, not I/O) ===
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    // === Cancellation ===
    #[error("operation cancelled")]
    Cancelled,

    // === Lookup failures ===
    #[error("not found: {0}")]
    NotFound(String),

    // === Passthrough I/O ===
    #[error("I/O error: {0}")]
    Io(String),
}

impl AccessError {
    /// Whether this error must abort the enclosing origin/region computation,
    /// as opposed to a transient failure the caller may retry.
    ///
    /// Per the error handling design: invariant violations and bad configuration
    /// are always fatal; I/O-shaped errors are surfaced as-is and left to the
    /// caller (an external collaborator) to decide whether to retry.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AccessError::InvariantViolation(_)
                | AccessError::BadConfig(_)
                | AccessError::InvalidGeometry(_)
        )
    }
}

impl From<std::io::Error> for AccessError {
    fn from(err: std::io::Error) -> Self {
        AccessError::Io(err.to_string())
    }
}
