//! Error types for claimcheck.

use thiserror::Error;

/// Result type alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by claimcheck operations.
///
/// A missing cache key is not an error: read operations return a
/// surface-specific "not found" payload instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The oracle could not produce a verdict (consensus or fetch failure).
    #[error("oracle error: {0}")]
    Oracle(String),

    /// A classification request violated an adapter precondition.
    #[error("invalid classification request: {0}")]
    InvalidRequest(String),

    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {0}")]
    Config(String),

    /// Persisted surface state could not be encoded or decoded.
    #[error("state error: {0}")]
    State(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
