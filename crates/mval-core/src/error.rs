//! # Error Types
//!
//! Errors raised by the foundational types and by object-graph
//! collaborators. All errors use `thiserror` for derive-based `Display`
//! and `Error` implementations.

use thiserror::Error;

/// Top-level error type for the foundational layer.
#[derive(Error, Debug)]
pub enum MvalError {
    /// A category name did not match any known severity.
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    /// A category expression named no severity at all.
    #[error("empty category expression")]
    EmptyCategory,

    /// An element identifier could not be parsed as a UUID.
    #[error("invalid element id {input:?}: {source}")]
    InvalidElementId {
        /// The rejected input.
        input: String,
        /// The underlying parse failure.
        source: uuid::Error,
    },
}

/// Result type alias for foundational operations.
pub type MvalResult<T> = Result<T, MvalError>;
