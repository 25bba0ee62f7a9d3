//! Engine error types.
//!
//! Three failure classes matter to callers and each has its own variant:
//! a lookup that finds no rule, a results snapshot whose shape is wrong,
//! and a rule validator that fails while a pass is running. Graph query
//! failures are forwarded unchanged.

use mval_core::{ElementId, MvalError};
use thiserror::Error;

use crate::rule::ValidatorError;

/// Errors that can occur while registering, running, or querying rules.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// No rule with the requested id is known.
    #[error("no rule with id {id:?} found")]
    RuleNotFound { id: String },

    /// A results snapshot is not a mapping of rule ids.
    #[error("malformed results snapshot: expected a mapping of rule ids, found {found}")]
    MalformedSnapshot { found: String },

    /// A rule bucket in a results snapshot is not a mapping of element ids.
    #[error("malformed results bucket for rule {rule_id:?}: {detail}")]
    MalformedBucket { rule_id: String, detail: String },

    /// A rule validator returned an error. The pass stops here; results
    /// stored earlier in the pass are kept.
    #[error("validator of rule {rule_id:?} failed on element {element}: {source}")]
    Validator {
        rule_id: String,
        element: ElementId,
        source: ValidatorError,
    },

    /// The object graph failed to answer a query.
    #[error(transparent)]
    Graph(#[from] MvalError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, ValidationError>;
