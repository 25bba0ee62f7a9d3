//! Error types for schema construction and model loading.

use std::path::PathBuf;

use mval_core::{ElementId, TypeName};
use thiserror::Error;

/// Errors raised while building a schema or a model.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A type was defined twice.
    #[error("type {0} is defined more than once")]
    DuplicateType(TypeName),

    /// A type names a parent that is not defined.
    #[error("type {type_name} extends unknown type {parent}")]
    UnknownParent { type_name: TypeName, parent: TypeName },

    /// Following parents from a type leads back to it.
    #[error("inheritance cycle through type {0}")]
    InheritanceCycle(TypeName),

    /// An element has a type the schema does not define.
    #[error("element {uuid} has unknown type {type_name}")]
    UnknownType { uuid: ElementId, type_name: TypeName },

    /// Two elements share an id.
    #[error("element {0} is defined more than once")]
    DuplicateElement(ElementId),

    /// A reference points at an element that is not in the model.
    #[error("element {from} references missing element {to} via {name:?}")]
    DanglingReference {
        from: ElementId,
        name: String,
        to: ElementId,
    },

    /// A model file has an extension other than yaml, yml or json.
    #[error("unsupported model format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Reading a model file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
