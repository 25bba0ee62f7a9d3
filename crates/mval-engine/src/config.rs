//! Engine configuration.
//!
//! Loaded from the `engine` section of the YAML configuration file. Every
//! field has a default, so an empty document is a valid configuration.

use serde::{Deserialize, Serialize};

use mval_core::TypeMatch;

use crate::error::EngineResult;

/// How the two validation scopes select the rules that apply to an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Matching used by the whole-graph scope when it queries the graph
    /// for the elements of a registered type.
    pub model_type_match: TypeMatch,
    /// Matching used by the single-element scope when it compares the
    /// bound element's type with registered types.
    pub element_type_match: TypeMatch,
}

impl EngineConfig {
    /// Parse a YAML document holding the engine section.
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}
