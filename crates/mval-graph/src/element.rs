//! Model elements.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use mval_core::{ElementId, ModelElement, TypeName};

/// One node of a model: identity, type, the two text fields most rules
/// look at, free-form attributes and named references to other elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Element {
    /// Generated when a document omits it.
    #[serde(default = "ElementId::new")]
    uuid: ElementId,
    #[serde(rename = "type")]
    type_name: TypeName,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub references: BTreeMap<String, Vec<ElementId>>,
}

impl Element {
    /// A fresh element of `type_name` with a random id.
    pub fn new(type_name: impl Into<TypeName>, name: impl Into<String>) -> Self {
        Self::with_uuid(ElementId::new(), type_name, name)
    }

    pub fn with_uuid(uuid: ElementId, type_name: impl Into<TypeName>, name: impl Into<String>) -> Self {
        Self {
            uuid,
            type_name: type_name.into(),
            name: name.into(),
            description: String::new(),
            attributes: BTreeMap::new(),
            references: BTreeMap::new(),
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append `target` to the reference list `name`.
    pub fn referencing(mut self, name: impl Into<String>, target: ElementId) -> Self {
        self.references.entry(name.into()).or_default().push(target);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Targets of the reference list `name`; empty when absent.
    pub fn reference_ids(&self, name: &str) -> &[ElementId] {
        self.references.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl ModelElement for Element {
    fn uuid(&self) -> ElementId {
        self.uuid
    }

    fn type_name(&self) -> &TypeName {
        &self.type_name
    }
}
