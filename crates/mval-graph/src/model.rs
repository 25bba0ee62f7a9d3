//! # In-Memory Model
//!
//! A [`Model`] holds a [`TypeSchema`] and the elements typed by it, in
//! insertion order. It implements [`ModelGraph`] so the validation engine
//! can run over it directly.
//!
//! ## Document Format
//!
//! ```yaml
//! types:
//!   - name: Component
//!   - name: LogicalComponent
//!     parent: Component
//! elements:
//!   - uuid: 3f0c8f7e-8d7a-4c55-9a43-5b6f0a3c1d20
//!     type: LogicalComponent
//!     name: Flight Computer
//!     description: Computes the flight path.
//!     references:
//!       allocated_functions: []
//! ```
//!
//! JSON documents use the same structure. Loading rejects elements of
//! undefined types, duplicate ids and references to missing elements.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use mval_core::{ElementId, ModelElement, ModelGraph, TypeName};

use crate::element::Element;
use crate::error::{GraphError, GraphResult};
use crate::schema::{TypeDef, TypeSchema};

/// Serialized form of a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDocument {
    #[serde(default)]
    pub types: Vec<TypeDef>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Typed elements with id lookup.
#[derive(Debug, Clone, Default)]
pub struct Model {
    schema: TypeSchema,
    elements: Vec<Element>,
    index: HashMap<ElementId, usize>,
}

impl Model {
    pub fn new(schema: TypeSchema) -> Self {
        Self {
            schema,
            elements: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    /// Add an element. Its type must be defined and its id unused.
    ///
    /// References are not checked here; see [`Model::check_references`].
    pub fn insert(&mut self, element: Element) -> GraphResult<ElementId> {
        let uuid = element.uuid();
        if !self.schema.contains(element.type_name()) {
            return Err(GraphError::UnknownType {
                uuid,
                type_name: element.type_name().clone(),
            });
        }
        if self.index.contains_key(&uuid) {
            return Err(GraphError::DuplicateElement(uuid));
        }
        self.index.insert(uuid, self.elements.len());
        self.elements.push(element);
        Ok(uuid)
    }

    /// Mutable access for editing text fields, attributes and references.
    pub fn by_uuid_mut(&mut self, uuid: &ElementId) -> Option<&mut Element> {
        let idx = *self.index.get(uuid)?;
        self.elements.get_mut(idx)
    }

    /// Remove an element. References to it from other elements remain.
    pub fn remove(&mut self, uuid: &ElementId) -> Option<Element> {
        let idx = self.index.remove(uuid)?;
        let removed = self.elements.remove(idx);
        for later in &self.elements[idx..] {
            if let Some(slot) = self.index.get_mut(&later.uuid()) {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Resolve the reference list `name` of `element`, skipping targets
    /// that are not in the model.
    pub fn references<'a>(&'a self, element: &Element, name: &str) -> Vec<&'a Element> {
        element
            .reference_ids(name)
            .iter()
            .filter_map(|id| ModelGraph::by_uuid(self, id))
            .collect()
    }

    /// Fail on the first reference whose target is missing.
    pub fn check_references(&self) -> GraphResult<()> {
        for element in &self.elements {
            for (name, targets) in &element.references {
                if let Some(missing) = targets.iter().find(|t| !self.index.contains_key(*t)) {
                    return Err(GraphError::DanglingReference {
                        from: element.uuid(),
                        name: name.clone(),
                        to: *missing,
                    });
                }
            }
        }
        Ok(())
    }

    /// Build and check a model from its document form.
    pub fn from_document(document: ModelDocument) -> GraphResult<Self> {
        let mut model = Self::new(TypeSchema::from_definitions(document.types)?);
        for element in document.elements {
            model.insert(element)?;
        }
        model.check_references()?;
        tracing::debug!(
            types = model.schema.len(),
            elements = model.len(),
            "loaded model"
        );
        Ok(model)
    }

    pub fn to_document(&self) -> ModelDocument {
        ModelDocument {
            types: self.schema.definitions(),
            elements: self.elements.clone(),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> GraphResult<Self> {
        Self::from_document(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> GraphResult<Self> {
        Self::from_document(serde_json::from_str(json)?)
    }

    /// Load a `.yaml`, `.yml` or `.json` model file.
    pub fn from_path(path: &Path) -> GraphResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let read = || {
            std::fs::read_to_string(path).map_err(|source| GraphError::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&read()?),
            Some("json") => Self::from_json_str(&read()?),
            _ => Err(GraphError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl ModelGraph for Model {
    type Element = Element;

    fn elements(&self) -> Box<dyn Iterator<Item = &Element> + '_> {
        Box::new(self.elements.iter())
    }

    fn by_uuid(&self, uuid: &ElementId) -> Option<&Element> {
        self.index.get(uuid).map(|&idx| &self.elements[idx])
    }

    fn is_subtype(&self, ty: &TypeName, ancestor: &TypeName) -> bool {
        self.schema.is_subtype(ty, ancestor)
    }
}
