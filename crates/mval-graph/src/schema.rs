//! # Type Schema
//!
//! Element types with single inheritance. Every type has at most one
//! parent; the parent must itself be defined and following parents never
//! returns to the starting type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mval_core::TypeName;

use crate::error::{GraphError, GraphResult};

/// One type definition as it appears in a model document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDef {
    pub name: TypeName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TypeName>,
}

impl TypeDef {
    pub fn root(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    pub fn child(name: impl Into<TypeName>, parent: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent.into()),
        }
    }
}

/// The set of known element types and their parents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSchema {
    parents: BTreeMap<TypeName, Option<TypeName>>,
}

impl TypeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema from definitions given in any order.
    pub fn from_definitions(defs: impl IntoIterator<Item = TypeDef>) -> GraphResult<Self> {
        let mut parents = BTreeMap::new();
        for def in defs {
            if parents.contains_key(&def.name) {
                return Err(GraphError::DuplicateType(def.name));
            }
            parents.insert(def.name, def.parent);
        }

        for (name, parent) in &parents {
            if let Some(parent) = parent {
                if !parents.contains_key(parent) {
                    return Err(GraphError::UnknownParent {
                        type_name: name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        let schema = Self { parents };
        for name in schema.parents.keys() {
            // A walk longer than the number of types has revisited one.
            if schema.ancestors(name).nth(schema.parents.len()).is_some() {
                return Err(GraphError::InheritanceCycle(name.clone()));
            }
        }
        Ok(schema)
    }

    /// Add one type. The parent, if any, must already be defined.
    pub fn define(&mut self, name: impl Into<TypeName>, parent: Option<TypeName>) -> GraphResult<()> {
        let name = name.into();
        if self.parents.contains_key(&name) {
            return Err(GraphError::DuplicateType(name));
        }
        if let Some(parent) = &parent {
            if !self.parents.contains_key(parent) {
                return Err(GraphError::UnknownParent {
                    type_name: name,
                    parent: parent.clone(),
                });
            }
        }
        self.parents.insert(name, parent);
        Ok(())
    }

    pub fn contains(&self, name: &TypeName) -> bool {
        self.parents.contains_key(name)
    }

    pub fn parent(&self, name: &TypeName) -> Option<&TypeName> {
        self.parents.get(name).and_then(Option::as_ref)
    }

    /// `name` followed by its parent, grandparent and so on.
    pub fn ancestors<'a>(&'a self, name: &'a TypeName) -> impl Iterator<Item = &'a TypeName> + 'a {
        std::iter::successors(Some(name), move |ty| self.parent(ty))
    }

    /// Whether `ty` is `ancestor` or inherits from it.
    pub fn is_subtype(&self, ty: &TypeName, ancestor: &TypeName) -> bool {
        self.ancestors(ty)
            .take(self.parents.len() + 1)
            .any(|t| t == ancestor)
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Definitions in name order.
    pub fn definitions(&self) -> Vec<TypeDef> {
        self.parents
            .iter()
            .map(|(name, parent)| TypeDef {
                name: name.clone(),
                parent: parent.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capella() -> TypeSchema {
        TypeSchema::from_definitions([
            TypeDef::child("LogicalComponent", "Component"),
            TypeDef::root("Component"),
            TypeDef::child("PhysicalComponent", "Component"),
            TypeDef::root("Capability"),
        ])
        .unwrap()
    }

    #[test]
    fn definitions_in_any_order() {
        let schema = capella();
        assert_eq!(schema.len(), 4);
        assert_eq!(
            schema.parent(&"LogicalComponent".into()),
            Some(&TypeName::from("Component"))
        );
        assert_eq!(schema.parent(&"Component".into()), None);
    }

    #[test]
    fn subtype_is_reflexive_and_transitive() {
        let mut schema = capella();
        schema
            .define("LogicalActor", Some("LogicalComponent".into()))
            .unwrap();
        let actor = TypeName::from("LogicalActor");
        assert!(schema.is_subtype(&actor, &actor));
        assert!(schema.is_subtype(&actor, &"Component".into()));
        assert!(!schema.is_subtype(&"Component".into(), &actor));
        assert!(!schema.is_subtype(&actor, &"Capability".into()));
    }

    #[test]
    fn unknown_types_are_only_their_own_subtype() {
        let schema = capella();
        let ghost = TypeName::from("Ghost");
        assert!(schema.is_subtype(&ghost, &ghost));
        assert!(!schema.is_subtype(&ghost, &"Component".into()));
    }

    #[test]
    fn rejects_duplicates() {
        let err = TypeSchema::from_definitions([TypeDef::root("A"), TypeDef::root("A")]).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateType(_)));
    }

    #[test]
    fn rejects_unknown_parent() {
        let err = TypeSchema::from_definitions([TypeDef::child("A", "B")]).unwrap_err();
        assert!(matches!(err, GraphError::UnknownParent { .. }));

        let mut schema = TypeSchema::new();
        assert!(schema.define("A", Some("B".into())).is_err());
        assert!(schema.is_empty());
    }

    #[test]
    fn rejects_cycles() {
        let err = TypeSchema::from_definitions([
            TypeDef::child("A", "B"),
            TypeDef::child("B", "C"),
            TypeDef::child("C", "A"),
        ])
        .unwrap_err();
        assert!(matches!(err, GraphError::InheritanceCycle(_)));
    }

    #[test]
    fn rejects_self_parent() {
        let err = TypeSchema::from_definitions([TypeDef::child("A", "A")]).unwrap_err();
        assert!(matches!(err, GraphError::InheritanceCycle(_)));
    }
}
