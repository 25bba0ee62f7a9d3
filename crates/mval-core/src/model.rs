//! # Object-Graph Collaborator Traits
//!
//! The validation engine does not own the model it checks. It consumes a
//! graph through two traits:
//!
//! - [`ModelElement`]: a node with a stable [`ElementId`] and a runtime
//!   [`TypeName`]. Any other attribute is opaque to the engine and only
//!   read by individual rule validators.
//! - [`ModelGraph`]: enumeration of elements, lookup by id, a type
//!   hierarchy, and a type query built on top of them.
//!
//! Type matching is an explicit strategy ([`TypeMatch`]) rather than a
//! property of the graph, so the whole-graph and single-element scopes of
//! the engine can be configured to agree or to differ.

use serde::{Deserialize, Serialize};

use crate::error::MvalResult;
use crate::identity::{ElementId, TypeName};

/// One node of a validated object graph.
pub trait ModelElement {
    /// Stable unique identifier.
    fn uuid(&self) -> ElementId;

    /// Exact runtime type of this element.
    fn type_name(&self) -> &TypeName;
}

/// How a registered target type is compared against an element's type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeMatch {
    /// The element's runtime type must equal the target type.
    #[default]
    Exact,
    /// The element's runtime type must be the target type or one of its
    /// descendants in the graph's type hierarchy.
    Subtype,
}

impl TypeMatch {
    /// Whether an element of type `actual` is a match for `target`.
    pub fn matches<G: ModelGraph + ?Sized>(
        self,
        graph: &G,
        actual: &TypeName,
        target: &TypeName,
    ) -> bool {
        match self {
            Self::Exact => actual == target,
            Self::Subtype => graph.is_subtype(actual, target),
        }
    }
}

/// A typed object graph that can be validated.
pub trait ModelGraph {
    /// The element type of this graph.
    type Element: ModelElement;

    /// All elements, in an order that is stable between calls.
    fn elements(&self) -> Box<dyn Iterator<Item = &Self::Element> + '_>;

    /// Look up one element by identifier.
    fn by_uuid(&self, uuid: &ElementId) -> Option<&Self::Element>;

    /// Whether `ty` is `ancestor` or derives from it.
    ///
    /// Must be reflexive. Graphs without a type hierarchy keep the
    /// default, which is plain equality.
    fn is_subtype(&self, ty: &TypeName, ancestor: &TypeName) -> bool {
        ty == ancestor
    }

    /// Elements whose type matches any of `types` under `matching`.
    ///
    /// Graphs backed by an external store override this and report store
    /// failures through the error.
    fn search(&self, types: &[&TypeName], matching: TypeMatch) -> MvalResult<Vec<&Self::Element>> {
        Ok(self
            .elements()
            .filter(|e| {
                types
                    .iter()
                    .any(|target| matching.matches(self, e.type_name(), target))
            })
            .collect())
    }
}
