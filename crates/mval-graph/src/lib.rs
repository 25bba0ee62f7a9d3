//! # mval-graph: Reference Object Graph
//!
//! A small, self-contained object graph the validation engine can run
//! against: a [`TypeSchema`] with single inheritance and a [`Model`] of
//! [`Element`]s loaded from YAML or JSON documents.
//!
//! The engine only needs the `ModelGraph` and `ModelElement` traits from
//! `mval-core`; this crate is one implementation of them and the one the
//! command line uses.
//!
//! ## Crate Policy
//!
//! - Depends only on `mval-core` internally.
//! - Loading validates the whole document. A `Model` built through
//!   [`Model::from_document`] has known types, unique ids and no dangling
//!   references.

pub mod element;
pub mod error;
pub mod model;
pub mod schema;

pub use element::Element;
pub use error::{GraphError, GraphResult};
pub use model::{Model, ModelDocument};
pub use schema::{TypeDef, TypeSchema};
