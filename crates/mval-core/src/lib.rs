//! # mval-core: Foundational Types for Model Validation
//!
//! This crate is the leaf of the mval workspace. It defines the primitives
//! that every other crate agrees on and depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `ElementId` wraps a UUID and
//!    `TypeName` wraps the name of an element type. No bare strings for
//!    element identity.
//!
//! 2. **`Category` is a flag set.** The three severities are independent
//!    bits, so combinations are representable and membership is a bitwise
//!    test.
//!
//! 3. **The object graph is a collaborator, not a dependency.** The
//!    engine only sees the [`ModelGraph`] and [`ModelElement`] traits.
//!    Any graph that can enumerate its elements and answer subtype
//!    questions can be validated.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mval-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod category;
pub mod error;
pub mod identity;
pub mod model;

// Re-export primary types for ergonomic imports.
pub use category::Category;
pub use error::{MvalError, MvalResult};
pub use identity::{ElementId, TypeName};
pub use model::{ModelElement, ModelGraph, TypeMatch};
