//! # mval-engine: Rule-Based Model Validation
//!
//! Registers validation rules against element types, runs them over an
//! object graph, and keeps their outcomes in a cumulative store.
//!
//! ## Architecture
//!
//! ```text
//! ValidationContext ─┬─ Registry      category → type → [Rule]
//!                    ├─ ResultsStore  rule → element id → ValidationResult
//!                    └─ EngineConfig  type matching per scope
//!
//! ModelValidation    every registered type, every matching element
//! ElementValidation  one element, the rules whose type applies to it
//! ```
//!
//! A [`Rule`] pairs documentation ([`RuleMeta`]) with a validator closure.
//! Rules are compared and hashed by id alone, so two rules sharing an id
//! share one results bucket.
//!
//! Results are write-once: the first result stored for a (rule, element)
//! pair stays until the store is cleared. Re-validating after fixing an
//! element does not change the stored outcome.
//!
//! ## Usage
//!
//! ```ignore
//! let ctx = ValidationContext::new();
//! ctx.register_rule(Category::REQUIRED, "LogicalComponent", meta)
//!     .with_validator(|e: &Element| Ok(!e.description.is_empty()));
//! let results = graph.validation(&ctx).validate()?;
//! let failed = results.by_value(false);
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `mval-core` internally; graphs plug in through the
//!   `ModelGraph` trait.
//! - No global state. Every session owns its context.
//! - No `unsafe` code.

pub mod config;
pub mod context;
pub mod error;
pub mod optional;
pub mod registry;
pub mod report;
pub mod result;
pub mod rule;
pub mod scope;
pub mod store;

pub use config::EngineConfig;
pub use context::{Registration, ValidationContext};
pub use error::{EngineResult, ValidationError};
pub use optional::OptionalDependency;
pub use registry::{Registry, TypeRules};
pub use report::{ReportSummary, RuleReport, ValidationReport};
pub use result::{Results, ResultsSnapshot, RuleResults, ValidationResult};
pub use rule::{Rule, RuleMeta, Validator, ValidatorError, ValidatorResult};
pub use scope::{ElementValidation, ModelValidation, RuleFilter, Validate};
pub use store::ResultsStore;
