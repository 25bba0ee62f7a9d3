//! # mval-rules: Built-in Validation Rules
//!
//! Rule content for models built with `mval-graph`. The engine itself
//! ships no rules; callers register these with
//! [`register_builtin_rules`] or pick individual ones.
//!
//! ## Crate Policy
//!
//! - Validators are pure functions of the element they receive.
//! - Rules with optional backends register a stub instead of failing
//!   when the backend is missing.

pub mod builtin;
pub mod config;
pub mod error;
pub mod lexicon;

pub use builtin::{
    register_builtin_rules, CAPABILITY_INVOLVES_ACTOR, FUNCTION_NAME_STARTS_WITH_VERB,
    NO_EMPTY_DESCRIPTION,
};
pub use config::{RulesConfig, LEXICON_ENV};
pub use error::{RulesError, RulesResult};
pub use lexicon::{detect_lexicon, Lexicon};
