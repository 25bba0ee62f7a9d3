//! # Validation Rules
//!
//! A [`Rule`] is an immutable descriptor wrapping one validator predicate
//! plus the documentation a report needs: a display name, the rationale,
//! remediation actions, and an optional further-reading link.
//!
//! ## Identity
//!
//! A rule's identity is its `id` and nothing else. Equality and hashing
//! both use the id only, so two rules registered with the same id but a
//! different name, rationale, or validator compare equal and share one
//! bucket in the results store.
//!
//! Rules are cheap to clone: the descriptor and the validator sit behind
//! `Arc`s and a clone refers to the same validator.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Error a validator may raise instead of a verdict.
pub type ValidatorError = Box<dyn std::error::Error + Send + Sync>;

/// What a validator returns: `Ok(true)` when the element passes.
pub type ValidatorResult = Result<bool, ValidatorError>;

/// A shareable validator predicate over elements of type `E`.
pub type Validator<E> = Arc<dyn Fn(&E) -> ValidatorResult + Send + Sync>;

/// Documentation fields of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMeta {
    /// Stable identifier, e.g. `Rule-001`.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Why the rule exists.
    pub rationale: String,
    /// Ordered remediation suggestions.
    pub actions: Vec<String>,
    /// Optional link to background material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperlink_further_reading: Option<String>,
}

impl RuleMeta {
    /// Describe a rule without a further-reading link.
    pub fn new<A, S>(
        id: impl Into<String>,
        name: impl Into<String>,
        rationale: impl Into<String>,
        actions: A,
    ) -> Self
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            rationale: rationale.into(),
            actions: actions.into_iter().map(Into::into).collect(),
            hyperlink_further_reading: None,
        }
    }

    /// Attach a further-reading link.
    pub fn with_further_reading(mut self, url: impl Into<String>) -> Self {
        self.hyperlink_further_reading = Some(url.into());
        self
    }
}

/// A named predicate applied to elements of type `E`.
pub struct Rule<E> {
    meta: Arc<RuleMeta>,
    validator: Validator<E>,
}

impl<E> Rule<E> {
    /// Wrap a validator into a rule.
    pub fn new<F>(meta: RuleMeta, validator: F) -> Self
    where
        F: Fn(&E) -> ValidatorResult + Send + Sync + 'static,
    {
        Self {
            meta: Arc::new(meta),
            validator: Arc::new(validator),
        }
    }

    pub fn id(&self) -> &str {
        &self.meta.id
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn rationale(&self) -> &str {
        &self.meta.rationale
    }

    pub fn actions(&self) -> &[String] {
        &self.meta.actions
    }

    pub fn hyperlink_further_reading(&self) -> Option<&str> {
        self.meta.hyperlink_further_reading.as_deref()
    }

    /// All documentation fields.
    pub fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    /// Run the validator on one element and return its verdict unchanged.
    ///
    /// Has no side effect. An error raised by the validator is returned
    /// as is.
    pub fn evaluate(&self, element: &E) -> ValidatorResult {
        (self.validator)(element)
    }
}

impl<E> Clone for Rule<E> {
    fn clone(&self) -> Self {
        Self {
            meta: Arc::clone(&self.meta),
            validator: Arc::clone(&self.validator),
        }
    }
}

impl<E> PartialEq for Rule<E> {
    fn eq(&self, other: &Self) -> bool {
        self.meta.id == other.meta.id
    }
}

impl<E> Eq for Rule<E> {}

impl<E> Hash for Rule<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.meta.id.hash(state);
    }
}

impl<E> fmt::Debug for Rule<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.meta.id)
            .field("name", &self.meta.name)
            .finish_non_exhaustive()
    }
}

impl<E> fmt::Display for Rule<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.meta.id, self.meta.name)
    }
}
