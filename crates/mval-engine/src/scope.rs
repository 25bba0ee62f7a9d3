//! # Validation Scopes
//!
//! Two facets drive validation against a [`ValidationContext`]:
//!
//! - [`ModelValidation`] covers a whole graph. For every registered
//!   (category, type) pair it asks the graph for the elements of that type
//!   and evaluates each rule on each of them.
//! - [`ElementValidation`] is bound to one element and evaluates only the
//!   rules registered for types that apply to that element.
//!
//! Both scopes write through the context's write-once store, so running a
//! pass twice never replaces a result. Both return copies: mutating what a
//! scope hands back has no effect on the store.
//!
//! ## Type matching
//!
//! The model scope matches graph elements against registered types with
//! [`EngineConfig::model_type_match`](crate::config::EngineConfig); the
//! element scope compares its element's type with
//! [`EngineConfig::element_type_match`](crate::config::EngineConfig). The
//! defaults are both exact. Configuring the model scope for subtypes while
//! leaving the element scope exact reproduces the behavior where a rule
//! registered on an ancestor type reaches an element in a whole-graph pass
//! but not in an element pass.
//!
//! ## Failure
//!
//! A validator error aborts the pass with
//! [`ValidationError::Validator`]. Results stored before the failure stay
//! in the store.

use mval_core::{Category, ElementId, ModelElement, ModelGraph};

use crate::context::ValidationContext;
use crate::error::{EngineResult, ValidationError};
use crate::registry::Registry;
use crate::result::{Results, ValidationResult};
use crate::rule::Rule;

/// Restricts a pass to one rule, given as a rule or as a rule id.
///
/// Every registered rule sharing the id is evaluated.
#[derive(Debug)]
pub enum RuleFilter<'r, E> {
    Rule(&'r Rule<E>),
    Id(&'r str),
}

impl<'r, E> RuleFilter<'r, E> {
    pub fn id(&self) -> &str {
        match self {
            RuleFilter::Rule(rule) => rule.id(),
            RuleFilter::Id(id) => id,
        }
    }

    pub fn admits(&self, rule: &Rule<E>) -> bool {
        rule.id() == self.id()
    }
}

impl<'r, E> Clone for RuleFilter<'r, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'r, E> Copy for RuleFilter<'r, E> {}

impl<'r, E> From<&'r Rule<E>> for RuleFilter<'r, E> {
    fn from(rule: &'r Rule<E>) -> Self {
        RuleFilter::Rule(rule)
    }
}

impl<'r, E> From<&'r str> for RuleFilter<'r, E> {
    fn from(id: &'r str) -> Self {
        RuleFilter::Id(id)
    }
}

impl<'r, E> From<&'r String> for RuleFilter<'r, E> {
    fn from(id: &'r String) -> Self {
        RuleFilter::Id(id.as_str())
    }
}

/// Whole-graph validation facet.
pub struct ModelValidation<'a, G: ModelGraph> {
    ctx: &'a ValidationContext<G::Element>,
    graph: &'a G,
}

impl<'a, G: ModelGraph> ModelValidation<'a, G> {
    pub fn new(ctx: &'a ValidationContext<G::Element>, graph: &'a G) -> Self {
        Self { ctx, graph }
    }

    /// The full registry.
    pub fn rules(&self) -> Registry<G::Element> {
        self.ctx.rules()
    }

    /// Everything stored so far, for any element.
    pub fn results(&self) -> Results<G::Element> {
        self.ctx.results().snapshot()
    }

    /// Evaluate every registered rule on every matching element.
    pub fn validate(&self) -> EngineResult<Results<G::Element>> {
        self.run(None)
    }

    /// Evaluate only the rules whose id matches `filter`.
    ///
    /// Fails with [`ValidationError::RuleNotFound`] before evaluating
    /// anything if the registry holds no such rule.
    pub fn validate_rule<'r>(
        &self,
        filter: impl Into<RuleFilter<'r, G::Element>>,
    ) -> EngineResult<Results<G::Element>>
    where
        G::Element: 'r,
    {
        self.run(Some(filter.into()))
    }

    fn run(&self, filter: Option<RuleFilter<'_, G::Element>>) -> EngineResult<Results<G::Element>> {
        let registry = self.ctx.rules();
        if let Some(filter) = &filter {
            ensure_registered(&registry, filter)?;
        }
        let matching = self.ctx.config().model_type_match;

        let mut stats = PassStats::default();
        for category in registry.categories() {
            for entry in registry.types(category) {
                let rules: Vec<&Rule<G::Element>> = entry
                    .rules()
                    .iter()
                    .filter(|rule| filter.as_ref().map_or(true, |f| f.admits(rule)))
                    .collect();
                if rules.is_empty() {
                    continue;
                }
                for element in self.graph.search(&[entry.type_name()], matching)? {
                    for rule in &rules {
                        evaluate_and_store(self.ctx, category, rule, element, &mut stats)?;
                    }
                }
            }
        }

        tracing::info!(
            scope = "model",
            rule = filter.as_ref().map(|f| f.id()),
            evaluated = stats.evaluated,
            stored = stats.stored,
            kept = stats.kept,
            "validation pass complete"
        );
        Ok(self.results())
    }
}

impl<'a, G: ModelGraph> Clone for ModelValidation<'a, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, G: ModelGraph> Copy for ModelValidation<'a, G> {}

/// Single-element validation facet.
pub struct ElementValidation<'a, G: ModelGraph> {
    ctx: &'a ValidationContext<G::Element>,
    graph: &'a G,
    element: &'a G::Element,
}

impl<'a, G: ModelGraph> ElementValidation<'a, G> {
    pub fn new(ctx: &'a ValidationContext<G::Element>, graph: &'a G, element: &'a G::Element) -> Self {
        Self {
            ctx,
            graph,
            element,
        }
    }

    fn applicable(&self, registry: &Registry<G::Element>) -> Registry<G::Element> {
        registry.rules_for(
            self.element.type_name(),
            self.ctx.config().element_type_match,
            self.graph,
        )
    }

    /// The registry restricted to types that apply to the bound element.
    ///
    /// Every category key is present, possibly empty.
    pub fn rules(&self) -> Registry<G::Element> {
        self.ctx.with_registry(|registry| self.applicable(registry))
    }

    /// Stored results restricted to the bound element.
    pub fn results(&self) -> Results<G::Element> {
        self.ctx.results().by_uuid(&self.element.uuid())
    }

    /// Evaluate every applicable rule on the bound element.
    pub fn validate(&self) -> EngineResult<Results<G::Element>> {
        self.run(None)
    }

    /// Evaluate only the applicable rules whose id matches `filter`.
    ///
    /// An id unknown to the registry fails with
    /// [`ValidationError::RuleNotFound`]. A registered id whose rules do
    /// not apply to the element evaluates nothing.
    pub fn validate_rule<'r>(
        &self,
        filter: impl Into<RuleFilter<'r, G::Element>>,
    ) -> EngineResult<Results<G::Element>>
    where
        G::Element: 'r,
    {
        self.run(Some(filter.into()))
    }

    fn run(&self, filter: Option<RuleFilter<'_, G::Element>>) -> EngineResult<Results<G::Element>> {
        let registry = self.ctx.rules();
        if let Some(filter) = &filter {
            ensure_registered(&registry, filter)?;
        }
        let applicable = self.applicable(&registry);

        let mut stats = PassStats::default();
        for category in applicable.categories() {
            for entry in applicable.types(category) {
                for rule in entry.rules() {
                    if filter.as_ref().is_some_and(|f| !f.admits(rule)) {
                        continue;
                    }
                    evaluate_and_store(self.ctx, category, rule, self.element, &mut stats)?;
                }
            }
        }

        tracing::info!(
            scope = "element",
            element = %self.element.uuid(),
            rule = filter.as_ref().map(|f| f.id()),
            evaluated = stats.evaluated,
            stored = stats.stored,
            kept = stats.kept,
            "validation pass complete"
        );
        Ok(self.results())
    }
}

impl<'a, G: ModelGraph> Clone for ElementValidation<'a, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, G: ModelGraph> Copy for ElementValidation<'a, G> {}

/// Entry point for validating any [`ModelGraph`] against a context.
pub trait Validate: ModelGraph + Sized {
    /// The whole-graph facet.
    fn validation<'a>(&'a self, ctx: &'a ValidationContext<Self::Element>) -> ModelValidation<'a, Self> {
        ModelValidation::new(ctx, self)
    }

    /// The single-element facet for the element with `uuid`, if present.
    fn element_validation<'a>(
        &'a self,
        ctx: &'a ValidationContext<Self::Element>,
        uuid: &ElementId,
    ) -> Option<ElementValidation<'a, Self>> {
        self.by_uuid(uuid)
            .map(|element| ElementValidation::new(ctx, self, element))
    }
}

impl<G: ModelGraph> Validate for G {}

#[derive(Debug, Default)]
struct PassStats {
    evaluated: usize,
    stored: usize,
    kept: usize,
}

fn ensure_registered<E>(registry: &Registry<E>, filter: &RuleFilter<'_, E>) -> EngineResult<()> {
    if registry.contains_id(filter.id()) {
        Ok(())
    } else {
        Err(ValidationError::RuleNotFound {
            id: filter.id().to_string(),
        })
    }
}

fn evaluate_and_store<E: ModelElement>(
    ctx: &ValidationContext<E>,
    category: Category,
    rule: &Rule<E>,
    element: &E,
    stats: &mut PassStats,
) -> EngineResult<()> {
    let uuid = element.uuid();
    let value = rule
        .evaluate(element)
        .map_err(|source| ValidationError::Validator {
            rule_id: rule.id().to_string(),
            element: uuid,
            source,
        })?;
    tracing::debug!(rule = rule.id(), element = %uuid, %category, value, "evaluated rule");

    stats.evaluated += 1;
    let result = ValidationResult {
        uuid,
        category,
        value,
    };
    if ctx.store_result(rule, element, result) {
        stats.stored += 1;
    } else {
        stats.kept += 1;
    }
    Ok(())
}
