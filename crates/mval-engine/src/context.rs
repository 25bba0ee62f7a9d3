//! # Validation Context
//!
//! The session object that owns a rule registry and a results store. It
//! replaces process-wide singletons: whoever drives validation constructs
//! one context, registers rules into it, and hands it to the scopes. Two
//! contexts never see each other's rules or results.
//!
//! The context is `Send + Sync`. Registry and store each sit behind a
//! `parking_lot::RwLock`, so rules can be registered through a shared
//! reference and several threads may validate against the same context.

use std::fmt;

use parking_lot::RwLock;
use serde_json::Value;

use mval_core::{Category, ModelElement, ModelGraph, TypeName};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::optional::OptionalDependency;
use crate::registry::Registry;
use crate::result::ValidationResult;
use crate::rule::{Rule, RuleMeta, ValidatorResult};
use crate::scope::{ElementValidation, ModelValidation};
use crate::store::ResultsStore;

/// Registry, results store and configuration of one validation session.
pub struct ValidationContext<E> {
    registry: RwLock<Registry<E>>,
    results: ResultsStore<E>,
    config: EngineConfig,
}

impl<E> ValidationContext<E> {
    /// A context with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            registry: RwLock::new(Registry::new()),
            results: ResultsStore::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start registering a rule for elements of `type_name`.
    ///
    /// Nothing is registered until a validator is supplied through the
    /// returned [`Registration`].
    pub fn register_rule(
        &self,
        category: Category,
        type_name: impl Into<TypeName>,
        meta: RuleMeta,
    ) -> Registration<'_, E> {
        Registration {
            registry: &self.registry,
            category,
            type_name: type_name.into(),
            meta,
        }
    }

    /// A copy of the full registry.
    pub fn rules(&self) -> Registry<E> {
        self.registry.read().clone()
    }

    /// Run `f` against the registry without copying it.
    pub fn with_registry<R>(&self, f: impl FnOnce(&Registry<E>) -> R) -> R {
        f(&self.registry.read())
    }

    pub fn results(&self) -> &ResultsStore<E> {
        &self.results
    }

    /// Record a result for (`rule`, `element`) unless one exists.
    pub fn store_result<M: ModelElement + ?Sized>(
        &self,
        rule: &Rule<E>,
        element: &M,
        result: ValidationResult,
    ) -> bool {
        self.results.store_result(rule, element, result)
    }

    /// Merge a saved results snapshot, resolving rule ids against this
    /// context's registry.
    pub fn restore_results(&self, snapshot: &Value) -> EngineResult<usize> {
        let registry = self.registry.read();
        self.results.restore(&registry, snapshot)
    }

    /// The whole-graph validation facet for `graph`.
    pub fn model<'a, G>(&'a self, graph: &'a G) -> ModelValidation<'a, G>
    where
        G: ModelGraph<Element = E>,
    {
        ModelValidation::new(self, graph)
    }

    /// The single-element validation facet for `element` of `graph`.
    pub fn element<'a, G>(&'a self, graph: &'a G, element: &'a E) -> ElementValidation<'a, G>
    where
        G: ModelGraph<Element = E>,
    {
        ElementValidation::new(self, graph, element)
    }
}

impl<E> Default for ValidationContext<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for ValidationContext<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationContext")
            .field("rules", &self.registry.read().len())
            .field("results", &self.results.result_count())
            .field("config", &self.config)
            .finish()
    }
}

/// A pending registration: category, target type and documentation are
/// fixed, the validator is still missing.
#[must_use = "a rule is only registered once a validator is supplied"]
pub struct Registration<'a, E> {
    registry: &'a RwLock<Registry<E>>,
    category: Category,
    type_name: TypeName,
    meta: RuleMeta,
}

impl<'a, E> Registration<'a, E> {
    /// Wrap `validator` into a rule, append it to the registry and return it.
    pub fn with_validator<F>(self, validator: F) -> Rule<E>
    where
        F: Fn(&E) -> ValidatorResult + Send + Sync + 'static,
    {
        let rule = Rule::new(self.meta, validator);
        commit(self.registry, self.category, self.type_name, rule)
    }

    /// Register the full rule when `dependency` was detected, otherwise a
    /// stub that always fails and tells the operator what to install.
    pub fn with_optional_validator<T, F>(
        self,
        dependency: OptionalDependency<T>,
        build: impl FnOnce(T) -> F,
    ) -> Rule<E>
    where
        F: Fn(&E) -> ValidatorResult + Send + Sync + 'static,
    {
        let remediation = dependency.remediation();
        let name = dependency.name().to_string();
        match dependency.into_handle() {
            Some(handle) => self.with_validator(build(handle)),
            None => {
                tracing::warn!(
                    rule = %self.meta.id,
                    dependency = %name,
                    "optional dependency missing; registering an always-failing stub"
                );
                let mut meta = self.meta;
                meta.actions.push(remediation);
                let stub = Rule::new(meta, |_: &E| Ok(false));
                commit(self.registry, self.category, self.type_name, stub)
            }
        }
    }
}

fn commit<E>(
    registry: &RwLock<Registry<E>>,
    category: Category,
    type_name: TypeName,
    rule: Rule<E>,
) -> Rule<E> {
    tracing::debug!(rule = rule.id(), %category, r#type = %type_name, "registered rule");
    registry.write().register(category, type_name, rule.clone());
    rule
}
