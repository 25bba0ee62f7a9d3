//! # Rule Registry
//!
//! The table of registered rules, indexed by [`Category`] and then by
//! target element type. Within one (category, type) pair rules keep their
//! registration order; types keep the order in which they were first
//! registered; categories iterate `REQUIRED`, `RECOMMENDED`, `SUGGESTED`,
//! followed by any combined category in first-use order.
//!
//! The registry only grows. Registering two rules with the same id is
//! allowed and yields two entries; [`Registry::find`] returns the first
//! one registered.

use mval_core::{Category, ModelGraph, TypeMatch, TypeName};

use crate::error::{EngineResult, ValidationError};
use crate::rule::Rule;

/// Rules registered for one target type under one category.
#[derive(Debug)]
pub struct TypeRules<E> {
    type_name: TypeName,
    rules: Vec<Rule<E>>,
}

impl<E> TypeRules<E> {
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    pub fn rules(&self) -> &[Rule<E>] {
        &self.rules
    }
}

impl<E> Clone for TypeRules<E> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name.clone(),
            rules: self.rules.clone(),
        }
    }
}

/// Category → type → ordered rules.
#[derive(Debug)]
pub struct Registry<E> {
    categories: Vec<(Category, Vec<TypeRules<E>>)>,
}

impl<E> Registry<E> {
    /// An empty registry with the three single categories present.
    pub fn new() -> Self {
        Self {
            categories: Category::all().iter().map(|&c| (c, Vec::new())).collect(),
        }
    }

    /// Append `rule` to the list for (`category`, `type_name`), creating the
    /// list on first use.
    pub fn register(&mut self, category: Category, type_name: TypeName, rule: Rule<E>) {
        let types = match self.categories.iter().position(|(c, _)| *c == category) {
            Some(idx) => &mut self.categories[idx].1,
            None => {
                self.categories.push((category, Vec::new()));
                let last = self.categories.len() - 1;
                &mut self.categories[last].1
            }
        };
        match types.iter_mut().find(|t| t.type_name == type_name) {
            Some(entry) => entry.rules.push(rule),
            None => types.push(TypeRules {
                type_name,
                rules: vec![rule],
            }),
        }
    }

    /// Categories present in the registry, including empty ones.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().map(|(c, _)| *c)
    }

    /// Per-type rule lists registered under `category`.
    pub fn types(&self, category: Category) -> &[TypeRules<E>] {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, types)| types.as_slice())
            .unwrap_or(&[])
    }

    /// Rules registered for (`category`, `type_name`), in registration order.
    pub fn rules(&self, category: Category, type_name: &TypeName) -> &[Rule<E>] {
        self.types(category)
            .iter()
            .find(|t| &t.type_name == type_name)
            .map(|t| t.rules.as_slice())
            .unwrap_or(&[])
    }

    /// Every (category, type, rule) triple in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &TypeName, &Rule<E>)> + '_ {
        self.categories.iter().flat_map(|(category, types)| {
            types.iter().flat_map(move |t| {
                t.rules
                    .iter()
                    .map(move |rule| (*category, &t.type_name, rule))
            })
        })
    }

    /// The first registered rule with this id.
    pub fn find(&self, id: &str) -> EngineResult<&Rule<E>> {
        self.iter()
            .map(|(_, _, rule)| rule)
            .find(|rule| rule.id() == id)
            .ok_or_else(|| ValidationError::RuleNotFound { id: id.to_string() })
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.iter().any(|(_, _, rule)| rule.id() == id)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|(_, types)| types.iter())
            .map(|t| t.rules.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A registry-shaped copy keeping only the types accepted by `keep`.
    ///
    /// Every category key survives, possibly with no types under it.
    pub fn restricted(&self, mut keep: impl FnMut(&TypeName) -> bool) -> Self {
        Self {
            categories: self
                .categories
                .iter()
                .map(|(category, types)| {
                    let kept = types
                        .iter()
                        .filter(|t| keep(&t.type_name))
                        .cloned()
                        .collect();
                    (*category, kept)
                })
                .collect(),
        }
    }
}

impl<E> Registry<E> {
    /// The registry restricted to the types that an element of
    /// `type_name` matches under `matching`.
    pub fn rules_for<G: ModelGraph + ?Sized>(
        &self,
        type_name: &TypeName,
        matching: TypeMatch,
        graph: &G,
    ) -> Self {
        self.restricted(|registered| matching.matches(graph, type_name, registered))
    }
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Registry<E> {
    fn clone(&self) -> Self {
        Self {
            categories: self.categories.clone(),
        }
    }
}
