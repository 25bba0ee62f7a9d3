//! # Results Store
//!
//! The cumulative, session-wide collection of validation results. It grows
//! monotonically: entries are only removed by an explicit
//! [`ResultsStore::clear`], and stale entries for elements that left the
//! graph are not pruned.
//!
//! ## Concurrency
//!
//! The store sits behind a `parking_lot::RwLock`. [`ResultsStore::store_result`]
//! checks for an existing entry and inserts under a single write lock, so
//! two writers racing on one (rule, element) key cannot both win: the
//! first one to take the lock keeps its result.

use parking_lot::RwLock;
use serde_json::Value;

use mval_core::{ElementId, ModelElement};

use crate::error::EngineResult;
use crate::registry::Registry;
use crate::result::{Results, ResultsSnapshot, ValidationResult};
use crate::rule::Rule;

/// Thread-safe, write-once results collection.
#[derive(Debug)]
pub struct ResultsStore<E> {
    inner: RwLock<Results<E>>,
}

impl<E> ResultsStore<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Results::new()),
        }
    }

    /// Record `result` for (`rule`, `element`) unless one is already stored.
    ///
    /// The key is the element's own id. Returns `true` when written.
    pub fn store_result<M: ModelElement + ?Sized>(
        &self,
        rule: &Rule<E>,
        element: &M,
        result: ValidationResult,
    ) -> bool {
        let uuid = element.uuid();
        let written = self.inner.write().insert_if_absent(rule, uuid, result);
        if !written {
            tracing::trace!(rule = rule.id(), element = %uuid, "result already recorded; keeping it");
        }
        written
    }

    /// A copy of everything stored so far.
    pub fn snapshot(&self) -> Results<E> {
        self.inner.read().clone()
    }

    /// A copy restricted to one element.
    pub fn by_uuid(&self, uuid: &ElementId) -> Results<E> {
        self.inner.read().by_uuid(uuid)
    }

    /// Number of stored results.
    pub fn result_count(&self) -> usize {
        self.inner.read().result_count()
    }

    /// Drop every stored result.
    pub fn clear(&self) {
        *self.inner.write() = Results::new();
    }

    /// Serializable copy keyed by rule id.
    pub fn to_snapshot(&self) -> ResultsSnapshot {
        self.inner.read().to_snapshot()
    }

    /// Merge a previously saved snapshot. See [`Results::restore`].
    pub fn restore(&self, registry: &Registry<E>, snapshot: &Value) -> EngineResult<usize> {
        self.inner.write().restore(registry, snapshot)
    }
}

impl<E> Default for ResultsStore<E> {
    fn default() -> Self {
        Self::new()
    }
}
