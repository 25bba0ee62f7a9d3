//! # Validation Results
//!
//! [`ValidationResult`] is the outcome of one rule on one element.
//! [`Results`] maps each rule to the results it produced, keyed by element
//! id. It is a plain value: the filters [`Results::by_uuid`],
//! [`Results::by_category`] and [`Results::by_value`] return new,
//! independent snapshots and never touch the receiver, so filters chain
//! with intersection semantics.
//!
//! ## Write-once
//!
//! [`Results::insert_if_absent`] is the only way a result enters a bucket.
//! An existing entry for the same (rule, element) pair always wins, so a
//! later pass never refreshes an earlier verdict.
//!
//! ## Empty buckets
//!
//! Filtering never drops a rule key, even when nothing in its bucket
//! survives. Callers iterate buckets and see empty ones.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use mval_core::{Category, ElementId};

use crate::error::{EngineResult, ValidationError};
use crate::registry::Registry;
use crate::rule::Rule;

/// The outcome of one rule applied to one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Identity of the evaluated element.
    pub uuid: ElementId,
    /// Category the rule was registered under when it was evaluated.
    pub category: Category,
    /// `true` when the element passed.
    pub value: bool,
}

/// Results of one rule, keyed by element id.
pub type RuleResults = BTreeMap<ElementId, ValidationResult>;

/// Serializable form of [`Results`]: rule id → element id → result.
pub type ResultsSnapshot = BTreeMap<String, RuleResults>;

/// Rule → element id → result.
#[derive(Debug)]
pub struct Results<E> {
    buckets: Vec<(Rule<E>, RuleResults)>,
    index: HashMap<Rule<E>, usize>,
}

impl<E> Results<E> {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Number of rule buckets, including empty ones.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of stored results across all buckets.
    pub fn result_count(&self) -> usize {
        self.buckets.iter().map(|(_, bucket)| bucket.len()).sum()
    }

    /// Number of passing results.
    pub fn passed(&self) -> usize {
        self.count_where(|r| r.value)
    }

    /// Number of failing results.
    pub fn failed(&self) -> usize {
        self.count_where(|r| !r.value)
    }

    fn count_where(&self, pred: impl Fn(&ValidationResult) -> bool) -> usize {
        self.buckets
            .iter()
            .flat_map(|(_, bucket)| bucket.values())
            .filter(|r| pred(r))
            .count()
    }

    /// Buckets in the order their rules first stored a result.
    pub fn iter(&self) -> impl Iterator<Item = (&Rule<E>, &RuleResults)> + '_ {
        self.buckets.iter().map(|(rule, bucket)| (rule, bucket))
    }

    /// The bucket of `rule`, if it has one.
    pub fn get(&self, rule: &Rule<E>) -> Option<&RuleResults> {
        self.index.get(rule).map(|&idx| &self.buckets[idx].1)
    }

    /// The bucket of the first rule whose id is `id`.
    pub fn get_by_id(&self, id: &str) -> EngineResult<&RuleResults> {
        self.buckets
            .iter()
            .find(|(rule, _)| rule.id() == id)
            .map(|(_, bucket)| bucket)
            .ok_or_else(|| ValidationError::RuleNotFound { id: id.to_string() })
    }

    /// Whether a result is stored for (`rule`, `uuid`).
    pub fn contains(&self, rule: &Rule<E>, uuid: &ElementId) -> bool {
        self.get(rule).is_some_and(|bucket| bucket.contains_key(uuid))
    }

    /// The bucket of `rule`, created empty if absent.
    pub fn bucket_or_insert(&mut self, rule: &Rule<E>) -> &mut RuleResults {
        let idx = match self.index.get(rule) {
            Some(&idx) => idx,
            None => {
                self.buckets.push((rule.clone(), RuleResults::new()));
                let idx = self.buckets.len() - 1;
                self.index.insert(rule.clone(), idx);
                idx
            }
        };
        &mut self.buckets[idx].1
    }

    /// Store `result` under (`rule`, `uuid`) unless an entry exists.
    ///
    /// Returns `true` when the result was written.
    pub fn insert_if_absent(
        &mut self,
        rule: &Rule<E>,
        uuid: ElementId,
        result: ValidationResult,
    ) -> bool {
        use std::collections::btree_map::Entry;

        match self.bucket_or_insert(rule).entry(uuid) {
            Entry::Vacant(slot) => {
                slot.insert(result);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Keep only results for element `uuid`.
    pub fn by_uuid(&self, uuid: &ElementId) -> Self {
        self.filtered(|id, _| id == uuid)
    }

    /// Keep only results recorded under exactly `category`.
    pub fn by_category(&self, category: Category) -> Self {
        self.filtered(|_, r| r.category == category)
    }

    /// Keep only passing (`true`) or failing (`false`) results.
    pub fn by_value(&self, value: bool) -> Self {
        self.filtered(|_, r| r.value == value)
    }

    fn filtered(&self, keep: impl Fn(&ElementId, &ValidationResult) -> bool) -> Self {
        let buckets: Vec<_> = self
            .buckets
            .iter()
            .map(|(rule, bucket)| {
                let kept = bucket
                    .iter()
                    .filter(|(id, r)| keep(id, r))
                    .map(|(id, r)| (*id, *r))
                    .collect();
                (rule.clone(), kept)
            })
            .collect();
        Self::from_buckets(buckets)
    }

    fn from_buckets(buckets: Vec<(Rule<E>, RuleResults)>) -> Self {
        let index = buckets
            .iter()
            .enumerate()
            .map(|(idx, (rule, _))| (rule.clone(), idx))
            .collect();
        Self { buckets, index }
    }

    /// Serializable copy keyed by rule id.
    pub fn to_snapshot(&self) -> ResultsSnapshot {
        self.buckets
            .iter()
            .map(|(rule, bucket)| (rule.id().to_string(), bucket.clone()))
            .collect()
    }

    /// Merge a snapshot produced by [`to_snapshot`](Self::to_snapshot).
    ///
    /// Rule ids are resolved against `registry` (first registered rule
    /// wins). The whole snapshot is checked before anything is written:
    /// a non-mapping at the top level or in place of a rule bucket, an
    /// unknown rule id, or a result filed under the wrong element id
    /// fails and leaves `self` untouched. Entries already present are
    /// kept (write-once). Returns the number of results written.
    pub fn restore(&mut self, registry: &Registry<E>, snapshot: &Value) -> EngineResult<usize> {
        let rules = snapshot
            .as_object()
            .ok_or_else(|| ValidationError::MalformedSnapshot {
                found: json_kind(snapshot).to_string(),
            })?;

        let mut staged = Vec::new();
        for (rule_id, bucket) in rules {
            let rule = registry.find(rule_id)?;
            let entries = bucket
                .as_object()
                .ok_or_else(|| ValidationError::MalformedBucket {
                    rule_id: rule_id.clone(),
                    detail: format!("expected a mapping of element ids, found {}", json_kind(bucket)),
                })?;
            for (key, raw) in entries {
                let uuid: ElementId = key.parse().map_err(|e| ValidationError::MalformedBucket {
                    rule_id: rule_id.clone(),
                    detail: format!("{e}"),
                })?;
                let result: ValidationResult = serde_json::from_value(raw.clone())?;
                if result.uuid != uuid {
                    return Err(ValidationError::MalformedBucket {
                        rule_id: rule_id.clone(),
                        detail: format!("result for {} filed under {uuid}", result.uuid),
                    });
                }
                staged.push((rule.clone(), uuid, result));
            }
        }

        let mut written = 0;
        for (rule, uuid, result) in staged {
            if self.insert_if_absent(&rule, uuid, result) {
                written += 1;
            }
        }
        Ok(written)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

impl<E> Default for Results<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Results<E> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            index: self.index.clone(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::rule::RuleMeta;
    use proptest::prelude::*;

    fn rules() -> Vec<Rule<()>> {
        ["R1", "R2", "R3"]
            .iter()
            .map(|id| Rule::new(RuleMeta::new(*id, *id, "r", ["a"]), |_: &()| Ok(true)))
            .collect()
    }

    fn uuids() -> Vec<ElementId> {
        (0..4u128).map(|n| ElementId(uuid::Uuid::from_u128(n + 1))).collect()
    }

    fn writes() -> impl Strategy<Value = Vec<(usize, usize, u8, bool)>> {
        prop::collection::vec((0usize..3, 0usize..4, 0u8..3, any::<bool>()), 0..24)
    }

    fn build(writes: &[(usize, usize, u8, bool)]) -> Results<()> {
        let (rules, uuids) = (rules(), uuids());
        let mut results = Results::new();
        for &(r, u, c, value) in writes {
            let result = ValidationResult {
                uuid: uuids[u],
                category: Category::all()[c as usize],
                value,
            };
            results.insert_if_absent(&rules[r], uuids[u], result);
        }
        results
    }

    proptest! {
        /// The first write for a key is the one that stays.
        #[test]
        fn first_write_wins(writes in writes()) {
            let results = build(&writes);
            let (rules, uuids) = (rules(), uuids());
            for (r, rule) in rules.iter().enumerate() {
                for (u, uuid) in uuids.iter().enumerate() {
                    let first = writes.iter().find(|w| w.0 == r && w.1 == u);
                    let stored = results.get(rule).and_then(|b| b.get(uuid));
                    prop_assert_eq!(first.map(|w| w.3), stored.map(|s| s.value));
                }
            }
        }

        /// Filters compose as intersections regardless of order.
        #[test]
        fn filters_commute(writes in writes(), u in 0usize..4, c in 0u8..3, v in any::<bool>()) {
            let results = build(&writes);
            let uuid = uuids()[u];
            let category = Category::all()[c as usize];
            let one = results.by_uuid(&uuid).by_category(category).by_value(v);
            let two = results.by_value(v).by_uuid(&uuid).by_category(category);
            prop_assert_eq!(one.to_snapshot(), two.to_snapshot());
            for (_, bucket) in one.iter() {
                for r in bucket.values() {
                    prop_assert!(r.uuid == uuid && r.category == category && r.value == v);
                }
            }
        }

        /// Filtering never changes the bucket count.
        #[test]
        fn filters_keep_rule_keys(writes in writes(), v in any::<bool>()) {
            let results = build(&writes);
            prop_assert_eq!(results.by_value(v).len(), results.len());
        }
    }
}
