//! Serializable summaries of a [`Results`] collection.
//!
//! A report flattens the rule-keyed results into one entry per rule, with
//! the rule's documentation and the ids of the elements it failed on. It
//! is what the command line prints and what CI pipelines consume.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use mval_core::{Category, ElementId};

use crate::registry::Registry;
use crate::result::Results;

/// Summary of one results collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub summary: ReportSummary,
    pub rules: Vec<RuleReport>,
}

/// Totals across all rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of rules with at least one result.
    pub rules: usize,
    pub results: usize,
    pub passed: usize,
    pub failed: usize,
    /// Failed results keyed by category name.
    pub failed_by_category: BTreeMap<String, usize>,
}

/// Results of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleReport {
    pub id: String,
    pub name: String,
    /// Union of the categories recorded for this rule, `None` when the
    /// rule has no results.
    pub category: Option<Category>,
    /// Union of the categories of the failed results alone. Rules sharing
    /// an id can record passes and failures under different categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_category: Option<Category>,
    pub rationale: String,
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperlink_further_reading: Option<String>,
    pub checked: usize,
    pub passed: usize,
    pub failing: Vec<ElementId>,
}

impl RuleReport {
    pub fn is_passing(&self) -> bool {
        self.failing.is_empty()
    }
}

impl ValidationReport {
    /// Build a report from `results`, keeping the results' rule order.
    pub fn from_results<E>(results: &Results<E>) -> Self {
        let mut summary = ReportSummary::default();
        let mut rules = Vec::with_capacity(results.len());

        for (rule, bucket) in results.iter() {
            let mut category = None::<Category>;
            let mut failed_category = None::<Category>;
            let mut failing = Vec::new();
            for result in bucket.values() {
                category = Some(category.map_or(result.category, |c| c | result.category));
                if !result.value {
                    failed_category = Some(failed_category.map_or(result.category, |c| c | result.category));
                    failing.push(result.uuid);
                    *summary
                        .failed_by_category
                        .entry(result.category.to_string())
                        .or_default() += 1;
                }
            }
            let checked = bucket.len();
            summary.results += checked;
            summary.failed += failing.len();
            summary.passed += checked - failing.len();
            if checked > 0 {
                summary.rules += 1;
            }

            let meta = rule.meta();
            rules.push(RuleReport {
                id: meta.id.clone(),
                name: meta.name.clone(),
                category,
                failed_category,
                rationale: meta.rationale.clone(),
                actions: meta.actions.clone(),
                hyperlink_further_reading: meta.hyperlink_further_reading.clone(),
                checked,
                passed: checked - failing.len(),
                failing,
            });
        }

        Self { summary, rules }
    }

    /// [`from_results`](Self::from_results) plus an empty entry for every
    /// registered rule id that has no bucket yet.
    pub fn with_registry<E>(results: &Results<E>, registry: &Registry<E>) -> Self {
        let mut report = Self::from_results(results);
        let mut seen: HashSet<String> = report.rules.iter().map(|r| r.id.clone()).collect();
        for (category, _, rule) in registry.iter() {
            if !seen.insert(rule.id().to_string()) {
                continue;
            }
            let meta = rule.meta();
            report.rules.push(RuleReport {
                id: meta.id.clone(),
                name: meta.name.clone(),
                category: Some(category),
                failed_category: None,
                rationale: meta.rationale.clone(),
                actions: meta.actions.clone(),
                hyperlink_further_reading: meta.hyperlink_further_reading.clone(),
                checked: 0,
                passed: 0,
                failing: Vec::new(),
            });
        }
        report
    }

    /// Whether any failed result carries a category intersecting `category`.
    pub fn has_failures(&self, category: Category) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.failed_category.is_some_and(|c| c.intersects(category)))
    }

    /// Whether any REQUIRED result failed.
    pub fn has_required_failures(&self) -> bool {
        self.has_failures(Category::REQUIRED)
    }

    /// Human-readable rendering, one block per rule.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let s = &self.summary;
        let _ = writeln!(
            out,
            "{} rule(s), {} result(s): {} passed, {} failed",
            s.rules, s.results, s.passed, s.failed
        );
        for rule in &self.rules {
            let status = match (rule.checked, rule.is_passing()) {
                (0, _) => "SKIP",
                (_, true) => "PASS",
                (_, false) => "FAIL",
            };
            let category = rule
                .category
                .map(|c| c.to_string())
                .unwrap_or_else(|| "none".to_string());
            let _ = writeln!(
                out,
                "  {status} [{category}] {}: {} ({}/{} passed)",
                rule.id, rule.name, rule.passed, rule.checked
            );
            if rule.is_passing() {
                continue;
            }
            for uuid in &rule.failing {
                let _ = writeln!(out, "      - {uuid}");
            }
            for action in &rule.actions {
                let _ = writeln!(out, "      action: {action}");
            }
            if let Some(link) = &rule.hyperlink_further_reading {
                let _ = writeln!(out, "      see: {link}");
            }
        }
        out
    }
}
