//! End-to-end behavior of the two validation scopes against a small
//! in-memory graph: registration, write-once storage, type matching per
//! scope, rule filtering and failure handling.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mval_core::{Category, ElementId, ModelElement, ModelGraph, TypeMatch, TypeName};
use mval_engine::{
    EngineConfig, Rule, RuleMeta, Validate, ValidationContext, ValidationError,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Node {
    id: ElementId,
    ty: TypeName,
    description: String,
    actors: Vec<String>,
}

impl ModelElement for Node {
    fn uuid(&self) -> ElementId {
        self.id
    }

    fn type_name(&self) -> &TypeName {
        &self.ty
    }
}

#[derive(Default)]
struct Graph {
    nodes: Vec<Node>,
    parents: HashMap<TypeName, TypeName>,
}

impl Graph {
    fn add(&mut self, ty: &str) -> ElementId {
        let id = ElementId::new();
        self.nodes.push(Node {
            id,
            ty: ty.into(),
            description: String::new(),
            actors: Vec::new(),
        });
        id
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Node {
        self.nodes.iter_mut().find(|n| n.id == id).unwrap()
    }

    fn extends(mut self, ty: &str, parent: &str) -> Self {
        self.parents.insert(ty.into(), parent.into());
        self
    }
}

impl ModelGraph for Graph {
    type Element = Node;

    fn elements(&self) -> Box<dyn Iterator<Item = &Node> + '_> {
        Box::new(self.nodes.iter())
    }

    fn by_uuid(&self, uuid: &ElementId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == *uuid)
    }

    fn is_subtype(&self, ty: &TypeName, ancestor: &TypeName) -> bool {
        let mut current = Some(ty);
        while let Some(t) = current {
            if t == ancestor {
                return true;
            }
            current = self.parents.get(t);
        }
        false
    }
}

fn involved_actors_rule(ctx: &ValidationContext<Node>) -> Rule<Node> {
    ctx.register_rule(
        Category::REQUIRED,
        "Capability",
        RuleMeta::new(
            "Rule-002",
            "Capability involves an actor",
            "A capability nobody takes part in describes no behavior.",
            ["Involve at least one actor."],
        ),
    )
    .with_validator(|n: &Node| Ok(!n.actors.is_empty()))
}

fn counting_rule(
    ctx: &ValidationContext<Node>,
    category: Category,
    ty: &str,
    id: &str,
    calls: &Arc<AtomicUsize>,
) -> Rule<Node> {
    let calls = Arc::clone(calls);
    ctx.register_rule(category, ty, RuleMeta::new(id, id, "r", ["a"]))
        .with_validator(move |_: &Node| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        })
}

fn capability_graph() -> (Graph, ElementId, ElementId) {
    let mut graph = Graph::default();
    let c1 = graph.add("Capability");
    let c2 = graph.add("Capability");
    graph.node_mut(c2).actors.push("Operator".into());
    (graph, c1, c2)
}

// ---------------------------------------------------------------------------
// Model scope
// ---------------------------------------------------------------------------

#[test]
fn capability_without_actors_fails() {
    let ctx = ValidationContext::new();
    involved_actors_rule(&ctx);
    let (graph, c1, c2) = capability_graph();

    let results = graph.validation(&ctx).validate().unwrap();
    let bucket = results.get_by_id("Rule-002").unwrap();
    assert_eq!(bucket.len(), 2);
    assert!(!bucket[&c1].value);
    assert!(bucket[&c2].value);
    assert_eq!(bucket[&c1].category, Category::REQUIRED);

    let failed = results.by_value(false);
    assert_eq!(failed.result_count(), 1);
    assert!(failed.get_by_id("Rule-002").unwrap().contains_key(&c1));
}

#[test]
fn results_are_write_once_until_cleared() {
    let ctx = ValidationContext::new();
    involved_actors_rule(&ctx);
    let (mut graph, c1, _) = capability_graph();

    graph.validation(&ctx).validate().unwrap();
    graph.node_mut(c1).actors.push("Pilot".into());

    let again = graph.validation(&ctx).validate().unwrap();
    assert!(!again.get_by_id("Rule-002").unwrap()[&c1].value);

    ctx.results().clear();
    let fresh = graph.validation(&ctx).validate().unwrap();
    assert!(fresh.get_by_id("Rule-002").unwrap()[&c1].value);
}

#[test]
fn empty_graph_yields_no_results() {
    let ctx = ValidationContext::new();
    involved_actors_rule(&ctx);
    let graph = Graph::default();
    let results = graph.validation(&ctx).validate().unwrap();
    assert_eq!(results.result_count(), 0);
}

#[test]
fn returned_results_are_copies() {
    let ctx = ValidationContext::new();
    let rule = involved_actors_rule(&ctx);
    let (graph, _, _) = capability_graph();

    let mut results = graph.validation(&ctx).validate().unwrap();
    let stray = ElementId::new();
    results.insert_if_absent(
        &rule,
        stray,
        mval_engine::ValidationResult {
            uuid: stray,
            category: Category::REQUIRED,
            value: true,
        },
    );
    assert_eq!(ctx.results().result_count(), 2);
}

#[test]
fn model_rules_returns_full_registry() {
    let ctx = ValidationContext::new();
    involved_actors_rule(&ctx);
    let calls = Arc::new(AtomicUsize::new(0));
    counting_rule(&ctx, Category::SUGGESTED, "LogicalFunction", "Rule-101", &calls);
    let graph = Graph::default();
    assert_eq!(graph.validation(&ctx).rules().len(), 2);
}

// ---------------------------------------------------------------------------
// Rule filtering
// ---------------------------------------------------------------------------

#[test]
fn unknown_rule_id_fails_before_evaluating() {
    let ctx = ValidationContext::new();
    let calls = Arc::new(AtomicUsize::new(0));
    counting_rule(&ctx, Category::REQUIRED, "Capability", "Rule-002", &calls);
    let (graph, c1, _) = capability_graph();

    let err = graph.validation(&ctx).validate_rule("Rule-999").unwrap_err();
    assert!(matches!(err, ValidationError::RuleNotFound { ref id } if id == "Rule-999"));

    let node = graph.by_uuid(&c1).unwrap();
    let err = ctx.element(&graph, node).validate_rule("Rule-999").unwrap_err();
    assert!(matches!(err, ValidationError::RuleNotFound { .. }));

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(ctx.results().result_count(), 0);
}

#[test]
fn filter_evaluates_only_matching_rules() {
    let ctx = ValidationContext::new();
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    counting_rule(&ctx, Category::REQUIRED, "Capability", "A", &first);
    let b = counting_rule(&ctx, Category::REQUIRED, "Capability", "B", &second);
    let (graph, _, _) = capability_graph();

    let results = graph.validation(&ctx).validate_rule(&b).unwrap();
    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 2);
    assert!(results.get_by_id("A").is_err());
    assert_eq!(results.get_by_id("B").unwrap().len(), 2);
}

#[test]
fn registered_but_inapplicable_id_is_a_no_op_for_elements() {
    let ctx = ValidationContext::new();
    let calls = Arc::new(AtomicUsize::new(0));
    counting_rule(&ctx, Category::SUGGESTED, "LogicalFunction", "Rule-101", &calls);
    let (graph, c1, _) = capability_graph();

    let node = graph.by_uuid(&c1).unwrap();
    let results = ctx.element(&graph, node).validate_rule("Rule-101").unwrap();
    assert_eq!(results.result_count(), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn rules_sharing_an_id_share_a_bucket() {
    let ctx = ValidationContext::new();
    let on_a = ctx
        .register_rule(Category::REQUIRED, "A", RuleMeta::new("Shared", "first", "r", ["a"]))
        .with_validator(|_: &Node| Ok(true));
    let on_b = ctx
        .register_rule(Category::REQUIRED, "B", RuleMeta::new("Shared", "second", "r", ["a"]))
        .with_validator(|_: &Node| Ok(false));
    assert_eq!(on_a, on_b);

    let mut graph = Graph::default();
    let a = graph.add("A");
    let b = graph.add("B");

    let results = graph.validation(&ctx).validate_rule("Shared").unwrap();
    assert_eq!(results.len(), 1);
    let bucket = results.get_by_id("Shared").unwrap();
    assert!(bucket[&a].value);
    assert!(!bucket[&b].value);
    assert_eq!(results.get(&on_b).unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Element scope and type matching
// ---------------------------------------------------------------------------

#[test]
fn element_scope_only_touches_its_element() {
    let ctx = ValidationContext::new();
    involved_actors_rule(&ctx);
    let (graph, c1, c2) = capability_graph();

    graph.validation(&ctx).validate().unwrap();
    let scope = graph.element_validation(&ctx, &c2).unwrap();
    let results = scope.results();
    assert_eq!(results.result_count(), 1);
    assert!(results.get_by_id("Rule-002").unwrap().contains_key(&c2));
    assert!(!results.get_by_id("Rule-002").unwrap().contains_key(&c1));
}

#[test]
fn element_validate_writes_one_result() {
    let ctx = ValidationContext::new();
    involved_actors_rule(&ctx);
    let (graph, c1, _) = capability_graph();

    let results = graph.element_validation(&ctx, &c1).unwrap().validate().unwrap();
    assert_eq!(results.result_count(), 1);
    assert_eq!(ctx.results().result_count(), 1);
}

#[test]
fn element_validation_of_unknown_uuid_is_none() {
    let ctx: ValidationContext<Node> = ValidationContext::new();
    let graph = Graph::default();
    assert!(graph.element_validation(&ctx, &ElementId::new()).is_none());
}

#[test]
fn element_rules_keep_every_category() {
    let ctx = ValidationContext::new();
    involved_actors_rule(&ctx);
    let (graph, c1, _) = capability_graph();
    let rules = graph.element_validation(&ctx, &c1).unwrap().rules();
    assert_eq!(rules.categories().count(), 3);
    assert_eq!(rules.len(), 1);
    assert!(rules.types(Category::SUGGESTED).is_empty());
}

#[test]
fn ancestor_rules_skip_elements_by_default() {
    let ctx = ValidationContext::new();
    let calls = Arc::new(AtomicUsize::new(0));
    counting_rule(&ctx, Category::REQUIRED, "Component", "Rule-010", &calls);
    let mut graph = Graph::default().extends("LogicalComponent", "Component");
    let lc = graph.add("LogicalComponent");

    graph.validation(&ctx).validate().unwrap();
    graph.element_validation(&ctx, &lc).unwrap().validate().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn subtype_model_matching_is_asymmetric_with_exact_elements() {
    let config = EngineConfig {
        model_type_match: TypeMatch::Subtype,
        element_type_match: TypeMatch::Exact,
    };
    let mut graph = Graph::default().extends("LogicalComponent", "Component");
    let lc = graph.add("LogicalComponent");

    let element_ctx = ValidationContext::with_config(config);
    let calls = Arc::new(AtomicUsize::new(0));
    counting_rule(&element_ctx, Category::REQUIRED, "Component", "Rule-010", &calls);
    let element_results = graph.element_validation(&element_ctx, &lc).unwrap().validate().unwrap();
    assert_eq!(element_results.result_count(), 0);
    assert!(graph.element_validation(&element_ctx, &lc).unwrap().rules().is_empty());

    let model_ctx = ValidationContext::with_config(config);
    counting_rule(&model_ctx, Category::REQUIRED, "Component", "Rule-010", &calls);
    let model_results = graph.validation(&model_ctx).validate().unwrap();
    assert!(model_results.get_by_id("Rule-010").unwrap().contains_key(&lc));
}

#[test]
fn subtype_element_matching_reaches_ancestor_rules() {
    let config = EngineConfig {
        model_type_match: TypeMatch::Subtype,
        element_type_match: TypeMatch::Subtype,
    };
    let ctx = ValidationContext::with_config(config);
    let calls = Arc::new(AtomicUsize::new(0));
    counting_rule(&ctx, Category::REQUIRED, "Component", "Rule-010", &calls);
    let mut graph = Graph::default().extends("LogicalComponent", "Component");
    let lc = graph.add("LogicalComponent");

    let results = graph.element_validation(&ctx, &lc).unwrap().validate().unwrap();
    assert_eq!(results.result_count(), 1);
}

// ---------------------------------------------------------------------------
// Failures, concurrency, persistence
// ---------------------------------------------------------------------------

#[test]
fn validator_error_aborts_but_keeps_earlier_results() {
    let ctx = ValidationContext::new();
    ctx.register_rule(Category::REQUIRED, "Capability", RuleMeta::new("Ok", "ok", "r", ["a"]))
        .with_validator(|_: &Node| Ok(true));
    ctx.register_rule(Category::REQUIRED, "Capability", RuleMeta::new("Boom", "boom", "r", ["a"]))
        .with_validator(|_: &Node| Err("attribute missing".into()));
    let mut graph = Graph::default();
    let c = graph.add("Capability");

    let err = graph.validation(&ctx).validate().unwrap_err();
    match err {
        ValidationError::Validator { rule_id, element, .. } => {
            assert_eq!(rule_id, "Boom");
            assert_eq!(element, c);
        }
        other => panic!("unexpected error: {other}"),
    }
    let stored = ctx.results().snapshot();
    assert!(stored.get_by_id("Ok").unwrap().contains_key(&c));
    assert!(stored.get_by_id("Boom").is_err());
}

#[test]
fn concurrent_passes_store_each_result_once() {
    let ctx = Arc::new(ValidationContext::new());
    involved_actors_rule(&ctx);
    let mut graph = Graph::default();
    for _ in 0..16 {
        graph.add("Capability");
    }
    let graph = Arc::new(graph);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let (ctx, graph) = (Arc::clone(&ctx), Arc::clone(&graph));
            std::thread::spawn(move || graph.validation(&ctx).validate().map(|r| r.result_count()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 16);
    }
    assert_eq!(ctx.results().result_count(), 16);
}

#[test]
fn restored_results_are_kept_on_revalidation() {
    let (mut graph, c1, _) = capability_graph();

    let first = ValidationContext::new();
    involved_actors_rule(&first);
    graph.validation(&first).validate().unwrap();
    let saved = serde_json::to_value(first.results().to_snapshot()).unwrap();

    graph.node_mut(c1).actors.push("Pilot".into());
    let second = ValidationContext::new();
    involved_actors_rule(&second);
    assert_eq!(second.restore_results(&saved).unwrap(), 2);

    let results = graph.validation(&second).validate().unwrap();
    assert!(!results.get_by_id("Rule-002").unwrap()[&c1].value);
}

#[test]
fn restore_rejects_non_mapping_bucket() {
    let ctx = ValidationContext::new();
    involved_actors_rule(&ctx);
    let err = ctx
        .restore_results(&serde_json::json!({ "Rule-002": [1, 2, 3] }))
        .unwrap_err();
    assert!(matches!(err, ValidationError::MalformedBucket { .. }));
    assert_eq!(ctx.results().result_count(), 0);
}
