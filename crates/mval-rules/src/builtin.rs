//! # Built-in Rules
//!
//! | Id | Category | Type | Check |
//! |----|----------|------|-------|
//! | `Rule-001` | required | `LogicalComponent` | description is not empty |
//! | `Rule-002` | required | `Capability` | `involved_actors` references at least one element |
//! | `Rule-101` | suggested | `LogicalFunction` | name starts with a verb from the lexicon |
//!
//! `Rule-101` needs the verb lexicon. Without it the rule is still
//! registered, but as a stub that fails every function and tells the
//! operator how to provide the lexicon.

use mval_core::Category;
use mval_engine::{Rule, RuleMeta, ValidationContext, ValidatorResult};
use mval_graph::Element;

use crate::config::RulesConfig;
use crate::lexicon::{detect_lexicon, Lexicon};

pub const NO_EMPTY_DESCRIPTION: &str = "Rule-001";
pub const CAPABILITY_INVOLVES_ACTOR: &str = "Rule-002";
pub const FUNCTION_NAME_STARTS_WITH_VERB: &str = "Rule-101";

/// Reference list checked by `Rule-002`.
pub const INVOLVED_ACTORS: &str = "involved_actors";

/// Register every built-in rule into `ctx` and return them in
/// registration order.
pub fn register_builtin_rules(ctx: &ValidationContext<Element>, config: &RulesConfig) -> Vec<Rule<Element>> {
    let rules = vec![
        register_no_empty_description(ctx),
        register_capability_involves_actor(ctx),
        register_function_name_starts_with_verb(ctx, config),
    ];
    tracing::info!(count = rules.len(), "registered built-in rules");
    rules
}

pub fn register_no_empty_description(ctx: &ValidationContext<Element>) -> Rule<Element> {
    ctx.register_rule(
        Category::REQUIRED,
        "LogicalComponent",
        RuleMeta::new(
            NO_EMPTY_DESCRIPTION,
            "No empty description",
            "A LogicalComponent should have a non empty description.",
            ["Fill the description text field."],
        ),
    )
    .with_validator(|e: &Element| Ok(!e.description.is_empty()))
}

pub fn register_capability_involves_actor(ctx: &ValidationContext<Element>) -> Rule<Element> {
    ctx.register_rule(
        Category::REQUIRED,
        "Capability",
        RuleMeta::new(
            CAPABILITY_INVOLVES_ACTOR,
            "Capability involves an actor",
            "A capability that no actor takes part in describes behavior nobody performs.",
            ["Involve at least one actor in the capability."],
        ),
    )
    .with_validator(|e: &Element| Ok(!e.reference_ids(INVOLVED_ACTORS).is_empty()))
}

pub fn register_function_name_starts_with_verb(
    ctx: &ValidationContext<Element>,
    config: &RulesConfig,
) -> Rule<Element> {
    ctx.register_rule(
        Category::SUGGESTED,
        "LogicalFunction",
        RuleMeta::new(
            FUNCTION_NAME_STARTS_WITH_VERB,
            "Function name starts with a verb",
            "Functions describe behavior; a leading verb states what the function does.",
            ["Rename the function so that its name starts with a verb."],
        ),
    )
    .with_optional_validator(detect_lexicon(config), |lexicon: Lexicon| {
        move |e: &Element| -> ValidatorResult { Ok(starts_with_verb(&lexicon, &e.name)) }
    })
}

fn starts_with_verb(lexicon: &Lexicon, name: &str) -> bool {
    name.split_whitespace()
        .next()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .is_some_and(|word| lexicon.contains(word))
}
