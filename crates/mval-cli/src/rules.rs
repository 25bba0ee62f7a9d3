//! # Rules Subcommand
//!
//! Lists the registered rules with their category, target type and
//! documentation. Useful to check which variant of an optional rule was
//! registered with the current configuration.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use mval_core::{Category, TypeName};

use crate::config::CliConfig;
use crate::output::{emit, OutputFormat};

/// Arguments for the `mval rules` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RulesArgs {
    /// Listing format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the listing here instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// One registered rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleListing {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub type_name: TypeName,
    pub rationale: String,
    pub actions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperlink_further_reading: Option<String>,
}

/// Every registered rule in registry order.
pub fn list_rules(config: &CliConfig) -> Vec<RuleListing> {
    let ctx = config.build_context();
    ctx.with_registry(|registry| {
        registry
            .iter()
            .map(|(category, type_name, rule)| {
                let meta = rule.meta();
                RuleListing {
                    id: meta.id.clone(),
                    name: meta.name.clone(),
                    category,
                    type_name: type_name.clone(),
                    rationale: meta.rationale.clone(),
                    actions: meta.actions.clone(),
                    hyperlink_further_reading: meta.hyperlink_further_reading.clone(),
                }
            })
            .collect()
    })
}

fn render_text(rules: &[RuleListing]) -> String {
    let mut out = String::new();
    for rule in rules {
        let _ = writeln!(
            out,
            "[{}] {} on {}: {}",
            rule.category, rule.id, rule.type_name, rule.name
        );
        for action in &rule.actions {
            let _ = writeln!(out, "    action: {action}");
        }
    }
    out
}

/// Execute the rules subcommand.
pub fn run_rules(args: &RulesArgs, config: &CliConfig) -> Result<u8> {
    let rules = list_rules(config);
    let rendered = args.format.render(&rules, |rules: &Vec<_>| render_text(rules))?;
    emit(args.output.as_deref(), &rendered)?;
    Ok(0)
}
