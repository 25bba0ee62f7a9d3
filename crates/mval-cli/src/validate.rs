//! # Validate Subcommand
//!
//! Loads a model, registers the built-in rules and runs one validation
//! pass, either over the whole model or over a single element.
//!
//! ## Resuming
//!
//! `--resume` merges a results snapshot saved by an earlier run with
//! `--save-results` before the pass starts. Stored results are write-once,
//! so every (rule, element) pair present in the snapshot keeps its saved
//! outcome.
//!
//! ## Exit Codes
//!
//! 0 when no REQUIRED result failed, 1 when one did, 2 on operational
//! error (reported by the binary).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use mval_core::{ElementId, ModelGraph};
use mval_engine::{Results, Validate, ValidationContext, ValidationReport};
use mval_graph::{Element, Model};

use crate::config::CliConfig;
use crate::output::{emit, OutputFormat};

/// Arguments for the `mval validate` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Model document to validate (.yaml, .yml or .json).
    #[arg(long, value_name = "PATH")]
    pub model: PathBuf,

    /// Only evaluate rules with this id.
    #[arg(long, value_name = "ID")]
    pub rule: Option<String>,

    /// Only validate the element with this uuid.
    #[arg(long, value_name = "UUID")]
    pub element: Option<ElementId>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report here instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Merge a saved results snapshot before validating.
    #[arg(long, value_name = "PATH")]
    pub resume: Option<PathBuf>,

    /// Save the results snapshot after validating.
    #[arg(long, value_name = "PATH")]
    pub save_results: Option<PathBuf>,
}

/// Execute the validate subcommand and return the process exit code.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let model = Model::from_path(&args.model)
        .with_context(|| format!("failed to load model {}", args.model.display()))?;
    let ctx = config.build_context();
    tracing::info!(
        elements = model.len(),
        rules = ctx.with_registry(|r| r.len()),
        "loaded model"
    );

    if let Some(path) = &args.resume {
        resume(&ctx, path)?;
    }

    let results = run_pass(&ctx, &model, args).context("validation failed")?;

    if let Some(path) = &args.save_results {
        save(&ctx, path)?;
    }

    let report = if args.rule.is_none() && args.element.is_none() {
        ctx.with_registry(|registry| ValidationReport::with_registry(&results, registry))
    } else {
        ValidationReport::from_results(&results)
    };
    let rendered = args.format.render(&report, ValidationReport::render_text)?;
    emit(args.output.as_deref(), &rendered)?;

    Ok(if report.has_required_failures() { 1 } else { 0 })
}

fn run_pass(
    ctx: &ValidationContext<Element>,
    model: &Model,
    args: &ValidateArgs,
) -> Result<Results<Element>> {
    let rule = args.rule.as_deref();
    let results = match &args.element {
        Some(uuid) => {
            let element = model
                .by_uuid(uuid)
                .with_context(|| format!("element {uuid} is not in the model"))?;
            let scope = ctx.element(model, element);
            match rule {
                Some(id) => scope.validate_rule(id)?,
                None => scope.validate()?,
            }
        }
        None => {
            let scope = model.validation(ctx);
            match rule {
                Some(id) => scope.validate_rule(id)?,
                None => scope.validate()?,
            }
        }
    };
    Ok(results)
}

fn resume(ctx: &ValidationContext<Element>, path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read results {}", path.display()))?;
    let snapshot: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse results {}", path.display()))?;
    let restored = ctx
        .restore_results(&snapshot)
        .with_context(|| format!("failed to restore results from {}", path.display()))?;
    tracing::info!(restored, path = %path.display(), "resumed from saved results");
    Ok(())
}

fn save(ctx: &ValidationContext<Element>, path: &Path) -> Result<()> {
    let snapshot = serde_json::to_string_pretty(&ctx.results().to_snapshot())
        .context("failed to encode results")?;
    std::fs::write(path, snapshot)
        .with_context(|| format!("failed to write results {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved results");
    Ok(())
}
