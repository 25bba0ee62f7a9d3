//! Output formats and destinations shared by the subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Serialize `value` as JSON or YAML, or defer to `text` for text.
    pub fn render<T: Serialize>(self, value: &T, text: impl FnOnce(&T) -> String) -> Result<String> {
        match self {
            Self::Text => Ok(text(value)),
            Self::Json => {
                let mut out = serde_json::to_string_pretty(value).context("failed to encode JSON")?;
                out.push('\n');
                Ok(out)
            }
            Self::Yaml => serde_yaml::to_string(value).context("failed to encode YAML"),
        }
    }
}

/// Write `content` to `path`, or to stdout when no path is given.
pub fn emit(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => print!("{content}"),
    }
    Ok(())
}
