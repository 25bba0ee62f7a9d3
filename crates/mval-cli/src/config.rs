//! # Configuration File
//!
//! One YAML document with two optional sections:
//!
//! ```yaml
//! engine:
//!   model_type_match: subtype
//!   element_type_match: exact
//! rules:
//!   lexicon_path: /usr/share/mval/verbs.txt
//! ```
//!
//! Missing sections and keys take their defaults. Unknown keys are
//! rejected. `MVAL_LEXICON` overrides `rules.lexicon_path`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mval_engine::{EngineConfig, ValidationContext};
use mval_graph::Element;
use mval_rules::{register_builtin_rules, RulesConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub engine: EngineConfig,
    pub rules: RulesConfig,
}

impl CliConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("invalid configuration")
    }

    /// Read `path` if given, otherwise start from defaults; then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Self::from_yaml_str(&text)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => Self::default(),
        };
        Ok(Self {
            rules: config.rules.with_env_overrides(),
            ..config
        })
    }

    /// A validation context with the built-in rules registered.
    pub fn build_context(&self) -> ValidationContext<Element> {
        let ctx = ValidationContext::with_config(self.engine);
        register_builtin_rules(&ctx, &self.rules);
        ctx
    }
}
