//! Configuration of the built-in rules.
//!
//! Read from the `rules` section of the YAML configuration file. The
//! `MVAL_LEXICON` environment variable, when set and non-empty, replaces
//! `lexicon_path`.

use std::ffi::OsString;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::RulesResult;

/// Environment variable overriding [`RulesConfig::lexicon_path`].
pub const LEXICON_ENV: &str = "MVAL_LEXICON";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Word list used by the naming rule, one verb per line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
}

impl RulesConfig {
    pub fn from_yaml_str(yaml: &str) -> RulesResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var_os(key))
    }

    /// Apply overrides read through `lookup`.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        if let Some(path) = lookup(LEXICON_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!(path = ?path, env = LEXICON_ENV, "lexicon path taken from the environment");
            self.lexicon_path = Some(PathBuf::from(path));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_lexicon() {
        assert_eq!(RulesConfig::from_yaml_str("").unwrap().lexicon_path, None);
    }

    #[test]
    fn parses_lexicon_path() {
        let config = RulesConfig::from_yaml_str("lexicon_path: /usr/share/mval/verbs.txt\n").unwrap();
        assert_eq!(
            config.lexicon_path,
            Some(PathBuf::from("/usr/share/mval/verbs.txt"))
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(RulesConfig::from_yaml_str("lexicon: x\n").is_err());
    }

    #[test]
    fn environment_overrides_file() {
        let config = RulesConfig {
            lexicon_path: Some(PathBuf::from("from-file.txt")),
        }
        .with_overrides_from(|key| (key == LEXICON_ENV).then(|| OsString::from("from-env.txt")));
        assert_eq!(config.lexicon_path, Some(PathBuf::from("from-env.txt")));
    }

    #[test]
    fn empty_environment_value_is_ignored() {
        let config = RulesConfig {
            lexicon_path: Some(PathBuf::from("from-file.txt")),
        }
        .with_overrides_from(|_| Some(OsString::new()));
        assert_eq!(config.lexicon_path, Some(PathBuf::from("from-file.txt")));
    }
}
