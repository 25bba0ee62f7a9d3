//! Verb lexicon backing the naming rule.
//!
//! A plain text file, one word per line. Blank lines and lines starting
//! with `#` are ignored; matching is case-insensitive.

use std::collections::HashSet;
use std::path::Path;

use mval_engine::OptionalDependency;

use crate::config::RulesConfig;
use crate::error::{RulesError, RulesResult};

/// Name under which the lexicon appears in remediation actions.
pub const LEXICON_DEPENDENCY: &str = "verb-lexicon";

const INSTALL_HINT: &str =
    "set `rules.lexicon_path` in the configuration or MVAL_LEXICON to a file with one verb per line";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: HashSet<String>,
}

impl Lexicon {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn parse(text: &str) -> Self {
        Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    /// Read a lexicon file. A file without words is an error.
    pub fn from_path(path: &Path) -> RulesResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| RulesError::LexiconIo {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::parse(&text);
        if lexicon.is_empty() {
            return Err(RulesError::EmptyLexicon(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), words = lexicon.len(), "loaded lexicon");
        Ok(lexicon)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Probe for the lexicon named by `config`.
pub fn detect_lexicon(config: &RulesConfig) -> OptionalDependency<Lexicon> {
    match &config.lexicon_path {
        Some(path) => {
            OptionalDependency::detect(LEXICON_DEPENDENCY, INSTALL_HINT, || Lexicon::from_path(path))
        }
        None => OptionalDependency::missing(LEXICON_DEPENDENCY, INSTALL_HINT),
    }
}
