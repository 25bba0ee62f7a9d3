//! Error types for rule configuration and lexicon loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while preparing the built-in rules.
#[derive(Error, Debug)]
pub enum RulesError {
    /// The lexicon file could not be read.
    #[error("failed to read lexicon {}: {source}", path.display())]
    LexiconIo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The lexicon file holds no words.
    #[error("lexicon {} contains no words", .0.display())]
    EmptyLexicon(PathBuf),

    /// The rules configuration could not be parsed.
    #[error("invalid rules configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

/// Result type alias for rule preparation.
pub type RulesResult<T> = Result<T, RulesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_io_display_names_path() {
        let err = RulesError::LexiconIo {
            path: PathBuf::from("/etc/verbs.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = format!("{err}");
        assert!(msg.contains("/etc/verbs.txt"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn empty_lexicon_display() {
        let err = RulesError::EmptyLexicon(PathBuf::from("verbs.txt"));
        assert!(format!("{err}").contains("no words"));
    }
}
