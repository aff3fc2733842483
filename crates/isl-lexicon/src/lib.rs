//! Lexical tables for ISL gloss output.
//!
//! Three read-only tables drive the tail of the pipeline:
//! - [`Vocabulary`]: the sign assets that exist, one token per line in a
//!   UTF-8 file. Lookups ignore case and treat spaces as underscores, so
//!   `"Sign Language"`, `"sign language"` and `"sign_language"` are the same
//!   entry.
//! - [`SynonymMap`]: collapses vocabulary variants (`AUTOMOBILE` -> `CAR`).
//! - [`StopWords`]: grammatically empty words dropped before reordering.
//!
//! Each table is loaded once and never mutated afterwards; share a
//! [`Lexicon`] behind an `Arc` across concurrent requests.
//!
//! # Example
//! ```no_run
//! use isl_lexicon::{asset_filename, Vocabulary};
//!
//! # fn main() -> Result<(), isl_lexicon::LexiconError> {
//! let vocab = Vocabulary::load("words.txt")?;
//! let mapped = vocab.map_gloss("HELLO");
//! let files: Vec<String> = mapped.tokens.iter().map(|t| asset_filename(t)).collect();
//! println!("{files:?}");
//! # Ok(()) }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

mod tables;
mod vocabulary;

pub use tables::{DEFAULT_STOP_WORDS, DEFAULT_SYNONYMS, StopWords, SynonymMap};
pub use vocabulary::{ASSET_EXTENSION, Mapped, Vocabulary, asset_filename, normalize_key};

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("vocabulary not found at {}", .0.display())]
    VocabularyNotFound(PathBuf),
    #[error("table not found at {}", .0.display())]
    TableNotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The three tables a pipeline needs, loaded together.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    pub vocabulary: Vocabulary,
    pub synonyms: SynonymMap,
    pub stop_words: StopWords,
}

impl Lexicon {
    /// Vocabulary plus the built-in synonym and stop-word tables.
    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            synonyms: SynonymMap::default(),
            stop_words: StopWords::default(),
        }
    }

    /// Load the vocabulary and, when given, replacement synonym and stop-word tables.
    pub fn load(
        vocabulary: impl AsRef<Path>,
        synonyms: Option<&Path>,
        stop_words: Option<&Path>,
    ) -> Result<Self, LexiconError> {
        let vocabulary = Vocabulary::load(vocabulary)?;
        let synonyms = match synonyms {
            Some(path) => SynonymMap::load(path)?,
            None => SynonymMap::default(),
        };
        let stop_words = match stop_words {
            Some(path) => StopWords::load(path)?,
            None => StopWords::default(),
        };
        info!(
            "lexicon ready: {} vocabulary entries, {} synonyms, {} stop words",
            vocabulary.len(),
            synonyms.len(),
            stop_words.len()
        );
        Ok(Self {
            vocabulary,
            synonyms,
            stop_words,
        })
    }
}

/// Non-empty trimmed lines of a UTF-8 file. `missing` builds the error for an absent file.
pub(crate) fn read_lines(
    path: &Path,
    missing: fn(PathBuf) -> LexiconError,
) -> Result<Vec<String>, LexiconError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => missing(path.to_path_buf()),
        _ => LexiconError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_all_tables_from_files() {
        let mut vocab = NamedTempFile::new().unwrap();
        writeln!(vocab, "car\nhome").unwrap();
        let mut synonyms = NamedTempFile::new().unwrap();
        writeln!(synonyms, "motorcar car").unwrap();
        let mut stops = NamedTempFile::new().unwrap();
        writeln!(stops, "the").unwrap();

        let lexicon =
            Lexicon::load(vocab.path(), Some(synonyms.path()), Some(stops.path())).unwrap();
        assert!(lexicon.vocabulary.contains("CAR"));
        assert_eq!(lexicon.synonyms.resolve("MOTORCAR"), "CAR");
        assert_eq!(lexicon.synonyms.resolve("AUTOMOBILE"), "AUTOMOBILE");
        assert!(lexicon.stop_words.contains("The"));
        assert!(!lexicon.stop_words.contains("is"));
    }

    #[test]
    fn missing_vocabulary_is_reported_as_such() {
        let dir = tempfile::tempdir().unwrap();
        let err = Lexicon::load(dir.path().join("words.txt"), None, None).unwrap_err();
        assert!(matches!(err, LexiconError::VocabularyNotFound(_)));
    }

    #[test]
    fn missing_optional_table_is_a_table_error() {
        let mut vocab = NamedTempFile::new().unwrap();
        writeln!(vocab, "car").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("synonyms.txt");
        let err = Lexicon::load(vocab.path(), Some(&missing), None).unwrap_err();
        assert!(matches!(err, LexiconError::TableNotFound(_)));
    }
}
