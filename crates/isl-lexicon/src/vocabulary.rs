use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::{LexiconError, read_lines};

pub const ASSET_EXTENSION: &str = "sigml";

/// Known sign tokens, stored as normalized keys.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    words: HashSet<String>,
}

/// Final tokens produced for one gloss.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Mapped {
    pub tokens: Vec<String>,
    /// The gloss missed the vocabulary and was spelled out letter by letter.
    pub spelled: bool,
}

impl Vocabulary {
    /// Load one token per non-empty line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let lines = read_lines(path, LexiconError::VocabularyNotFound)?;
        let vocab = Self::from_words(lines);
        info!(
            "loaded {} vocabulary entries from {}",
            vocab.len(),
            path.display()
        );
        Ok(vocab)
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| normalize_key(w.as_ref()))
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Case-insensitive, whitespace-normalized membership.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(&normalize_key(token))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Map one normalized gloss to final tokens.
    ///
    /// A hit yields the vocabulary key itself. A miss spells the gloss out,
    /// one lower-case letter per token, skipping underscores.
    pub fn map_gloss(&self, gloss: &str) -> Mapped {
        let key = normalize_key(gloss);
        if key.is_empty() {
            return Mapped::default();
        }
        if self.words.contains(&key) {
            return Mapped {
                tokens: vec![key],
                spelled: false,
            };
        }
        Mapped {
            tokens: key
                .chars()
                .filter(|&c| c != '_')
                .map(|c| c.to_string())
                .collect(),
            spelled: true,
        }
    }
}

/// Lower-case, trim, and replace spaces with underscores.
pub fn normalize_key(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "_")
}

/// Asset file for a final token: whole words keep their case, letters are upper-cased.
pub fn asset_filename(token: &str) -> String {
    if token.chars().count() > 1 {
        format!("{token}.{ASSET_EXTENSION}")
    } else {
        format!("{}.{ASSET_EXTENSION}", token.to_uppercase())
    }
}
