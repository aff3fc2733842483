use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{info, warn};

use crate::{LexiconError, read_lines};

/// Auxiliaries and modals that carry no sign of their own.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "am", "are", "is", "was", "were", "be", "being", "been", "have", "has", "had", "do", "does",
    "did", "could", "should", "would", "can", "shall", "will", "may", "might", "must", "let",
];

/// Variants collapsed onto glosses that commonly have a sign asset.
pub const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("AUTOMOBILE", "CAR"),
    ("VEHICLE", "CAR"),
    ("RESIDENCE", "HOME"),
    ("HOUSE", "HOME"),
    ("PURCHASE", "BUY"),
    ("OBTAIN", "GET"),
    ("GREETINGS", "HELLO"),
];

/// Exact-match gloss substitution, keyed by upper-case gloss.
#[derive(Clone, Debug)]
pub struct SynonymMap {
    map: HashMap<String, String>,
}

impl Default for SynonymMap {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_SYNONYMS.iter().copied())
    }
}

impl SynonymMap {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self {
            map: pairs
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_uppercase(), v.as_ref().to_uppercase()))
                .collect(),
        }
    }

    /// Load `FROM TO` pairs, one per line. Lines starting with `#` are ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let mut pairs = Vec::new();
        for (lineno, line) in read_lines(path, LexiconError::TableNotFound)?
            .into_iter()
            .enumerate()
        {
            if line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(from), Some(to)) => pairs.push((from.to_string(), to.to_string())),
                _ => warn!(
                    "skipping synonym line {} in {}: expected `FROM TO`",
                    lineno + 1,
                    path.display()
                ),
            }
        }
        let synonyms = Self::from_pairs(pairs);
        info!("loaded {} synonyms from {}", synonyms.len(), path.display());
        Ok(synonyms)
    }

    /// Canonical gloss for `gloss`, or `gloss` itself when there is no entry.
    pub fn resolve<'a>(&'a self, gloss: &'a str) -> &'a str {
        self.map.get(gloss).map(String::as_str).unwrap_or(gloss)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Lower-cased stop-word set.
#[derive(Clone, Debug)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::from_words(DEFAULT_STOP_WORDS.iter().copied())
    }
}

impl StopWords {
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

    /// Load one word per line. Lines starting with `#` are ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let lines = read_lines(path, LexiconError::TableNotFound)?;
        let stop_words = Self::from_words(lines.iter().filter(|l| !l.starts_with('#')));
        info!(
            "loaded {} stop words from {}",
            stop_words.len(),
            path.display()
        );
        Ok(stop_words)
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_synonyms_collapse_variants() {
        let synonyms = SynonymMap::default();
        assert_eq!(synonyms.resolve("AUTOMOBILE"), "CAR");
        assert_eq!(synonyms.resolve("HOUSE"), "HOME");
        assert_eq!(synonyms.resolve("CAR"), "CAR");
        // Exact match only: callers upper-case first.
        assert_eq!(synonyms.resolve("automobile"), "automobile");
    }

    #[test]
    fn synonym_file_skips_comments_and_malformed_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# variants\nlorry truck\nbroken\nCab taxi").unwrap();
        let synonyms = SynonymMap::load(file.path()).unwrap();
        assert_eq!(synonyms.len(), 2);
        assert_eq!(synonyms.resolve("LORRY"), "TRUCK");
        assert_eq!(synonyms.resolve("CAB"), "TAXI");
    }

    #[test]
    fn stop_words_are_case_insensitive() {
        let stops = StopWords::default();
        assert!(stops.contains("Are"));
        assert!(stops.contains("do"));
        assert!(!stops.contains("not"));
        assert!(!stops.contains("you"));
    }

    #[test]
    fn stop_word_file_replaces_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# articles\nThe\na\n\nan").unwrap();
        let stops = StopWords::load(file.path()).unwrap();
        assert_eq!(stops.len(), 3);
        assert!(stops.contains("the"));
        assert!(!stops.contains("is"));
    }
}
