//! Shared value types for turning tagged English into Indian Sign Language
//! gloss sequences.
//!
//! The types here are produced by external collaborators (a tagger and a
//! constituency parser) and consumed by the reordering crates. They carry no
//! behaviour beyond cheap classification helpers, so every crate in the
//! workspace can depend on them without pulling in tables or I/O.
//!
//! Use [`AnnotatedToken`] for one tagged word, [`ParseTree`] for a sentence's
//! constituency structure, and [`OutputRecord`] for the flattened result of a
//! whole request.
//!
//! ```rust
//! use isl_types::{AnnotatedToken, UPos};
//!
//! let not = AnnotatedToken::new("not", "not", UPos::Part).with_dep("neg");
//! assert!(not.is_negation());
//! assert_eq!(UPos::from_tag("PRON"), Some(UPos::Pron));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod tree;

pub use tree::{NodeId, ParseTree, TreeError};

/// Fine-grained Penn tags that mark wh-words (`what`, `which`, `whose`, `where`).
pub const WH_TAGS: [&str; 4] = ["WDT", "WP", "WP$", "WRB"];

/// Dependency label used by taggers for negation (`not`, `never`, `n't`).
pub const NEGATION_DEP: &str = "neg";

/// Universal part-of-speech tag as emitted by the tagger.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UPos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl UPos {
    /// Parse a Universal POS tag (`NOUN`, `verb`, ...). Case-insensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let upos = match tag.trim().to_ascii_uppercase().as_str() {
            "ADJ" => UPos::Adj,
            "ADP" => UPos::Adp,
            "ADV" => UPos::Adv,
            "AUX" => UPos::Aux,
            "CCONJ" => UPos::Cconj,
            "DET" => UPos::Det,
            "INTJ" => UPos::Intj,
            "NOUN" => UPos::Noun,
            "NUM" => UPos::Num,
            "PART" => UPos::Part,
            "PRON" => UPos::Pron,
            "PROPN" => UPos::Propn,
            "PUNCT" => UPos::Punct,
            "SCONJ" => UPos::Sconj,
            "SYM" => UPos::Sym,
            "VERB" => UPos::Verb,
            "X" => UPos::X,
            _ => return None,
        };
        Some(upos)
    }

    /// The upper-case tag string.
    pub fn as_str(self) -> &'static str {
        match self {
            UPos::Adj => "ADJ",
            UPos::Adp => "ADP",
            UPos::Adv => "ADV",
            UPos::Aux => "AUX",
            UPos::Cconj => "CCONJ",
            UPos::Det => "DET",
            UPos::Intj => "INTJ",
            UPos::Noun => "NOUN",
            UPos::Num => "NUM",
            UPos::Part => "PART",
            UPos::Pron => "PRON",
            UPos::Propn => "PROPN",
            UPos::Punct => "PUNCT",
            UPos::Sconj => "SCONJ",
            UPos::Sym => "SYM",
            UPos::Verb => "VERB",
            UPos::X => "X",
        }
    }
}

impl fmt::Display for UPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tagged word of a sentence. Identity is its position in the sentence.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    pub text: String,
    pub lemma: String,
    pub pos: UPos,
    #[serde(default)]
    pub dep: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub entity: String,
}

impl AnnotatedToken {
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, pos: UPos) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos,
            dep: String::new(),
            tag: String::new(),
            entity: String::new(),
        }
    }

    pub fn with_dep(mut self, dep: impl Into<String>) -> Self {
        self.dep = dep.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = entity.into();
        self
    }

    /// True when the fine-grained tag marks a question word.
    pub fn is_wh_word(&self) -> bool {
        WH_TAGS.contains(&self.tag.as_str())
    }

    pub fn is_negation(&self) -> bool {
        self.dep == NEGATION_DEP
    }

    pub fn is_punctuation(&self) -> bool {
        self.pos == UPos::Punct
    }

    /// True for a lone character, i.e. a word that is already spelled out.
    pub fn is_single_char(&self) -> bool {
        is_single_char(&self.text)
    }
}

pub fn is_single_char(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some() && chars.next().is_none()
}

/// Diagnostics for one sentence.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SentenceMeta {
    /// The tree-based reorder ran to completion for this sentence.
    pub parser_used: bool,
    pub parser_error: Option<String>,
}

/// Result of glossing a single sentence.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SentenceGloss {
    /// Normalized glosses in ISL order, before vocabulary mapping.
    pub glosses: Vec<String>,
    /// Final tokens after vocabulary lookup and letter fallback.
    pub tokens: Vec<String>,
    pub filenames: Vec<String>,
    /// Glosses that missed the vocabulary and were spelled out.
    pub spelled: Vec<String>,
    pub meta: SentenceMeta,
}

/// Request-level diagnostics.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// The tree-based reorder succeeded for at least one sentence.
    pub parser_used: bool,
    /// Last parser error seen across the request.
    pub parser_error: Option<String>,
    pub sentence_count: usize,
}

/// Flattened output for one input text. Built once, never mutated.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub tokens: Vec<String>,
    pub filenames: Vec<String>,
    pub spelled: Vec<String>,
    pub meta: Meta,
}

impl OutputRecord {
    /// Flatten per-sentence results, keeping sentence order.
    pub fn from_sentences(sentences: Vec<SentenceGloss>) -> Self {
        let mut record = OutputRecord {
            meta: Meta {
                sentence_count: sentences.len(),
                ..Meta::default()
            },
            ..OutputRecord::default()
        };
        for sentence in sentences {
            record.tokens.extend(sentence.tokens);
            record.filenames.extend(sentence.filenames);
            record.spelled.extend(sentence.spelled);
            record.meta.parser_used |= sentence.meta.parser_used;
            if sentence.meta.parser_error.is_some() {
                record.meta.parser_error = sentence.meta.parser_error;
            }
        }
        record
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
