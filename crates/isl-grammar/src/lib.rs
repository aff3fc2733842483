//! Grammar reordering from English word order to ISL gloss order.
//!
//! A sentence goes through four steps, each in its own module:
//! 1. [`filter`]: drop punctuation and stop words (keeping wh-words and
//!    negators) while remembering every survivor's original position.
//! 2. A [`Reorderer`]: either the [`ConstituentReorderer`], which fronts
//!    noun phrases and pronouns using a constituency parse, or the
//!    [`BucketReorderer`], which sorts tokens into fixed grammatical buckets.
//! 3. [`normalize`]: replace each token with its upper-cased lemma and apply
//!    the synonym table.
//! 4. Vocabulary lookup, which lives in `isl-lexicon`.
//!
//! Reorderers never move strings around. They return [`Slot`]s that point
//! back into the original token slice, so a token's lemma can never be
//! confused with a neighbour's after filtering.
//!
//! # Example
//! ```rust
//! use isl_grammar::{BucketReorderer, FilteredSentence, Reorderer, render};
//! use isl_lexicon::{StopWords, SynonymMap};
//! use isl_types::{AnnotatedToken, UPos};
//!
//! let tokens = vec![
//!     AnnotatedToken::new("Are", "be", UPos::Aux),
//!     AnnotatedToken::new("you", "you", UPos::Pron).with_dep("nsubj"),
//!     AnnotatedToken::new("ok", "ok", UPos::Adj),
//! ];
//! let sentence = FilteredSentence::new(&tokens, &StopWords::default());
//! let reordering = BucketReorderer::default().reorder(&sentence);
//! let glosses = render(&reordering.slots, &tokens, &SynonymMap::default());
//! assert_eq!(glosses, vec!["YOU", "OK"]);
//! ```

pub mod bucket;
pub mod constituent;
pub mod filter;
pub mod normalize;

pub use bucket::{AdjectivePlacement, Bucket, BucketReorderer, classify};
pub use constituent::{ConstituencyParser, ConstituentReorderer, reorder_tree};
pub use filter::{FilteredSentence, is_kept};
pub use normalize::{normalize_token, render};

/// Position of one output gloss.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Slot {
    /// Index into the sentence's full (unfiltered) token slice.
    Token(usize),
    /// A gloss forced by a rule, e.g. `NOT` for any negator.
    Fixed(&'static str),
}

/// Output of a reorderer for one sentence.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Reordering {
    pub slots: Vec<Slot>,
    /// The tree-based reorder ran to completion.
    pub parser_used: bool,
    pub parser_error: Option<String>,
}

impl Reordering {
    /// Filtered order, untouched.
    pub fn unchanged(sentence: &FilteredSentence<'_>) -> Self {
        Self {
            slots: sentence.in_order(),
            parser_used: false,
            parser_error: None,
        }
    }
}

pub trait Reorderer: Send + Sync {
    fn reorder(&self, sentence: &FilteredSentence<'_>) -> Reordering;
}

/// The reordering heuristics a pipeline can be configured with.
pub enum Strategy {
    Constituent(ConstituentReorderer),
    Bucket(BucketReorderer),
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Constituent(_) => "constituent",
            Strategy::Bucket(_) => "bucket",
        }
    }
}

impl Reorderer for Strategy {
    fn reorder(&self, sentence: &FilteredSentence<'_>) -> Reordering {
        match self {
            Strategy::Constituent(r) => r.reorder(sentence),
            Strategy::Bucket(r) => r.reorder(sentence),
        }
    }
}
