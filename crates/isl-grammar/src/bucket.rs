//! Bucket reordering: a parse-free approximation of ISL clause order.
//!
//! Each surviving token lands in exactly one bucket, chosen by the first
//! matching rule:
//!
//! | Rule | Bucket |
//! |------|--------|
//! | dependency is `neg` | `Negation` (always glossed `NOT`) |
//! | fine tag is a wh-word | `Question` |
//! | dependency contains `subj` | `Subject` |
//! | dependency contains `obj` | `Object` |
//! | POS is `VERB` | `Verb` |
//! | POS is `ADJ` | `Adjective` |
//! | entity contains `time`, or POS is `ADV` | `Time` |
//! | anything else | `Object` |
//!
//! Buckets are then concatenated as time, subject, object, verb, negation,
//! question, with adjectives placed per [`AdjectivePlacement`].

use std::str::FromStr;

use isl_types::{AnnotatedToken, UPos};
use tracing::debug;

use crate::filter::FilteredSentence;
use crate::{Reorderer, Reordering, Slot};

pub const NEGATION_GLOSS: &str = "NOT";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Bucket {
    Time,
    Subject,
    Adjective,
    Object,
    Verb,
    Negation,
    Question,
}

/// Where the adjective bucket goes relative to the object bucket.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AdjectivePlacement {
    #[default]
    BeforeObject,
    AfterObject,
    /// Leave adjectives out of the gloss entirely.
    Omit,
}

impl FromStr for AdjectivePlacement {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "before-object" | "before" => Ok(AdjectivePlacement::BeforeObject),
            "after-object" | "after" => Ok(AdjectivePlacement::AfterObject),
            "omit" | "none" => Ok(AdjectivePlacement::Omit),
            other => Err(format!("unknown adjective placement: {other}")),
        }
    }
}

pub fn classify(token: &AnnotatedToken) -> Bucket {
    if token.is_negation() {
        Bucket::Negation
    } else if token.is_wh_word() {
        Bucket::Question
    } else if token.dep.contains("subj") {
        Bucket::Subject
    } else if token.dep.contains("obj") {
        Bucket::Object
    } else if token.pos == UPos::Verb {
        Bucket::Verb
    } else if token.pos == UPos::Adj {
        Bucket::Adjective
    } else if token.entity.to_ascii_lowercase().contains("time") || token.pos == UPos::Adv {
        Bucket::Time
    } else {
        Bucket::Object
    }
}

#[derive(Clone, Debug, Default)]
pub struct BucketReorderer {
    adjectives: AdjectivePlacement,
}

impl BucketReorderer {
    pub fn new(adjectives: AdjectivePlacement) -> Self {
        Self { adjectives }
    }

    pub fn adjectives(&self) -> AdjectivePlacement {
        self.adjectives
    }

    fn order(&self) -> &'static [Bucket] {
        use Bucket::*;
        match self.adjectives {
            AdjectivePlacement::BeforeObject => {
                &[Time, Subject, Adjective, Object, Verb, Negation, Question]
            }
            AdjectivePlacement::AfterObject => {
                &[Time, Subject, Object, Adjective, Verb, Negation, Question]
            }
            AdjectivePlacement::Omit => &[Time, Subject, Object, Verb, Negation, Question],
        }
    }
}

impl Reorderer for BucketReorderer {
    fn reorder(&self, sentence: &FilteredSentence<'_>) -> Reordering {
        let mut buckets: Vec<(Bucket, Slot)> = Vec::with_capacity(sentence.len());
        for (idx, token) in sentence.kept_tokens() {
            let bucket = classify(token);
            let slot = match bucket {
                Bucket::Negation => Slot::Fixed(NEGATION_GLOSS),
                _ => Slot::Token(idx),
            };
            buckets.push((bucket, slot));
        }

        let slots: Vec<Slot> = self
            .order()
            .iter()
            .flat_map(|wanted| {
                buckets
                    .iter()
                    .filter(move |(bucket, _)| bucket == wanted)
                    .map(|(_, slot)| *slot)
            })
            .collect();

        if slots.is_empty() {
            debug!("bucket reorder produced nothing; falling back to content words");
            return Reordering {
                slots: sentence.content.iter().map(|&idx| Slot::Token(idx)).collect(),
                ..Reordering::default()
            };
        }

        Reordering {
            slots,
            ..Reordering::default()
        }
    }
}
