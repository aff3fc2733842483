//! Lemma upper-casing and synonym substitution.

use isl_lexicon::SynonymMap;
use isl_types::AnnotatedToken;

use crate::Slot;
use crate::bucket::NEGATION_GLOSS;

/// Gloss for one token: its lemma upper-cased, then passed through `synonyms`.
///
/// Any negator glosses as `NOT` whatever its surface form (`n't`, `never`).
/// A lone character is returned verbatim; it is a spelled letter, not a word.
pub fn normalize_token(token: &AnnotatedToken, synonyms: &SynonymMap) -> String {
    if token.is_negation() {
        return NEGATION_GLOSS.to_string();
    }
    if token.is_single_char() {
        return token.text.clone();
    }
    let lemma = match token.lemma.trim() {
        "" | "_" => token.text.trim(),
        lemma => lemma,
    };
    let upper = lemma.to_uppercase();
    synonyms.resolve(&upper).to_string()
}

/// Resolve reordered slots against the sentence's tokens.
pub fn render(slots: &[Slot], tokens: &[AnnotatedToken], synonyms: &SynonymMap) -> Vec<String> {
    slots
        .iter()
        .filter_map(|slot| match *slot {
            Slot::Token(idx) => tokens.get(idx).map(|t| normalize_token(t, synonyms)),
            Slot::Fixed(gloss) => Some(gloss.to_string()),
        })
        .collect()
}
