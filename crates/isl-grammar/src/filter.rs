//! Punctuation and stop-word removal.
//!
//! Filtering only records which positions survive; the token slice itself is
//! never modified, so later steps can always go back to the original token.

use isl_lexicon::StopWords;
use isl_types::AnnotatedToken;

use crate::Slot;

/// A sentence together with the positions that survived filtering.
#[derive(Clone, Debug)]
pub struct FilteredSentence<'a> {
    pub tokens: &'a [AnnotatedToken],
    /// Surviving positions, ascending.
    pub kept: Vec<usize>,
    /// Non-punctuation positions whose text is not a stop word at all,
    /// regardless of the wh/negation exemptions.
    pub content: Vec<usize>,
}

impl<'a> FilteredSentence<'a> {
    pub fn new(tokens: &'a [AnnotatedToken], stop_words: &StopWords) -> Self {
        let mut kept = Vec::with_capacity(tokens.len());
        let mut content = Vec::with_capacity(tokens.len());
        for (idx, token) in tokens.iter().enumerate() {
            if token.is_punctuation() {
                continue;
            }
            if !stop_words.contains(&token.text) {
                content.push(idx);
            }
            if is_kept(token, stop_words) {
                kept.push(idx);
            }
        }
        Self {
            tokens,
            kept,
            content,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }

    pub fn len(&self) -> usize {
        self.kept.len()
    }

    /// Surviving tokens with their original positions.
    pub fn kept_tokens(&self) -> impl Iterator<Item = (usize, &'a AnnotatedToken)> + '_ {
        let tokens = self.tokens;
        self.kept.iter().map(move |&idx| (idx, &tokens[idx]))
    }

    /// Surface text of the surviving tokens.
    pub fn words(&self) -> Vec<&'a str> {
        self.kept
            .iter()
            .map(|&idx| self.tokens[idx].text.as_str())
            .collect()
    }

    pub fn in_order(&self) -> Vec<Slot> {
        self.kept.iter().map(|&idx| Slot::Token(idx)).collect()
    }
}

/// Stop words are dropped unless they ask a question or negate.
pub fn is_kept(token: &AnnotatedToken, stop_words: &StopWords) -> bool {
    !stop_words.contains(&token.text) || token.is_wh_word() || token.is_negation()
}

#[cfg(test)]
mod tests {
    use super::*;
    use isl_types::UPos;

    #[test]
    fn drops_stop_words_but_keeps_questions_and_negation() {
        let stops = StopWords::from_words(["what", "not", "is", "the"]);
        let tokens = vec![
            AnnotatedToken::new("What", "what", UPos::Pron).with_tag("WP"),
            AnnotatedToken::new("is", "be", UPos::Aux),
            AnnotatedToken::new("not", "not", UPos::Part).with_dep("neg"),
            AnnotatedToken::new("the", "the", UPos::Det),
            AnnotatedToken::new("plan", "plan", UPos::Noun),
        ];
        let sentence = FilteredSentence::new(&tokens, &stops);
        assert_eq!(sentence.kept, vec![0, 2, 4]);
        assert_eq!(sentence.content, vec![4]);
        assert_eq!(sentence.words(), vec!["What", "not", "plan"]);
    }

    #[test]
    fn removes_punctuation_by_position_with_duplicate_words() {
        let stops = StopWords::default();
        let tokens = vec![
            AnnotatedToken::new("go", "go", UPos::Verb),
            AnnotatedToken::new(",", ",", UPos::Punct),
            AnnotatedToken::new("go", "go", UPos::Verb),
            AnnotatedToken::new("!", "!", UPos::Punct),
        ];
        let sentence = FilteredSentence::new(&tokens, &stops);
        assert_eq!(sentence.kept, vec![0, 2]);
        assert_eq!(sentence.in_order(), vec![Slot::Token(0), Slot::Token(2)]);
    }

    #[test]
    fn empty_sentence_stays_empty() {
        let sentence = FilteredSentence::new(&[], &StopWords::default());
        assert!(sentence.is_empty());
        assert!(sentence.words().is_empty());
    }
}
