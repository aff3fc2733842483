use std::sync::Arc;

use isl_grammar::{
    AdjectivePlacement, BucketReorderer, ConstituencyParser, ConstituentReorderer,
    FilteredSentence, Reorderer, Strategy, render,
};
use isl_lexicon::{StopWords, SynonymMap};
use isl_types::{AnnotatedToken, ParseTree, UPos};

struct Bracketed(&'static str);

impl ConstituencyParser for Bracketed {
    fn parse(&self, _words: &[&str]) -> anyhow::Result<Vec<ParseTree>> {
        Ok(ParseTree::from_bracketed_many(self.0)?)
    }
}

fn gloss(strategy: &Strategy, tokens: &[AnnotatedToken]) -> Vec<String> {
    let sentence = FilteredSentence::new(tokens, &StopWords::default());
    let reordering = strategy.reorder(&sentence);
    render(&reordering.slots, tokens, &SynonymMap::default())
}

/// "Where did you buy the red automobile yesterday?"
fn car_question() -> Vec<AnnotatedToken> {
    vec![
        AnnotatedToken::new("Where", "where", UPos::Adv)
            .with_dep("advmod")
            .with_tag("WRB"),
        AnnotatedToken::new("did", "do", UPos::Aux).with_dep("aux"),
        AnnotatedToken::new("you", "you", UPos::Pron).with_dep("nsubj"),
        AnnotatedToken::new("buy", "buy", UPos::Verb).with_dep("ROOT"),
        AnnotatedToken::new("the", "the", UPos::Det).with_dep("det"),
        AnnotatedToken::new("red", "red", UPos::Adj).with_dep("amod"),
        AnnotatedToken::new("automobile", "automobile", UPos::Noun).with_dep("dobj"),
        AnnotatedToken::new("yesterday", "yesterday", UPos::Noun)
            .with_dep("npadvmod")
            .with_entity("DATE_TIME"),
        AnnotatedToken::new("?", "?", UPos::Punct).with_dep("punct"),
    ]
}

#[test]
fn bucket_order_for_a_question() {
    let strategy = Strategy::Bucket(BucketReorderer::default());
    assert_eq!(
        gloss(&strategy, &car_question()),
        vec!["YESTERDAY", "YOU", "RED", "THE", "CAR", "BUY", "WHERE"]
    );
}

#[test]
fn adjective_placement_is_configurable() {
    let after = Strategy::Bucket(BucketReorderer::new(AdjectivePlacement::AfterObject));
    assert_eq!(
        gloss(&after, &car_question()),
        vec!["YESTERDAY", "YOU", "THE", "CAR", "RED", "BUY", "WHERE"]
    );

    let omit = Strategy::Bucket(BucketReorderer::new(AdjectivePlacement::Omit));
    assert_eq!(
        gloss(&omit, &car_question()),
        vec!["YESTERDAY", "YOU", "THE", "CAR", "BUY", "WHERE"]
    );
}

#[test]
fn constituent_order_for_a_question() {
    // Parsed words: Where you buy the red automobile yesterday
    let parser = Bracketed(
        "(ROOT (SBARQ (WHADVP (WRB Where)) (SQ (NP (PRP you)) \
         (VP (VB buy) (NP (DT the) (JJ red) (NN automobile)) (NP-TMP (NN yesterday))))))",
    );
    let strategy = Strategy::Constituent(ConstituentReorderer::new(Arc::new(parser)));
    let tokens = car_question();
    let sentence = FilteredSentence::new(&tokens, &StopWords::default());
    let reordering = strategy.reorder(&sentence);
    assert!(reordering.parser_used);
    assert_eq!(
        render(&reordering.slots, &tokens, &SynonymMap::default()),
        vec!["YOU", "THE", "RED", "CAR", "WHERE", "BUY", "YESTERDAY"]
    );
}

#[test]
fn every_kept_token_appears_once_in_either_strategy() {
    let tokens = car_question();
    let strategies = [
        Strategy::Bucket(BucketReorderer::default()),
        Strategy::Constituent(ConstituentReorderer::new(Arc::new(Bracketed(
            "(ROOT (S (NP (NP (WRB Where) (PRP you)) (VB buy)) (NP (DT the) (JJ red)) \
             (NP (NN automobile) (NN yesterday))))",
        )))),
    ];
    for strategy in &strategies {
        let mut glosses = gloss(strategy, &tokens);
        glosses.sort();
        assert_eq!(
            glosses,
            vec!["BUY", "CAR", "RED", "THE", "WHERE", "YESTERDAY", "YOU"],
            "{}",
            strategy.name()
        );
    }
}
