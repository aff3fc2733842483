use std::path::PathBuf;

use isl_lexicon::{Lexicon, LexiconError, Vocabulary, asset_filename};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn loads_vocabulary_fixture() {
    let vocab = Vocabulary::load(fixture("words.txt")).expect("load fixtures");
    assert_eq!(vocab.len(), 6);
    assert!(vocab.contains("HELLO"));
    assert!(vocab.contains("Thank You"));
    assert!(vocab.contains("sign language"));
    assert!(vocab.contains("book"));
    assert!(!vocab.contains("goodbye"));
}

#[test]
fn multiword_entries_map_to_one_asset() {
    let vocab = Vocabulary::load(fixture("words.txt")).expect("load fixtures");
    let mapped = vocab.map_gloss("THANK YOU");
    assert!(!mapped.spelled);
    assert_eq!(mapped.tokens, vec!["thank_you"]);
    assert_eq!(asset_filename(&mapped.tokens[0]), "thank_you.sigml");
}

#[test]
fn loads_every_table_from_fixtures() {
    let synonyms = fixture("synonyms.txt");
    let stop_words = fixture("stopwords.txt");
    let lexicon = Lexicon::load(
        fixture("words.txt"),
        Some(synonyms.as_path()),
        Some(stop_words.as_path()),
    )
    .expect("load fixtures");

    assert_eq!(lexicon.synonyms.len(), 3);
    assert_eq!(lexicon.synonyms.resolve("HOUSE"), "HOME");
    assert_eq!(lexicon.synonyms.resolve("VOLUME"), "BOOK");
    assert_eq!(lexicon.synonyms.resolve("BROKEN"), "BROKEN");
    // The built-in table is replaced, not extended.
    assert_eq!(lexicon.synonyms.resolve("PURCHASE"), "PURCHASE");

    assert_eq!(lexicon.stop_words.len(), 3);
    assert!(lexicon.stop_words.contains("is"));
    assert!(!lexicon.stop_words.contains("do"));
}

#[test]
fn missing_vocabulary_names_the_path() {
    let path = fixture("does-not-exist.txt");
    match Vocabulary::load(&path) {
        Err(LexiconError::VocabularyNotFound(reported)) => assert_eq!(reported, path),
        other => panic!("expected VocabularyNotFound, got {other:?}"),
    }
}
