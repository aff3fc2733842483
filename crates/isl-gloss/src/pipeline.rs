use std::path::Path;
use std::sync::Arc;

use isl_grammar::{
    AdjectivePlacement, BucketReorderer, ConstituencyParser, ConstituentReorderer,
    FilteredSentence, Reorderer, Strategy, render,
};
use isl_lexicon::{Lexicon, Vocabulary, asset_filename};
use isl_types::{AnnotatedToken, OutputRecord, SentenceGloss, SentenceMeta};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::{PipelineConfig, StrategyChoice};
use crate::error::PipelineError;
use crate::external::{Annotator, CommandAnnotator, CommandParser};

/// Filter, reorder, normalize and map sentences to sign assets.
///
/// The lexicon is shared read-only; a pipeline can serve concurrent callers.
pub struct Pipeline {
    lexicon: Arc<Lexicon>,
    strategy: Strategy,
    annotator: Option<Arc<dyn Annotator>>,
    parallel: bool,
}

pub struct PipelineBuilder {
    lexicon: Arc<Lexicon>,
    annotator: Option<Arc<dyn Annotator>>,
    parser: Option<Arc<dyn ConstituencyParser>>,
    strategy: StrategyChoice,
    adjectives: AdjectivePlacement,
    parallel: bool,
}

impl PipelineBuilder {
    pub fn annotator(mut self, annotator: Arc<dyn Annotator>) -> Self {
        self.annotator = Some(annotator);
        self
    }

    pub fn parser(mut self, parser: Arc<dyn ConstituencyParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn strategy(mut self, strategy: StrategyChoice) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn adjectives(mut self, adjectives: AdjectivePlacement) -> Self {
        self.adjectives = adjectives;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let adjectives = self.adjectives;
        let buckets = move || Strategy::Bucket(BucketReorderer::new(adjectives));
        let strategy = match (self.strategy, self.parser) {
            (StrategyChoice::Bucket, _) => buckets(),
            (StrategyChoice::Tree | StrategyChoice::Auto, Some(parser)) => {
                Strategy::Constituent(ConstituentReorderer::new(parser))
            }
            (StrategyChoice::Tree, None) => return Err(PipelineError::MissingParser),
            (StrategyChoice::Auto, None) => buckets(),
        };
        debug!("pipeline strategy: {}", strategy.name());
        Ok(Pipeline {
            lexicon: self.lexicon,
            strategy,
            annotator: self.annotator,
            parallel: self.parallel,
        })
    }
}

impl Pipeline {
    pub fn builder(lexicon: Arc<Lexicon>) -> PipelineBuilder {
        PipelineBuilder {
            lexicon,
            annotator: None,
            parser: None,
            strategy: StrategyChoice::default(),
            adjectives: AdjectivePlacement::default(),
            parallel: false,
        }
    }

    /// Load tables and wire up command-backed collaborators from `config`.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let lexicon = Lexicon::load(
            &config.words_path,
            config.synonyms_path.as_deref(),
            config.stop_words_path.as_deref(),
        )?;
        let mut builder = Pipeline::builder(Arc::new(lexicon))
            .strategy(config.strategy)
            .adjectives(config.adjectives)
            .parallel(config.parallel);
        if let Some(parser) = config
            .parser_cmd
            .as_deref()
            .and_then(CommandParser::from_command_line)
        {
            builder = builder.parser(Arc::new(parser));
        }
        if let Some(annotator) = config
            .annotator_cmd
            .as_deref()
            .and_then(CommandAnnotator::from_command_line)
        {
            builder = builder.annotator(Arc::new(annotator));
        }
        builder.build()
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Gloss one annotated sentence.
    pub fn reorder_to_gloss(&self, tokens: &[AnnotatedToken]) -> SentenceGloss {
        let sentence = FilteredSentence::new(tokens, &self.lexicon.stop_words);
        let reordering = self.strategy.reorder(&sentence);
        let glosses = render(&reordering.slots, tokens, &self.lexicon.synonyms);

        let mut out = map_to_vocabulary(glosses, &self.lexicon.vocabulary);
        out.meta = SentenceMeta {
            parser_used: reordering.parser_used,
            parser_error: reordering.parser_error,
        };
        debug!(
            "sentence of {} tokens -> {:?} ({} kept)",
            tokens.len(),
            out.glosses,
            sentence.len()
        );
        out
    }

    /// Gloss pre-annotated sentences and flatten them in order.
    pub fn gloss_sentences(&self, sentences: &[Vec<AnnotatedToken>]) -> OutputRecord {
        let glossed: Vec<SentenceGloss> = if self.parallel {
            sentences
                .par_iter()
                .map(|s| self.reorder_to_gloss(s))
                .collect()
        } else {
            sentences.iter().map(|s| self.reorder_to_gloss(s)).collect()
        };
        OutputRecord::from_sentences(glossed)
    }

    /// Annotate `text` and gloss every sentence.
    ///
    /// Blank input yields an empty record. A parser failure only affects the
    /// order of the sentence it happened on.
    pub fn translate(&self, text: &str) -> Result<OutputRecord, PipelineError> {
        let text = sanitize(text);
        if text.is_empty() {
            return Ok(OutputRecord::default());
        }
        let annotator = self
            .annotator
            .as_ref()
            .ok_or(PipelineError::MissingAnnotator)?;
        let sentences = annotator
            .annotate(&text)
            .map_err(PipelineError::Annotation)?;
        let record = self.gloss_sentences(&sentences);
        info!(
            "translated {} sentences into {} tokens (parser used: {})",
            record.meta.sentence_count,
            record.tokens.len(),
            record.meta.parser_used
        );
        Ok(record)
    }
}

fn map_to_vocabulary(glosses: Vec<String>, vocabulary: &Vocabulary) -> SentenceGloss {
    let mut out = SentenceGloss::default();
    for gloss in &glosses {
        let mapped = vocabulary.map_gloss(gloss);
        if mapped.spelled {
            out.spelled.push(gloss.clone());
        }
        out.tokens.extend(mapped.tokens);
    }
    out.filenames = out.tokens.iter().map(|t| asset_filename(t)).collect();
    out.glosses = glosses;
    out
}

/// Trim and flatten newlines and tabs into spaces.
pub fn sanitize(text: &str) -> String {
    text.trim().replace(['\n', '\r', '\t'], " ").trim().to_string()
}

/// Translate `text` against the vocabulary at `vocabulary_path`, using the
/// built-in synonym and stop-word tables.
///
/// The vocabulary is loaded first, so a missing file fails even for blank input.
pub fn text_to_isl(
    text: &str,
    vocabulary_path: impl AsRef<Path>,
    annotator: Arc<dyn Annotator>,
    parser: Option<Arc<dyn ConstituencyParser>>,
) -> Result<OutputRecord, PipelineError> {
    let vocabulary = Vocabulary::load(vocabulary_path)?;
    let mut builder =
        Pipeline::builder(Arc::new(Lexicon::with_vocabulary(vocabulary))).annotator(annotator);
    if let Some(parser) = parser {
        builder = builder.parser(parser);
    }
    builder.build()?.translate(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_flattens_whitespace() {
        assert_eq!(sanitize("  I go\nhome\t now \n"), "I go home  now");
        assert_eq!(sanitize(" \n\t "), "");
    }

    #[test]
    fn maps_glosses_and_reports_spelled_words() {
        let vocabulary = Vocabulary::from_words(["you", "ok"]);
        let out = map_to_vocabulary(vec!["YOU".into(), "RAVI".into()], &vocabulary);
        assert_eq!(out.tokens, vec!["you", "r", "a", "v", "i"]);
        assert_eq!(
            out.filenames,
            vec!["you.sigml", "R.sigml", "A.sigml", "V.sigml", "I.sigml"]
        );
        assert_eq!(out.spelled, vec!["RAVI"]);
        assert_eq!(out.glosses, vec!["YOU", "RAVI"]);
    }

    #[test]
    fn tree_strategy_without_parser_is_rejected() {
        let lexicon = Arc::new(Lexicon::default());
        let err = Pipeline::builder(lexicon)
            .strategy(StrategyChoice::Tree)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::MissingParser));
    }

    #[test]
    fn auto_without_parser_uses_buckets() {
        let pipeline = Pipeline::builder(Arc::new(Lexicon::default()))
            .build()
            .unwrap();
        assert_eq!(pipeline.strategy_name(), "bucket");
    }
}
