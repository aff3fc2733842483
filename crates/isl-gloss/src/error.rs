use isl_lexicon::LexiconError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
    #[error("annotation failed: {0:#}")]
    Annotation(anyhow::Error),
    #[error("no annotator configured; pass pre-annotated sentences instead")]
    MissingAnnotator,
    #[error("the tree strategy needs a constituency parser")]
    MissingParser,
}

impl PipelineError {
    pub fn is_vocabulary_not_found(&self) -> bool {
        matches!(
            self,
            PipelineError::Lexicon(LexiconError::VocabularyNotFound(_))
        )
    }
}
