use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use isl_grammar::AdjectivePlacement;

pub const DEFAULT_WORDS_FILE: &str = "words.txt";

/// Which reorderer a pipeline runs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StrategyChoice {
    /// Constituent reordering when a parser is configured, buckets otherwise.
    #[default]
    Auto,
    Tree,
    Bucket,
}

impl FromStr for StrategyChoice {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(StrategyChoice::Auto),
            "tree" | "constituent" => Ok(StrategyChoice::Tree),
            "bucket" => Ok(StrategyChoice::Bucket),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub words_path: PathBuf,
    pub synonyms_path: Option<PathBuf>,
    pub stop_words_path: Option<PathBuf>,
    pub strategy: StrategyChoice,
    pub adjectives: AdjectivePlacement,
    pub parallel: bool,
    /// Command line of an external constituency parser.
    pub parser_cmd: Option<String>,
    /// Command line of an external tagger that prints annotated JSON.
    pub annotator_cmd: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            words_path: PathBuf::from(DEFAULT_WORDS_FILE),
            synonyms_path: None,
            stop_words_path: None,
            strategy: StrategyChoice::default(),
            adjectives: AdjectivePlacement::default(),
            parallel: false,
            parser_cmd: None,
            annotator_cmd: None,
        }
    }
}

impl PipelineConfig {
    /// Read `ISL_*` environment variables; unset or unparseable values keep defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            words_path: non_empty("ISL_WORDS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.words_path),
            synonyms_path: non_empty("ISL_SYNONYMS_FILE").map(PathBuf::from),
            stop_words_path: non_empty("ISL_STOPWORDS_FILE").map(PathBuf::from),
            strategy: non_empty("ISL_STRATEGY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.strategy),
            adjectives: non_empty("ISL_ADJECTIVES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.adjectives),
            parallel: non_empty("ISL_PARALLEL")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.parallel),
            parser_cmd: non_empty("ISL_PARSER_CMD"),
            annotator_cmd: non_empty("ISL_ANNOTATOR_CMD"),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
