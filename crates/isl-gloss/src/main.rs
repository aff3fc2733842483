use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use isl_gloss::{Pipeline, PipelineConfig, StrategyChoice};
use isl_grammar::AdjectivePlacement;
use isl_types::AnnotatedToken;

#[derive(Parser)]
#[command(name = "isl-gloss")]
#[command(about = "Translate tagged English into ISL gloss tokens and sign asset filenames")]
struct Cli {
    /// Vocabulary file, one sign token per line [env: ISL_WORDS_FILE]
    #[arg(long, short = 'w')]
    words: Option<PathBuf>,
    /// English text; needs an annotator command
    #[arg(long, short = 't', required_unless_present = "annotated")]
    text: Option<String>,
    /// JSON file of pre-annotated sentences: [[token, ...], ...]
    #[arg(long, conflicts_with = "text")]
    annotated: Option<PathBuf>,
    #[arg(long)]
    synonyms: Option<PathBuf>,
    #[arg(long)]
    stop_words: Option<PathBuf>,
    /// auto, tree or bucket
    #[arg(long)]
    strategy: Option<StrategyChoice>,
    /// before-object, after-object or omit
    #[arg(long)]
    adjectives: Option<AdjectivePlacement>,
    /// Process sentences in parallel
    #[arg(long, default_value_t = false)]
    parallel: bool,
    #[arg(long)]
    parser_cmd: Option<String>,
    #[arg(long)]
    annotator_cmd: Option<String>,
    /// Single-line JSON output
    #[arg(long, default_value_t = false)]
    compact: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(&cli);
    info!("using vocabulary at {}", config.words_path.display());

    let start = Instant::now();
    let pipeline = Pipeline::from_config(&config)?;
    info!(
        "pipeline ready in {} ms (strategy: {})",
        start.elapsed().as_millis(),
        pipeline.strategy_name()
    );

    let record = match (&cli.annotated, &cli.text) {
        (Some(path), _) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("read annotated input {}", path.display()))?;
            let sentences: Vec<Vec<AnnotatedToken>> = serde_json::from_str(&raw)
                .with_context(|| format!("decode annotated input {}", path.display()))?;
            pipeline.gloss_sentences(&sentences)
        }
        (None, Some(text)) => pipeline.translate(text)?,
        (None, None) => anyhow::bail!("either --text or --annotated is required"),
    };

    let json = if cli.compact {
        serde_json::to_string(&record)?
    } else {
        serde_json::to_string_pretty(&record)?
    };
    println!("{json}");
    Ok(())
}

fn load_config(cli: &Cli) -> PipelineConfig {
    let mut config = PipelineConfig::from_env();
    if let Some(words) = &cli.words {
        config.words_path = words.clone();
    }
    if let Some(path) = &cli.synonyms {
        config.synonyms_path = Some(path.clone());
    }
    if let Some(path) = &cli.stop_words {
        config.stop_words_path = Some(path.clone());
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    if let Some(adjectives) = cli.adjectives {
        config.adjectives = adjectives;
    }
    if cli.parallel {
        config.parallel = true;
    }
    if let Some(cmd) = &cli.parser_cmd {
        config.parser_cmd = Some(cmd.clone());
    }
    if let Some(cmd) = &cli.annotator_cmd {
        config.annotator_cmd = Some(cmd.clone());
    }
    config
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}
