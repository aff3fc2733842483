pub mod config;
pub mod error;
pub mod external;
pub mod pipeline;

pub use config::{DEFAULT_WORDS_FILE, PipelineConfig, StrategyChoice};
pub use error::PipelineError;
pub use external::{Annotator, CommandAnnotator, CommandParser};
pub use pipeline::{Pipeline, PipelineBuilder, sanitize, text_to_isl};
