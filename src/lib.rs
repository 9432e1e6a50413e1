pub mod analyzers;
pub mod cohort;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod segment;

pub use analyzers::aggregate::{analyze_department, analyze_transcript};
pub use config::GradingConfig;
pub use error::TranscriptError;
pub use pipeline::parse_transcript;
pub use record::{StudentRecord, TranscriptResult};
