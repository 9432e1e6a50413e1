//! Structural failures of the transcript pipeline.
//!
//! Field-level anomalies (unknown course codes, unknown departments,
//! unmapped grades) are logged and never surface here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    /// The supplied text was empty or contained only whitespace.
    #[error("transcript text is empty")]
    EmptyInput,

    /// Not a single register number was found in the text.
    #[error("no student register numbers found in transcript text")]
    NoStudents,

    /// The exam date could not be located, so the cohort batch is unknown.
    #[error("could not determine batch: {0}")]
    BatchUndetermined(String),
}

pub type Result<T> = std::result::Result<T, TranscriptError>;
