//! Text-to-records entry point tying the stages together.

use std::collections::BTreeMap;
use tracing::info;

use crate::analyzers::sgpa::GradePointEngine;
use crate::cohort::{classify, extract_metadata};
use crate::config::GradingConfig;
use crate::error::Result;
use crate::parser::extract_students;
use crate::record::{StudentRecord, TranscriptResult};
use crate::segment::segment;

/// Parses raw transcript text into graded student records grouped by department.
///
/// Cohort metadata is resolved before any student is read, so a transcript
/// without an exam date fails even when it lists students.
///
/// # Errors
///
/// Returns [`TranscriptError::EmptyInput`](crate::error::TranscriptError::EmptyInput),
/// [`TranscriptError::BatchUndetermined`](crate::error::TranscriptError::BatchUndetermined) or
/// [`TranscriptError::NoStudents`](crate::error::TranscriptError::NoStudents).
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn parse_transcript(text: &str, config: &GradingConfig) -> Result<TranscriptResult> {
    let lines = segment(text)?;
    let metadata = extract_metadata(text)?;

    let mut students = extract_students(&lines)?;
    classify(&mut students, &metadata, config);
    GradePointEngine::new(config).apply_all(&mut students, metadata.batch);

    let mut departments: BTreeMap<String, Vec<StudentRecord>> = BTreeMap::new();
    for student in students {
        departments
            .entry(student.department.clone())
            .or_default()
            .push(student);
    }

    info!(
        batch = metadata.batch,
        departments = departments.len(),
        "Transcript parsed"
    );

    Ok(TranscriptResult {
        semester: metadata.semester,
        exam_type: metadata.exam_type,
        exam_date: metadata.exam_date,
        batch: metadata.batch,
        departments,
    })
}
