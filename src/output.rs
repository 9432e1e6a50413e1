//! Output formatting and persistence for parsed transcripts and analyses.
//!
//! Supports pretty-printing, JSON files, and flat CSV exports for the
//! spreadsheet renderer.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::AnalysisReport;
use crate::record::TranscriptResult;
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;

/// One student per row, grades flattened into a single column.
#[derive(Debug, Serialize)]
pub struct StudentRow {
    pub register_no: String,
    pub department: String,
    pub standing: &'static str,
    pub sgpa: String,
    pub status: String,
    pub failed_subjects: String,
    pub grades: String,
}

/// Headline numbers for one department.
#[derive(Debug, Serialize)]
pub struct DepartmentRow {
    pub department: String,
    pub total_students: usize,
    pub regular_students: usize,
    pub supplementary_students: usize,
    pub regular_pass_count: usize,
    pub regular_fail_count: usize,
    pub regular_pass_percentage: f64,
    pub regular_average_sgpa: f64,
    pub overall_average_sgpa: f64,
    pub topper_register_no: Option<String>,
    pub topper_sgpa: Option<f64>,
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl std::fmt::Debug) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a value to `path` as pretty-printed JSON, replacing any existing file.
pub fn write_json(path: impl AsRef<Path>, value: &impl Serialize) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)?;
    debug!(path = %path.display(), "JSON written");
    Ok(())
}

/// Writes `rows` to a fresh CSV file with a header line.
pub fn write_records<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV records");

    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Flattens every student of a parsed transcript into [`StudentRow`]s,
/// department by department.
pub fn student_rows(result: &TranscriptResult) -> Vec<StudentRow> {
    result
        .departments
        .values()
        .flatten()
        .map(|s| StudentRow {
            register_no: s.register_no.clone(),
            department: s.department.clone(),
            standing: if s.regular { "Regular" } else { "Supplementary" },
            sgpa: s.sgpa.map_or_else(|| "-".to_string(), |v| format!("{v:.2}")),
            status: s.status.to_string(),
            failed_subjects: s.failed_subjects.clone(),
            grades: s
                .grades
                .iter()
                .map(|(code, grade)| format!("{code}={grade}"))
                .collect::<Vec<_>>()
                .join("; "),
        })
        .collect()
}

pub fn department_rows(report: &AnalysisReport) -> Vec<DepartmentRow> {
    report
        .departments
        .iter()
        .map(|(name, a)| DepartmentRow {
            department: name.clone(),
            total_students: a.total_students,
            regular_students: a.regular_students,
            supplementary_students: a.supplementary_students,
            regular_pass_count: a.regular.pass_count,
            regular_fail_count: a.regular.fail_count,
            regular_pass_percentage: a.regular.pass_percentage,
            regular_average_sgpa: a.regular.average_sgpa,
            overall_average_sgpa: a.overall.average_sgpa,
            topper_register_no: a.overall.topper.as_ref().map(|t| t.register_no.clone()),
            topper_sgpa: a.overall.topper.as_ref().map(|t| t.sgpa),
        })
        .collect()
}
