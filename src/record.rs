//! Per-student and per-document records produced by parsing a transcript.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::analyzers::grade::Grade;

/// Whether a student cleared every subject in this exam cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    #[default]
    Pass,
    Fail,
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultStatus::Pass => f.write_str("PASS"),
            ResultStatus::Fail => f.write_str("FAIL"),
        }
    }
}

/// One student's results for a single exam cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub register_no: String,
    pub department: String,
    /// Course code to grade in transcript order. A repeated code keeps its
    /// first position and takes the last grade.
    pub grades: IndexMap<String, Grade>,
    #[serde(default)]
    pub regular: bool,
    /// `None` until the grade-point engine has run.
    #[serde(default)]
    pub sgpa: Option<f64>,
    #[serde(default)]
    pub eligible: bool,
    #[serde(default)]
    pub failed_subjects: String,
    #[serde(default)]
    pub status: ResultStatus,
}

impl StudentRecord {
    pub fn new(register_no: &str) -> Self {
        StudentRecord {
            register_no: register_no.to_string(),
            ..Default::default()
        }
    }

    /// Records a grade, replacing any earlier grade for the same course.
    pub fn set_grade(&mut self, course_code: &str, grade: Grade) {
        self.grades.insert(course_code.to_string(), grade);
    }

    /// Computed SGPA, treating "not yet computed" as zero.
    pub fn sgpa_or_zero(&self) -> f64 {
        self.sgpa.unwrap_or(0.0)
    }

    /// Any grade in the failing set (`F`, `FE`, `Absent`, `Withheld`).
    pub fn has_failed(&self) -> bool {
        self.grades.values().any(Grade::is_failing)
    }
}

/// The sitting a transcript belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamType {
    Regular,
    Supplementary,
    #[default]
    Unknown,
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamType::Regular => f.write_str("Regular"),
            ExamType::Supplementary => f.write_str("Supplementary"),
            ExamType::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Document-wide facts shared by every student in one parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortMetadata {
    pub semester: String,
    pub exam_type: ExamType,
    pub exam_date: String,
    /// Two-digit admission year of the regular cohort; may be negative
    /// for implausible dates.
    pub batch: i32,
}

/// Parsed transcript, grouped by department for the report renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptResult {
    pub semester: String,
    pub exam_type: ExamType,
    pub exam_date: String,
    pub batch: i32,
    pub departments: BTreeMap<String, Vec<StudentRecord>>,
}

impl TranscriptResult {
    pub fn student_count(&self) -> usize {
        self.departments.values().map(Vec::len).sum()
    }
}
