//! Cohort classification: exam metadata, batch year, department and
//! regular/supplementary standing.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{info, warn};

use crate::config::{GradingConfig, OTHER_DEPARTMENT};
use crate::error::{Result, TranscriptError};
use crate::record::{CohortMetadata, ExamType, StudentRecord};

/// Tried in order; the first hit decides the semester.
static SEMESTER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Course-level header, e.g. "B.Tech S3 (R,S) Exam ... Regular"
        Regex::new(r"(?i)B\.?\s?Tech\s+S(\d)\s+.*?(?:Regular|Supplementary)").unwrap(),
        Regex::new(r"(?i)Semester\s+(\d)").unwrap(),
        Regex::new(r"(?i)S(\d) ").unwrap(),
    ]
});

static EXAM_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(Regular|Supplementary)").unwrap());

/// Tried in order; the first hit is the exam date.
static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]* ?\d{4}").unwrap(),
        Regex::new(r"\d{2}[-/]\d{4}").unwrap(),
        Regex::new(r"\d{4}").unwrap(),
    ]
});

/// Year and department segments of a register number such as `TCR22CS061`.
static REGISTER_PARTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})([A-Z]{2})\d{3}").unwrap());

static TRAILING_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{2})$").unwrap());

/// Reads semester, exam type and exam date from the full transcript text and
/// derives the regular batch from them.
///
/// # Errors
///
/// Returns [`TranscriptError::BatchUndetermined`] if no exam date is present.
pub fn extract_metadata(text: &str) -> Result<CohortMetadata> {
    let semester = SEMESTER_PATTERNS
        .iter()
        .find_map(|re| re.captures(text))
        .map(|caps| format!("S{}", &caps[1]))
        .unwrap_or_else(|| "Unknown".to_string());

    let exam_type = match EXAM_TYPE.captures(text) {
        Some(caps) if caps[1].eq_ignore_ascii_case("regular") => ExamType::Regular,
        Some(_) => ExamType::Supplementary,
        None => ExamType::Unknown,
    };

    let exam_date = DATE_PATTERNS
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let batch = batch_for(&semester, &exam_date)?;

    info!(%semester, %exam_type, %exam_date, batch, "Cohort metadata resolved");

    Ok(CohortMetadata {
        semester,
        exam_type,
        exam_date,
        batch,
    })
}

/// Years since admission for a semester label.
///
/// | Semester | Offset |
/// |----------|--------|
/// | S1       | 0      |
/// | S2, S3   | 1      |
/// | S4, S5   | 2      |
/// | S6, S7   | 3      |
/// | other    | 4      |
pub fn semester_offset(semester: &str) -> i32 {
    match semester {
        "S1" => 0,
        "S2" | "S3" => 1,
        "S4" | "S5" => 2,
        "S6" | "S7" => 3,
        _ => 4,
    }
}

/// Regular batch for an exam: last two digits of the exam year minus the
/// semester offset.
///
/// # Errors
///
/// Returns [`TranscriptError::BatchUndetermined`] if `exam_date` does not end
/// in a year.
pub fn batch_for(semester: &str, exam_date: &str) -> Result<i32> {
    if exam_date.is_empty() {
        return Err(TranscriptError::BatchUndetermined(
            "no exam date found in transcript".to_string(),
        ));
    }

    let year: i32 = TRAILING_YEAR
        .captures(exam_date)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or_else(|| {
            TranscriptError::BatchUndetermined(format!("exam date {exam_date:?} has no year"))
        })?;

    Ok(year - semester_offset(semester))
}

/// The two-digit admission year encoded in a register number.
pub fn admission_year(register_no: &str) -> Option<i32> {
    REGISTER_PARTS
        .captures(register_no)
        .and_then(|caps| caps[1].parse().ok())
}

/// The two-letter department code encoded in a register number.
pub fn department_code(register_no: &str) -> Option<&str> {
    REGISTER_PARTS
        .captures(register_no)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

/// Regular students were admitted in exactly the cohort's batch year.
pub fn is_regular(register_no: &str, batch: i32) -> bool {
    admission_year(register_no) == Some(batch)
}

/// Department name for a register number, or [`OTHER_DEPARTMENT`].
pub fn resolve_department(register_no: &str, config: &GradingConfig) -> String {
    let name = department_code(register_no).and_then(|code| config.department_name(code));
    match name {
        Some(name) => name.to_string(),
        None => {
            warn!(register_no, "Unknown department code, using OTHER");
            OTHER_DEPARTMENT.to_string()
        }
    }
}

/// Sets department and regular standing on every student.
pub fn classify(students: &mut [StudentRecord], metadata: &CohortMetadata, config: &GradingConfig) {
    for student in students.iter_mut() {
        student.department = resolve_department(&student.register_no, config);
        student.regular = is_regular(&student.register_no, metadata.batch);
    }
}
