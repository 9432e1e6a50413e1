//! Student record extraction from segmented transcript lines.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::analyzers::grade::Grade;
use crate::error::{Result, TranscriptError};
use crate::record::StudentRecord;

/// College letters, 2-digit year, 2-letter department, 3-digit roll number.
pub(crate) static REGISTER_NO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+\d{2}[A-Z]{2}\d{3}").unwrap());

/// `CST201(A+)`, `MCN201(Absent)` and similar course/grade pairs. The letter
/// run is matched whole so an overlong prefix can be rejected, not truncated.
static GRADE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z]+)(\d{3})\((Absent|Withheld|[A-Z+]+)\)").unwrap()
});

/// Course codes carry one to three letters before the digits.
const MAX_COURSE_PREFIX: usize = 3;

enum ScanState {
    NoActiveRecord,
    ActiveRecord(StudentRecord),
}

/// Builds one [`StudentRecord`] per register number found in `lines`.
///
/// Grades on the register number's own line and on the lines right after it
/// belong to that student. The block closes at the first line with no grades;
/// stray grade lines after that are ignored until the next register number.
///
/// # Errors
///
/// Returns [`TranscriptError::NoStudents`] when no register number occurs at all.
pub fn extract_students(lines: &[&str]) -> Result<Vec<StudentRecord>> {
    let mut students = Vec::new();
    let mut state = ScanState::NoActiveRecord;

    for line in lines {
        let register_no = REGISTER_NO.find(line).map(|m| m.as_str());

        state = match (state, register_no) {
            (ScanState::ActiveRecord(current), Some(register_no)) => {
                students.push(current);
                open_record(register_no, line)
            }
            (ScanState::NoActiveRecord, Some(register_no)) => open_record(register_no, line),
            (ScanState::ActiveRecord(mut current), None) => {
                if collect_grades(line, &mut current) == 0 {
                    students.push(current);
                    ScanState::NoActiveRecord
                } else {
                    ScanState::ActiveRecord(current)
                }
            }
            (ScanState::NoActiveRecord, None) => ScanState::NoActiveRecord,
        };
    }

    if let ScanState::ActiveRecord(current) = state {
        students.push(current);
    }

    if students.is_empty() {
        return Err(TranscriptError::NoStudents);
    }

    info!(students = students.len(), "Student records extracted");
    Ok(students)
}

fn open_record(register_no: &str, line: &str) -> ScanState {
    let mut student = StudentRecord::new(register_no);
    let found = collect_grades(line, &mut student);
    debug!(register_no, grades = found, "Opened student record");
    ScanState::ActiveRecord(student)
}

/// Adds every grade token on `line` to `student`, returning how many matched.
fn collect_grades(line: &str, student: &mut StudentRecord) -> usize {
    let mut found = 0;
    for caps in GRADE_TOKEN.captures_iter(line) {
        let (prefix, digits) = (&caps[1], &caps[2]);
        if prefix.len() > MAX_COURSE_PREFIX {
            debug!(register_no = %student.register_no, token = &caps[0], "Ignoring malformed course code");
            continue;
        }
        student.set_grade(&format!("{prefix}{digits}"), Grade::from_token(&caps[3]));
        found += 1;
    }
    found
}
