//! Per-student grade-point computation.

use tracing::{debug, warn};

use crate::analyzers::utility::round2;
use crate::cohort::is_regular;
use crate::config::GradingConfig;
use crate::record::{ResultStatus, StudentRecord};

/// Computes SGPA, eligibility and failed subjects from a [`GradingConfig`].
pub struct GradePointEngine<'a> {
    config: &'a GradingConfig,
}

impl<'a> GradePointEngine<'a> {
    pub fn new(config: &'a GradingConfig) -> Self {
        Self { config }
    }

    /// Fills in `eligible`, `sgpa`, `failed_subjects` and `status` for one student.
    ///
    /// Non-credit courses and courses without a known credit weight are left
    /// out of the totals. The SGPA is zero unless the student has credited
    /// courses, no SGPA-blocking grade among them, and belongs to `batch`.
    pub fn apply(&self, student: &mut StudentRecord, batch: i32) {
        let mut eligible = true;
        let mut total_points = 0.0;
        let mut total_credits = 0.0;

        for code in self.unmapped_courses(student) {
            warn!(
                register_no = %student.register_no,
                course = %code,
                grade = %student.grades[code],
                "Unmapped grade, counting as 0 points"
            );
        }

        for (code, grade) in &student.grades {
            if self.config.is_non_credit(code) {
                continue;
            }

            if grade.blocks_sgpa() {
                eligible = false;
            }

            let Some(credit) = self.config.credit_for(code) else {
                warn!(register_no = %student.register_no, course = %code, "Credits not defined for course");
                continue;
            };

            let points = self.config.points_for(grade).unwrap_or(0.0);

            debug!(
                course = %code,
                credit,
                %grade,
                points,
                credit_points = points * credit,
                "Course credited"
            );

            total_points += points * credit;
            total_credits += credit;
        }

        let regular = is_regular(&student.register_no, batch);
        let sgpa = if total_credits > 0.0 && eligible && regular {
            round2(total_points / total_credits)
        } else {
            0.0
        };

        debug!(
            register_no = %student.register_no,
            total_points,
            total_credits,
            sgpa,
            batch,
            "SGPA computed"
        );

        student.eligible = eligible;
        student.sgpa = Some(sgpa);
        student.failed_subjects = self.failed_subjects(student);
        student.status = if student.failed_subjects.is_empty() {
            ResultStatus::Pass
        } else {
            ResultStatus::Fail
        };
    }

    pub fn apply_all(&self, students: &mut [StudentRecord], batch: i32) {
        for student in students.iter_mut() {
            self.apply(student, batch);
        }
    }

    /// Courses whose grade has no point value, credited or not.
    pub fn unmapped_courses<'s>(&self, student: &'s StudentRecord) -> Vec<&'s str> {
        student
            .grades
            .iter()
            .filter(|(_, grade)| self.config.points_for(grade).is_none())
            .map(|(code, _)| code.as_str())
            .collect()
    }

    /// Comma-separated failing courses in transcript order; non-credit courses are marked with `*`.
    pub fn failed_subjects(&self, student: &StudentRecord) -> String {
        student
            .grades
            .iter()
            .filter(|(_, grade)| grade.is_failing())
            .map(|(code, _)| {
                if self.config.is_non_credit(code) {
                    format!("{code}*")
                } else {
                    code.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::grade::Grade;

    fn student(register_no: &str, grades: &[(&str, &str)]) -> StudentRecord {
        let mut s = StudentRecord::new(register_no);
        for (code, grade) in grades {
            s.set_grade(code, Grade::from_token(grade));
        }
        s
    }

    #[test]
    fn test_regular_student_sgpa() {
        let config = GradingConfig::default();
        let engine = GradePointEngine::new(&config);
        let mut s = student("TCR22CS061", &[("CST201", "S"), ("CST203", "A")]);

        engine.apply(&mut s, 22);

        assert!(s.eligible);
        assert_eq!(s.sgpa, Some(9.25));
        assert_eq!(s.failed_subjects, "");
        assert_eq!(s.status, ResultStatus::Pass);
    }

    #[test]
    fn test_weighted_by_credits() {
        let config = GradingConfig::default();
        let engine = GradePointEngine::new(&config);
        // (8 * 4 + 10 * 2) / 6 = 8.666..
        let mut s = student("TCR22CS061", &[("CST201", "B+"), ("CSL201", "S")]);
        engine.apply(&mut s, 22);
        assert_eq!(s.sgpa, Some(8.67));
    }

    #[test]
    fn test_absent_forces_zero_and_is_reported() {
        let config = GradingConfig::default();
        let engine = GradePointEngine::new(&config);
        let mut s = student("TCR22CS061", &[("CST201", "S"), ("CST203", "Absent")]);

        engine.apply(&mut s, 22);

        assert!(!s.eligible);
        assert_eq!(s.sgpa, Some(0.0));
        assert_eq!(s.failed_subjects, "CST203");
        assert_eq!(s.status, ResultStatus::Fail);
    }

    #[test]
    fn test_supplementary_student_always_zero() {
        let config = GradingConfig::default();
        let engine = GradePointEngine::new(&config);
        let mut s = student("TCR21CS061", &[("CST201", "S"), ("CST203", "S")]);

        engine.apply(&mut s, 22);

        assert!(s.eligible);
        assert_eq!(s.sgpa, Some(0.0));
        assert_eq!(s.status, ResultStatus::Pass);
    }

    #[test]
    fn test_fe_fails_subject_but_keeps_sgpa() {
        let config = GradingConfig::default();
        let engine = GradePointEngine::new(&config);
        // (10 * 4 + 0 * 4) / 8 = 5
        let mut s = student("TCR22CS061", &[("CST201", "S"), ("CST203", "FE")]);

        engine.apply(&mut s, 22);

        assert!(s.eligible);
        assert_eq!(s.sgpa, Some(5.0));
        assert_eq!(s.failed_subjects, "CST203");
        assert_eq!(s.status, ResultStatus::Fail);
    }

    #[test]
    fn test_incomplete_blocks_sgpa_but_is_not_failed() {
        let config = GradingConfig::default();
        let engine = GradePointEngine::new(&config);
        let mut s = student("TCR22CS061", &[("CST201", "S"), ("CST203", "I")]);

        engine.apply(&mut s, 22);

        assert!(!s.eligible);
        assert_eq!(s.sgpa, Some(0.0));
        assert_eq!(s.failed_subjects, "");
        assert_eq!(s.status, ResultStatus::Pass);
    }

    #[test]
    fn test_non_credit_course_excluded_from_totals() {
        let config = GradingConfig::default();
        let engine = GradePointEngine::new(&config);
        let mut s = student(
            "TCR22CS061",
            &[("CST201", "S"), ("CST203", "A"), ("MCN201", "F")],
        );

        engine.apply(&mut s, 22);

        assert!(s.eligible);
        assert_eq!(s.sgpa, Some(9.25));
        assert_eq!(s.failed_subjects, "MCN201*");
        assert_eq!(s.status, ResultStatus::Fail);
    }

    #[test]
    fn test_unknown_course_is_skipped() {
        let config = GradingConfig::default();
        let engine = GradePointEngine::new(&config);
        let mut s = student("TCR22CS061", &[("CST201", "S"), ("ZZZ999", "D")]);

        engine.apply(&mut s, 22);
        assert_eq!(s.sgpa, Some(10.0));
    }

    #[test]
    fn test_no_credited_courses_gives_zero() {
        let config = GradingConfig::default();
        let engine = GradePointEngine::new(&config);
        let mut s = student("TCR22CS061", &[("ZZZ999", "S"), ("MCN201", "S")]);

        engine.apply(&mut s, 22);
        assert_eq!(s.sgpa, Some(0.0));
        assert!(s.eligible);
    }

    #[test]
    fn test_unmapped_grade_counts_as_zero_points() {
        let config = GradingConfig::default();
        let engine = GradePointEngine::new(&config);
        // "Q" earns nothing but still carries credits: (10 * 4 + 0 * 4) / 8
        let mut s = student("TCR22CS061", &[("CST201", "S"), ("CST203", "Q")]);

        engine.apply(&mut s, 22);
        assert_eq!(s.sgpa, Some(5.0));
    }

    #[test]
    fn test_failed_subjects_listed_in_transcript_order() {
        let config = GradingConfig::default();
        let engine = GradePointEngine::new(&config);
        let mut s = student("TCR22CS061", &[("MAT203", "Absent"), ("CST205", "F")]);

        engine.apply(&mut s, 22);
        assert_eq!(s.failed_subjects, "MAT203, CST205");

        let s = student(
            "TCR22CS061",
            &[("CST205", "F"), ("MCN201", "Absent"), ("CST201", "Withheld"), ("CST203", "A")],
        );
        assert_eq!(engine.failed_subjects(&s), "CST205, MCN201*, CST201");
    }

    #[test]
    fn test_unmapped_courses_include_uncredited() {
        let config = GradingConfig::default();
        let engine = GradePointEngine::new(&config);
        let s = student(
            "TCR22CS061",
            &[("CST201", "S"), ("MCN201", "Q"), ("ZZZ999", "I"), ("CST203", "Q")],
        );
        assert_eq!(engine.unmapped_courses(&s), vec!["MCN201", "ZZZ999", "CST203"]);
    }

    #[test]
    fn test_sgpa_within_bounds() {
        let config = GradingConfig::default();
        let engine = GradePointEngine::new(&config);
        for token in ["S", "A+", "A", "B+", "B", "C+", "C", "D", "P", "FE"] {
            let mut s = student("TCR22CS061", &[("CST201", token), ("CSL201", "S")]);
            engine.apply(&mut s, 22);
            let sgpa = s.sgpa.unwrap();
            assert!((0.0..=10.0).contains(&sgpa), "{token} gave {sgpa}");
        }
    }

    #[test]
    fn test_apply_all() {
        let config = GradingConfig::default();
        let engine = GradePointEngine::new(&config);
        let mut students = vec![
            student("TCR22CS061", &[("CST201", "S")]),
            student("TCR22CS062", &[("CST201", "P")]),
        ];
        engine.apply_all(&mut students, 22);
        assert_eq!(students[0].sgpa, Some(10.0));
        assert_eq!(students[1].sgpa, Some(5.5));
    }
}
