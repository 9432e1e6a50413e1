use crate::analyzers::grade::Grade;
use crate::analyzers::types::{
    AnalysisReport, DepartmentAnalysis, GradeShare, GroupStats, OverallStats, RankedStudent,
    SubjectStats, Topper,
};
use crate::analyzers::utility::{mean, pct, round2};
use crate::cohort::is_regular;
use crate::config::DEFAULT_TOPPER_THRESHOLD;
use crate::record::{StudentRecord, TranscriptResult};
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::debug;

/// Aggregates one department's graded students into a [`DepartmentAnalysis`].
///
/// Students are split into regular and supplementary by comparing each
/// register number's admission year with `batch`. Pass/fail here looks only
/// at failing grades (`F`, `FE`, `Absent`, `Withheld`) and is independent of
/// SGPA eligibility.
pub fn analyze_department(students: &[StudentRecord], batch: i32) -> DepartmentAnalysis {
    analyze_department_with_threshold(students, batch, DEFAULT_TOPPER_THRESHOLD)
}

/// Same as [`analyze_department`] with an explicit minimum SGPA for the toppers list.
pub fn analyze_department_with_threshold(
    students: &[StudentRecord],
    batch: i32,
    topper_threshold: f64,
) -> DepartmentAnalysis {
    let (regular, supplementary): (Vec<&StudentRecord>, Vec<&StudentRecord>) = students
        .iter()
        .partition(|s| is_regular(&s.register_no, batch));

    let ranking = rank_students(students, batch);
    let toppers = ranking
        .iter()
        .filter(|r| r.sgpa >= topper_threshold)
        .cloned()
        .collect();

    debug!(
        total = students.len(),
        regular = regular.len(),
        supplementary = supplementary.len(),
        "Department partitioned"
    );

    DepartmentAnalysis {
        total_students: students.len(),
        regular_students: regular.len(),
        supplementary_students: supplementary.len(),
        regular: group_stats(&regular),
        overall: overall_stats(students),
        grade_distribution: grade_distribution(students.iter()),
        regular_grade_distribution: grade_shares(&regular),
        subject_wise: subject_stats(students),
        toppers,
        ranking,
    }
}

/// Runs [`analyze_department`] for every department of a parsed transcript.
#[tracing::instrument(skip(result), fields(batch = result.batch, departments = result.departments.len()))]
pub fn analyze_transcript(result: &TranscriptResult, topper_threshold: f64) -> AnalysisReport {
    let departments = result
        .departments
        .iter()
        .map(|(name, students)| {
            (
                name.clone(),
                analyze_department_with_threshold(students, result.batch, topper_threshold),
            )
        })
        .collect();

    AnalysisReport {
        generated_at: Utc::now(),
        semester: result.semester.clone(),
        exam_type: result.exam_type,
        exam_date: result.exam_date.clone(),
        batch: result.batch,
        departments,
    }
}

fn group_stats(students: &[&StudentRecord]) -> GroupStats {
    let fail_count = students.iter().filter(|s| s.has_failed()).count();
    let pass_count = students.len() - fail_count;
    let sgpas: Vec<f64> = students.iter().map(|s| s.sgpa_or_zero()).collect();

    GroupStats {
        pass_count,
        fail_count,
        average_sgpa: round2(mean(&sgpas)),
        pass_percentage: pct(pass_count, students.len()),
    }
}

fn overall_stats(students: &[StudentRecord]) -> OverallStats {
    let fail_count = students.iter().filter(|s| s.has_failed()).count();
    let sgpas: Vec<f64> = students.iter().map(StudentRecord::sgpa_or_zero).collect();
    // Only a strictly higher SGPA displaces the current topper, so ties keep
    // the first student and an all-zero department has none.
    let mut topper: Option<Topper> = None;
    for student in students {
        let sgpa = student.sgpa_or_zero();
        let best = topper.as_ref().map_or(0.0, |t| t.sgpa);
        if sgpa > best {
            topper = Some(Topper {
                register_no: student.register_no.clone(),
                sgpa,
            });
        }
    }

    OverallStats {
        pass_count: students.len() - fail_count,
        fail_count,
        average_sgpa: round2(mean(&sgpas)),
        topper,
    }
}

fn empty_distribution() -> BTreeMap<Grade, usize> {
    Grade::VOCABULARY.iter().map(|g| (g.clone(), 0)).collect()
}

fn grade_distribution<'a>(students: impl Iterator<Item = &'a StudentRecord>) -> BTreeMap<Grade, usize> {
    let mut distribution = empty_distribution();
    for student in students {
        for grade in student.grades.values() {
            *distribution.entry(grade.clone()).or_default() += 1;
        }
    }
    distribution
}

fn grade_shares(students: &[&StudentRecord]) -> Vec<GradeShare> {
    let distribution = grade_distribution(students.iter().copied());
    let total: usize = distribution.values().sum();

    distribution
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(grade, count)| GradeShare {
            grade,
            count,
            percentage: pct(count, total),
        })
        .collect()
}

fn subject_stats(students: &[StudentRecord]) -> BTreeMap<String, SubjectStats> {
    let mut subjects: BTreeMap<String, SubjectStats> = BTreeMap::new();

    for student in students {
        for (code, grade) in &student.grades {
            let stats = subjects.entry(code.clone()).or_insert_with(|| SubjectStats {
                grade_distribution: empty_distribution(),
                ..Default::default()
            });

            stats.total_students += 1;
            *stats.grade_distribution.entry(grade.clone()).or_default() += 1;
            if grade.is_failing() {
                stats.fail_count += 1;
                stats.failed_students.push(student.register_no.clone());
            } else {
                stats.pass_count += 1;
            }
        }
    }

    for stats in subjects.values_mut() {
        stats.pass_percentage = pct(stats.pass_count, stats.total_students);
    }

    subjects
}

/// Orders students by SGPA, highest first, with standard competition ranks:
/// equal SGPAs share a rank and the next rank skips accordingly.
pub fn rank_students(students: &[StudentRecord], batch: i32) -> Vec<RankedStudent> {
    let mut ordered: Vec<&StudentRecord> = students.iter().collect();
    ordered.sort_by(|a, b| {
        b.sgpa_or_zero()
            .partial_cmp(&a.sgpa_or_zero())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranking: Vec<RankedStudent> = Vec::with_capacity(ordered.len());
    for (i, student) in ordered.into_iter().enumerate() {
        let sgpa = student.sgpa_or_zero();
        let rank = match ranking.last() {
            Some(prev) if prev.sgpa == sgpa => prev.rank,
            _ => i + 1,
        };
        ranking.push(RankedStudent {
            rank,
            register_no: student.register_no.clone(),
            sgpa,
            regular: is_regular(&student.register_no, batch),
        });
    }
    ranking
}
