//! Data types produced by the aggregation pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::analyzers::grade::Grade;
use crate::record::ExamType;

/// Pass/fail tallies and SGPA average for the regular batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupStats {
    pub pass_count: usize,
    pub fail_count: usize,
    pub average_sgpa: f64,
    pub pass_percentage: f64,
}

/// Highest SGPA in a department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topper {
    pub register_no: String,
    pub sgpa: f64,
}

/// Statistics over every student in a department, regular or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverallStats {
    pub pass_count: usize,
    pub fail_count: usize,
    pub average_sgpa: f64,
    pub topper: Option<Topper>,
}

/// Results for one course code across a department.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubjectStats {
    pub total_students: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    pub pass_percentage: f64,
    pub grade_distribution: BTreeMap<Grade, usize>,
    pub failed_students: Vec<String>,
}

/// A grade's share of all regular-batch grade occurrences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeShare {
    pub grade: Grade,
    pub count: usize,
    pub percentage: f64,
}

/// A student's position in the department ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStudent {
    pub rank: usize,
    pub register_no: String,
    pub sgpa: f64,
    pub regular: bool,
}

/// Complete aggregate for a single department.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DepartmentAnalysis {
    pub total_students: usize,
    pub regular_students: usize,
    pub supplementary_students: usize,
    pub regular: GroupStats,
    pub overall: OverallStats,
    pub grade_distribution: BTreeMap<Grade, usize>,
    pub regular_grade_distribution: Vec<GradeShare>,
    pub subject_wise: BTreeMap<String, SubjectStats>,
    pub toppers: Vec<RankedStudent>,
    pub ranking: Vec<RankedStudent>,
}

/// Every department's aggregate for one transcript, handed to the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub semester: String,
    pub exam_type: ExamType,
    pub exam_date: String,
    pub batch: i32,
    pub departments: BTreeMap<String, DepartmentAnalysis>,
}
