//! Lookup tables that drive grading: credit weights, grade points,
//! department names and non-credit courses.
//!
//! The built-in tables cover the S2-S4 curricula. A JSON file with the same
//! field names can replace any of them:
//! ```json
//! {
//!   "credits": { "CST201": 4, "CST203": 4 },
//!   "departments": { "CS": "COMPUTER SCIENCE & ENGINEERING" },
//!   "non_credit_courses": ["MCN201"],
//!   "topper_threshold": 9.0
//! }
//! ```
//! Fields left out of the file keep their built-in values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::debug;

use crate::analyzers::grade::Grade;

/// Sentinel department for register numbers with an unknown code.
pub const OTHER_DEPARTMENT: &str = "OTHER";

/// Minimum SGPA for a place on the toppers list.
pub const DEFAULT_TOPPER_THRESHOLD: f64 = 9.0;

static DEPARTMENTS: &[(&str, &str)] = &[
    ("CS", "COMPUTER SCIENCE & ENGINEERING"),
    ("CE", "CIVIL ENGINEERING"),
    ("ME", "MECHANICAL ENGINEERING"),
    ("EE", "ELECTRICAL AND ELECTRONICS ENGINEERING"),
    ("EC", "ELECTRONICS & COMMUNICATION ENGG"),
    ("CH", "CHEMICAL ENGINEERING"),
    ("PE", "PRODUCTION ENGINEERING"),
];

static NON_CREDIT_COURSES: &[&str] = &["HUN101", "HUT102", "MCN201", "MCN202", "MCN301", "MCN401"];

static CREDITS: &[(&str, f64)] = &[
    // S2, all branches
    ("MAT102", 4.0),
    ("CYT100", 4.0),
    ("EST110", 3.0),
    ("EST130", 4.0),
    ("EST102", 4.0),
    ("PHL120", 1.0),
    ("CYL120", 1.0),
    ("ESL120", 1.0),
    ("ESL130", 1.0),
    ("PHT100", 4.0),
    ("PHT110", 4.0),
    ("EST100", 3.0),
    ("EST120", 4.0),
    // S3 common
    ("MAT201", 4.0),
    ("MAT203", 4.0),
    ("EST200", 2.0),
    ("HUT200", 2.0),
    // S3 CS
    ("CST201", 4.0),
    ("CST203", 4.0),
    ("CST205", 4.0),
    ("CSL201", 2.0),
    ("CSL203", 2.0),
    // S3 EE
    ("EET201", 4.0),
    ("EET203", 4.0),
    ("EET205", 4.0),
    ("EEL201", 2.0),
    ("EEL203", 2.0),
    // S3 EC
    ("ECT201", 4.0),
    ("ECT203", 4.0),
    ("ECT205", 4.0),
    ("ECL201", 2.0),
    ("ECL203", 2.0),
    // S3 ME
    ("MET201", 4.0),
    ("MET203", 4.0),
    ("MET205", 4.0),
    ("MEL201", 2.0),
    ("MEL203", 2.0),
    // S3 CE
    ("CET201", 4.0),
    ("CET203", 4.0),
    ("CET205", 4.0),
    ("CEL201", 2.0),
    ("CEL203", 2.0),
    // S3 CH
    ("CHT201", 4.0),
    ("CHT203", 4.0),
    ("CHT205", 4.0),
    ("CHL201", 2.0),
    ("CHL203", 2.0),
    // S3 PE
    ("PET201", 4.0),
    ("PET203", 4.0),
    ("PET205", 4.0),
    ("PEL201", 2.0),
    ("PEL203", 2.0),
    // S4 common
    ("MAT202", 4.0),
    ("MAT204", 4.0),
    ("MAT206", 4.0),
    // S4 CS
    ("CST202", 4.0),
    ("CST204", 4.0),
    ("CST206", 4.0),
    ("CSL202", 2.0),
    ("CSL204", 2.0),
    // S4 EE
    ("EET202", 4.0),
    ("EET204", 4.0),
    ("EET206", 4.0),
    ("EEL202", 2.0),
    ("EEL204", 2.0),
    // S4 EC
    ("ECT202", 4.0),
    ("ECT204", 4.0),
    ("ECT206", 4.0),
    ("ECL202", 2.0),
    ("ECL204", 2.0),
    // S4 ME
    ("MET202", 4.0),
    ("MET204", 4.0),
    ("MET206", 4.0),
    ("MEL202", 2.0),
    ("MEL204", 2.0),
    // S4 CE
    ("CET202", 4.0),
    ("CET204", 4.0),
    ("CET206", 4.0),
    ("CEL202", 2.0),
    ("CEL204", 2.0),
    // S4 CH
    ("CHT202", 4.0),
    ("CHT204", 4.0),
    ("CHT206", 4.0),
    ("CHL202", 2.0),
    ("CHL204", 2.0),
    // S4 PE
    ("EET212", 4.0),
    ("PET204", 4.0),
    ("PET206", 4.0),
    ("EEL212", 2.0),
    ("PEL204", 2.0),
];

/// Immutable grading tables, built once and shared by reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GradingConfig {
    pub grade_points: BTreeMap<Grade, f64>,
    pub credits: HashMap<String, f64>,
    pub departments: HashMap<String, String>,
    pub non_credit_courses: HashSet<String>,
    /// Minimum SGPA for the toppers list.
    pub topper_threshold: f64,
}

impl Default for GradingConfig {
    fn default() -> Self {
        GradingConfig {
            grade_points: Grade::VOCABULARY
                .iter()
                .filter_map(|g| g.default_points().map(|p| (g.clone(), p)))
                .collect(),
            credits: CREDITS.iter().map(|(c, w)| (c.to_string(), *w)).collect(),
            departments: DEPARTMENTS
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
            non_credit_courses: NON_CREDIT_COURSES.iter().map(|c| c.to_string()).collect(),
            topper_threshold: DEFAULT_TOPPER_THRESHOLD,
        }
    }
}

impl GradingConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read grading config {}", path.display()))?;
        let config = Self::from_json(&content)
            .with_context(|| format!("invalid grading config {}", path.display()))?;
        debug!(
            path = %path.display(),
            courses = config.credits.len(),
            departments = config.departments.len(),
            "Grading config loaded"
        );
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn credit_for(&self, course_code: &str) -> Option<f64> {
        self.credits.get(course_code).copied()
    }

    pub fn points_for(&self, grade: &Grade) -> Option<f64> {
        self.grade_points.get(grade).copied()
    }

    pub fn department_name(&self, code: &str) -> Option<&str> {
        self.departments.get(code).map(String::as_str)
    }

    pub fn is_non_credit(&self, course_code: &str) -> bool {
        self.non_credit_courses.contains(course_code)
    }
}
