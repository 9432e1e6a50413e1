//! Grade-point computation and department aggregation.
//!
//! This module turns extracted grades into per-student SGPAs, then rolls
//! graded students up into per-department pass/fail counts, averages,
//! grade histograms, subject-wise results and rankings.

pub mod aggregate;
pub mod grade;
pub mod sgpa;
pub mod types;
pub mod utility;
