use result_analyzer::analyzers::grade::Grade;
use result_analyzer::record::{ExamType, ResultStatus};
use result_analyzer::{
    GradingConfig, StudentRecord, TranscriptError, analyze_department, analyze_transcript,
    parse_transcript,
};

const CS: &str = "COMPUTER SCIENCE & ENGINEERING";
const EE: &str = "ELECTRICAL AND ELECTRONICS ENGINEERING";

fn sample_text() -> &'static str {
    include_str!("fixtures/sample_transcript.txt")
}

fn find<'a>(students: &'a [StudentRecord], register_no: &str) -> &'a StudentRecord {
    students
        .iter()
        .find(|s| s.register_no == register_no)
        .expect("student present")
}

#[test]
fn test_full_pipeline() {
    let config = GradingConfig::default();
    let result = parse_transcript(sample_text(), &config).expect("Failed to parse transcript");

    assert_eq!(result.semester, "S3");
    assert_eq!(result.exam_type, ExamType::Regular);
    assert_eq!(result.exam_date, "November 2023");
    assert_eq!(result.batch, 22);
    assert_eq!(result.student_count(), 9);

    let names: Vec<&str> = result.departments.keys().map(String::as_str).collect();
    assert_eq!(names, vec![CS, EE, "OTHER"]);

    let cs = &result.departments[CS];
    let order: Vec<&str> = cs.iter().map(|s| s.register_no.as_str()).collect();
    assert_eq!(
        order,
        vec!["TCR22CS061", "TCR22CS062", "TCR22CS063", "TCR21CS040", "LTCR22CS072"]
    );
}

#[test]
fn test_multi_line_students_are_graded() {
    let config = GradingConfig::default();
    let result = parse_transcript(sample_text(), &config).unwrap();
    let cs = &result.departments[CS];

    let s061 = find(cs, "TCR22CS061");
    assert_eq!(s061.grades.len(), 8);
    assert_eq!(s061.grades["MCN201"], Grade::P);
    let codes: Vec<&str> = s061.grades.keys().map(String::as_str).collect();
    assert_eq!(
        codes,
        vec!["CST201", "CST203", "CST205", "MAT203", "EST200", "CSL201", "CSL203", "MCN201"]
    );
    // 199 points over 22 credits
    assert_eq!(s061.sgpa, Some(9.05));
    assert_eq!(s061.status, ResultStatus::Pass);

    let s062 = find(cs, "TCR22CS062");
    assert_eq!(s062.sgpa, Some(0.0));
    assert!(!s062.eligible);
    assert_eq!(s062.failed_subjects, "CST203, MAT203, MCN201*");
    assert_eq!(s062.status, ResultStatus::Fail);

    let s063 = find(cs, "TCR22CS063");
    assert_eq!(s063.sgpa, Some(9.64));
}

#[test]
fn test_block_closed_by_page_marker() {
    let config = GradingConfig::default();
    let result = parse_transcript(sample_text(), &config).unwrap();
    let s063 = find(&result.departments[CS], "TCR22CS063");
    assert_eq!(s063.grades.len(), 8);
}

#[test]
fn test_supplementary_and_special_grades() {
    let config = GradingConfig::default();
    let result = parse_transcript(sample_text(), &config).unwrap();
    let cs = &result.departments[CS];

    let supplementary = find(cs, "TCR21CS040");
    assert!(!supplementary.regular);
    assert_eq!(supplementary.sgpa, Some(0.0));
    assert_eq!(supplementary.status, ResultStatus::Pass);

    let incomplete = find(cs, "LTCR22CS072");
    assert!(incomplete.regular);
    assert!(!incomplete.eligible);
    assert_eq!(incomplete.sgpa, Some(0.0));
    assert_eq!(incomplete.failed_subjects, "EST200");
}

#[test]
fn test_unknown_department_goes_to_other() {
    let config = GradingConfig::default();
    let result = parse_transcript(sample_text(), &config).unwrap();
    let other = &result.departments["OTHER"];
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].register_no, "TCR22XY001");
    assert_eq!(other[0].sgpa, Some(10.0));
}

#[test]
fn test_departments_are_analyzed_independently() {
    let config = GradingConfig::default();
    let result = parse_transcript(sample_text(), &config).unwrap();
    let report = analyze_transcript(&result, config.topper_threshold);

    assert_eq!(report.batch, 22);
    assert_eq!(report.departments.len(), 3);

    let cs = &report.departments[CS];
    assert_eq!(cs.total_students, 5);
    assert_eq!(cs.regular_students, 4);
    assert_eq!(cs.supplementary_students, 1);
    assert_eq!(cs.regular.pass_count, 2);
    assert_eq!(cs.regular.fail_count, 2);
    assert_eq!(cs.regular.pass_percentage, 50.0);
    assert_eq!(cs.regular.average_sgpa, 4.67);
    assert_eq!(cs.overall.pass_count, 3);
    assert_eq!(cs.overall.average_sgpa, 3.74);
    assert_eq!(cs.overall.topper.as_ref().unwrap().register_no, "TCR22CS063");
    let toppers: Vec<&str> = cs.toppers.iter().map(|t| t.register_no.as_str()).collect();
    assert_eq!(toppers, vec!["TCR22CS063", "TCR22CS061"]);

    let ee = &report.departments[EE];
    assert_eq!(ee.total_students, 3);
    assert_eq!(ee.regular_students, 2);
    assert_eq!(ee.regular.fail_count, 1);
    assert_eq!(ee.overall.topper.as_ref().unwrap().register_no, "TCR22EE004");
    assert!(ee.subject_wise.keys().all(|code| !code.starts_with("CST")));
    assert_eq!(ee.subject_wise["EET201"].total_students, 3);
    assert_eq!(ee.subject_wise["EET201"].failed_students, vec!["TCR22EE011".to_string()]);
}

#[test]
fn test_separate_entry_point_matches_report() {
    let config = GradingConfig::default();
    let result = parse_transcript(sample_text(), &config).unwrap();
    let report = analyze_transcript(&result, config.topper_threshold);

    let direct = analyze_department(&result.departments[CS], result.batch);
    assert_eq!(direct, report.departments[CS]);
}

#[test]
fn test_exported_records_analyze_the_same() {
    let config = GradingConfig::default();
    let result = parse_transcript(sample_text(), &config).unwrap();
    let cs = &result.departments[CS];

    let json = serde_json::to_string(cs).unwrap();
    let reloaded: Vec<StudentRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(&reloaded, cs);
    assert_eq!(analyze_department(&reloaded, 22), analyze_department(cs, 22));
}

#[test]
fn test_parsing_is_idempotent() {
    let config = GradingConfig::default();
    let first = parse_transcript(sample_text(), &config).unwrap();
    let second = parse_transcript(sample_text(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_single_student_sgpa() {
    let text = "B.Tech S3 Exam November 2023 Regular\nTCR22CS061 CST201(S) CST203(A)";
    let result = parse_transcript(text, &GradingConfig::default()).unwrap();
    assert_eq!(result.batch, 22);
    assert_eq!(result.departments[CS][0].sgpa, Some(9.25));
}

#[test]
fn test_structural_failures() {
    let config = GradingConfig::default();
    assert_eq!(parse_transcript("", &config), Err(TranscriptError::EmptyInput));
    assert_eq!(
        parse_transcript("B.Tech S3 Exam November 2023\nno students here", &config),
        Err(TranscriptError::NoStudents)
    );
    assert!(matches!(
        parse_transcript("TCR22CS061 CST201(S)", &config),
        Err(TranscriptError::BatchUndetermined(_))
    ));
}

#[test]
fn test_config_override_changes_credits() {
    let config = GradingConfig::from_json(r#"{"credits": {"CST201": 1, "CST203": 3}}"#).unwrap();
    let text = "B.Tech S3 Exam November 2023 Regular\nTCR22CS061 CST201(S) CST203(A)";
    let result = parse_transcript(text, &config).unwrap();
    // (10 * 1 + 8.5 * 3) / 4 = 8.875
    assert_eq!(result.departments[CS][0].sgpa, Some(8.88));
}
