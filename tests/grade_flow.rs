//! End-to-end grade book scenarios through the public API.

use coursework_desk::grades::{
    classify_grade, filter_by_grade_str, ClassSummary, Grade, GradeBook, StudentRecord,
};
use coursework_desk::ValidationError;

fn record(name: &str, midterm: f64, final_exam: f64, assignment: f64) -> StudentRecord {
    StudentRecord::new(name, name, midterm, final_exam, assignment).unwrap()
}

#[test]
fn three_student_class() {
    let mut book = GradeBook::new();
    book.add_record(record("Ani", 80.0, 85.0, 82.0));
    book.add_record(record("Bayu", 70.0, 70.0, 70.0));
    book.add_record(record("Citra", 50.0, 60.0, 55.0));

    let scores: Vec<f64> = book.list_all().iter().map(StudentRecord::final_score).collect();
    // 24 + 34 + 24.6, 70, 15 + 24 + 16.5
    assert_eq!(scores, vec![82.6, 70.0, 55.5]);

    let summary = book.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.highest.as_ref().map(StudentRecord::name), Some("Ani"));
    assert_eq!(summary.lowest.as_ref().map(StudentRecord::name), Some("Citra"));
    assert_eq!(summary.distribution.count(Grade::A), 1);
    assert_eq!(summary.distribution.count(Grade::B), 1);
    assert_eq!(summary.distribution.count(Grade::D), 1);
    assert_eq!(summary.class_grade, classify_grade(summary.average));
}

#[test]
fn free_text_grade_filter() {
    let book = GradeBook::with_sample_data();
    assert_eq!(filter_by_grade_str(book.list_all(), "a").len(), 3);
    assert_eq!(filter_by_grade_str(book.list_all(), " E ").len(), 1);
    assert!(filter_by_grade_str(book.list_all(), "F").is_empty());
    assert!(filter_by_grade_str(book.list_all(), "").is_empty());
}

#[test]
fn invalid_scores_are_rejected() {
    let err = StudentRecord::new("Dina", "9", 101.0, 50.0, 50.0).unwrap_err();
    assert!(matches!(err, ValidationError::ScoreOutOfRange { .. }));

    let err = StudentRecord::new("  ", "9", 50.0, 50.0, 50.0).unwrap_err();
    assert_eq!(err, ValidationError::EmptyField("Name"));
}

#[test]
fn empty_class_summary() {
    let summary = ClassSummary::from_records(&[]);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.average, 0.0);
    assert!(summary.highest.is_none());
    assert_eq!(summary.distribution.percentage(Grade::A), 0.0);
}
