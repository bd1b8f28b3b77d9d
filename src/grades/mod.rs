//! Student grade tracker: weighted scoring, grade bands and class statistics
//! over an in-memory, append-only list of records.

mod calculator;
mod record;
pub mod seed;
mod stats;

use tracing::info;

pub use calculator::{
    classify_grade, compute_final_score, Grade, ParseGradeError, ASSIGNMENT_WEIGHT,
    FINAL_EXAM_WEIGHT, MIDTERM_WEIGHT,
};
pub use record::StudentRecord;
pub use stats::{
    class_average, class_grade, filter_by_grade, filter_by_grade_str, grade_distribution,
    highest_scoring, lowest_scoring, ClassSummary, GradeDistribution,
};

/// Ordered store of student records for one session.
#[derive(Debug, Clone, Default)]
pub struct GradeBook {
    records: Vec<StudentRecord>,
}

impl GradeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A grade book pre-filled with the demo class.
    pub fn with_sample_data() -> Self {
        Self {
            records: seed::sample_students(),
        }
    }

    /// Append a validated record. Student ids are not required to be unique.
    pub fn add_record(&mut self, record: StudentRecord) {
        info!(
            id = record.id(),
            final_score = record.final_score(),
            grade = %record.grade(),
            "student record added"
        );
        self.records.push(record);
    }

    /// Every record in insertion order.
    pub fn list_all(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn highest_scoring(&self) -> Option<&StudentRecord> {
        highest_scoring(&self.records)
    }

    pub fn lowest_scoring(&self) -> Option<&StudentRecord> {
        lowest_scoring(&self.records)
    }

    pub fn filter_by_grade(&self, grade: Grade) -> Vec<&StudentRecord> {
        filter_by_grade(&self.records, grade)
    }

    pub fn class_average(&self) -> f64 {
        class_average(&self.records)
    }

    pub fn grade_distribution(&self) -> GradeDistribution {
        grade_distribution(&self.records)
    }

    pub fn summary(&self) -> ClassSummary {
        ClassSummary::from_records(&self.records)
    }
}
