use crate::error::{require_score, require_text, ValidationError};

use super::calculator::{classify_grade, compute_final_score, Grade};

/// One student's component scores plus the values derived from them.
///
/// Records are immutable once built: `final_score` and `grade` are computed in
/// the constructor and the fields are only reachable through accessors, so the
/// derived values can never drift from the inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    name: String,
    id: String,
    midterm_score: f64,
    final_exam_score: f64,
    assignment_score: f64,
    final_score: f64,
    grade: Grade,
}

impl StudentRecord {
    /// Validate the raw values and derive the final score and grade.
    ///
    /// Name and id are trimmed and must be non-empty; each score must be a
    /// finite number in `0..=100`.
    pub fn new(
        name: &str,
        id: &str,
        midterm_score: f64,
        final_exam_score: f64,
        assignment_score: f64,
    ) -> Result<Self, ValidationError> {
        let name = require_text("Name", name)?;
        let id = require_text("Student id", id)?;
        let midterm_score = require_score("Midterm score", midterm_score)?;
        let final_exam_score = require_score("Final exam score", final_exam_score)?;
        let assignment_score = require_score("Assignment score", assignment_score)?;

        let final_score = compute_final_score(midterm_score, final_exam_score, assignment_score);
        Ok(Self {
            name,
            id,
            midterm_score,
            final_exam_score,
            assignment_score,
            final_score,
            grade: classify_grade(final_score),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn midterm_score(&self) -> f64 {
        self.midterm_score
    }

    pub fn final_exam_score(&self) -> f64 {
        self.final_exam_score
    }

    pub fn assignment_score(&self) -> f64 {
        self.assignment_score
    }

    /// Weighted score rounded to two decimals.
    pub fn final_score(&self) -> f64 {
        self.final_score
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_score_and_grade() {
        let record = StudentRecord::new("Budi Santoso", "2024001", 85.0, 90.0, 88.0).unwrap();
        assert!((record.final_score() - 87.9).abs() < 1e-9);
        assert_eq!(record.grade(), Grade::A);
        assert_eq!(record.name(), "Budi Santoso");
        assert_eq!(record.id(), "2024001");
    }

    #[test]
    fn grade_follows_the_rounded_score() {
        // 79.996 before rounding
        let record = StudentRecord::new("Edge", "X1", 80.0, 79.99, 80.0).unwrap();
        assert!((record.final_score() - 80.0).abs() < 1e-9);
        assert_eq!(record.grade(), Grade::A);
    }

    #[test]
    fn trims_text_fields() {
        let record = StudentRecord::new("  Siti ", " 2024002 ", 78.0, 82.0, 80.0).unwrap();
        assert_eq!(record.name(), "Siti");
        assert_eq!(record.id(), "2024002");
    }

    #[test]
    fn rejects_blank_name_and_id() {
        assert_eq!(
            StudentRecord::new(" ", "1", 50.0, 50.0, 50.0),
            Err(ValidationError::EmptyField("Name"))
        );
        assert_eq!(
            StudentRecord::new("Ana", "", 50.0, 50.0, 50.0),
            Err(ValidationError::EmptyField("Student id"))
        );
    }

    #[test]
    fn rejects_scores_out_of_range() {
        let err = StudentRecord::new("Ana", "1", 50.0, 101.0, 50.0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ScoreOutOfRange {
                field: "Final exam score",
                value: 101.0
            }
        );
        assert!(StudentRecord::new("Ana", "1", -0.5, 50.0, 50.0).is_err());
        assert!(StudentRecord::new("Ana", "1", 50.0, 50.0, f64::INFINITY).is_err());
    }
}
