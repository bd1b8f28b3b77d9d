//! Weighted final score and grade banding.

use std::fmt;
use std::str::FromStr;

/// Weight of the midterm exam in the final score.
pub const MIDTERM_WEIGHT: f64 = 0.3;
/// Weight of the final exam in the final score.
pub const FINAL_EXAM_WEIGHT: f64 = 0.4;
/// Weight of the assignment average in the final score.
pub const ASSIGNMENT_WEIGHT: f64 = 0.3;

/// Letter grade derived from a final score.
///
/// Variants are declared from lowest to highest so the derived ordering ranks
/// `E < D < C < B < A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    E,
    D,
    C,
    B,
    A,
}

impl Grade {
    /// Every grade in display order, best first.
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::E];

    /// Single-letter form used in tables and prompts.
    pub fn letter(self) -> char {
        match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
            Grade::E => 'E',
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Returned when text does not name one of the five grades.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a grade (expected A, B, C, D or E)")]
pub struct ParseGradeError(pub String);

impl FromStr for Grade {
    type Err = ParseGradeError;

    /// Parse a grade letter, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "E" => Ok(Grade::E),
            _ => Err(ParseGradeError(s.trim().to_string())),
        }
    }
}

/// Combine the three component scores with the fixed 30/40/30 weights and
/// round to two decimals.
///
/// Inputs are not clamped; callers validate the `0..=100` range before
/// building a record.
pub fn compute_final_score(midterm: f64, final_exam: f64, assignment: f64) -> f64 {
    let weighted = midterm * MIDTERM_WEIGHT
        + final_exam * FINAL_EXAM_WEIGHT
        + assignment * ASSIGNMENT_WEIGHT;
    round2(weighted)
}

/// Map a final score onto its grade band. Total over every `f64`; `NaN` lands
/// in `E`.
pub fn classify_grade(final_score: f64) -> Grade {
    if final_score >= 80.0 {
        Grade::A
    } else if final_score >= 70.0 {
        Grade::B
    } else if final_score >= 60.0 {
        Grade::C
    } else if final_score >= 50.0 {
        Grade::D
    } else {
        Grade::E
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
