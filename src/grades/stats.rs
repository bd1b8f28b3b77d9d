//! Aggregates over a slice of student records.
//!
//! Every function here is pure and tolerates an empty slice: lookups return
//! `None`, filters return an empty `Vec`, and the average is `0.0`.

use super::calculator::{classify_grade, Grade};
use super::record::StudentRecord;

/// The record with the highest final score. Ties go to the earliest record.
pub fn highest_scoring(records: &[StudentRecord]) -> Option<&StudentRecord> {
    records.iter().reduce(|best, candidate| {
        if candidate.final_score() > best.final_score() {
            candidate
        } else {
            best
        }
    })
}

/// The record with the lowest final score. Ties go to the earliest record.
pub fn lowest_scoring(records: &[StudentRecord]) -> Option<&StudentRecord> {
    records.iter().reduce(|worst, candidate| {
        if candidate.final_score() < worst.final_score() {
            candidate
        } else {
            worst
        }
    })
}

/// Records holding `grade`, in their original order.
pub fn filter_by_grade(records: &[StudentRecord], grade: Grade) -> Vec<&StudentRecord> {
    records.iter().filter(|r| r.grade() == grade).collect()
}

/// Like [`filter_by_grade`] but takes the grade as free text (`"b"`, `" C "`).
/// Text that does not parse as a grade matches nothing.
pub fn filter_by_grade_str<'a>(records: &'a [StudentRecord], grade: &str) -> Vec<&'a StudentRecord> {
    match grade.parse::<Grade>() {
        Ok(grade) => filter_by_grade(records, grade),
        Err(_) => Vec::new(),
    }
}

/// Mean final score; `0.0` when there are no records.
pub fn class_average(records: &[StudentRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: f64 = records.iter().map(StudentRecord::final_score).sum();
    total / records.len() as f64
}

/// Grade band of the class average.
pub fn class_grade(records: &[StudentRecord]) -> Grade {
    classify_grade(class_average(records))
}

/// Number of records per grade band.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeDistribution {
    counts: [usize; 5],
    total: usize,
}

impl GradeDistribution {
    /// Records that received `grade`.
    pub fn count(&self, grade: Grade) -> usize {
        self.counts[Self::slot(grade)]
    }

    /// Records counted overall.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Share of records with `grade`, in percent. Every grade reports `0.0`
    /// when the distribution is empty.
    pub fn percentage(&self, grade: Grade) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(grade) as f64 / self.total as f64 * 100.0
    }

    /// `(grade, count)` pairs in display order, A first.
    pub fn iter(&self) -> impl Iterator<Item = (Grade, usize)> + '_ {
        Grade::ALL.iter().map(move |&grade| (grade, self.count(grade)))
    }

    fn slot(grade: Grade) -> usize {
        match grade {
            Grade::A => 0,
            Grade::B => 1,
            Grade::C => 2,
            Grade::D => 3,
            Grade::E => 4,
        }
    }
}

/// Count records per grade over the fixed set A..E.
pub fn grade_distribution(records: &[StudentRecord]) -> GradeDistribution {
    let mut distribution = GradeDistribution::default();
    for record in records {
        distribution.counts[GradeDistribution::slot(record.grade())] += 1;
        distribution.total += 1;
    }
    distribution
}

/// Everything the statistics panel shows, computed in one pass over the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSummary {
    pub total: usize,
    pub average: f64,
    pub class_grade: Grade,
    pub highest: Option<StudentRecord>,
    pub lowest: Option<StudentRecord>,
    pub distribution: GradeDistribution,
}

impl ClassSummary {
    pub fn from_records(records: &[StudentRecord]) -> Self {
        Self {
            total: records.len(),
            average: class_average(records),
            class_grade: class_grade(records),
            highest: highest_scoring(records).cloned(),
            lowest: lowest_scoring(records).cloned(),
            distribution: grade_distribution(records),
        }
    }
}
