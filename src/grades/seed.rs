use super::record::StudentRecord;

/// Raw rows for the demo class: name, student id, midterm, final exam,
/// assignment.
const SAMPLE_ROWS: &[(&str, &str, f64, f64, f64)] = &[
    ("Budi Santoso", "2024001", 85.0, 90.0, 88.0),
    ("Siti Aminah", "2024002", 78.0, 82.0, 80.0),
    ("Ahmad Rizki", "2024003", 92.0, 88.0, 95.0),
    ("Dewi Lestari", "2024004", 65.0, 70.0, 68.0),
    ("Eko Prasetyo", "2024005", 45.0, 50.0, 48.0),
];

/// Build a fresh copy of the demo class. Rows that fail validation are
/// skipped, which never happens for the bundled data.
pub fn sample_students() -> Vec<StudentRecord> {
    SAMPLE_ROWS
        .iter()
        .filter_map(|&(name, id, midterm, final_exam, assignment)| {
            StudentRecord::new(name, id, midterm, final_exam, assignment).ok()
        })
        .collect()
}
