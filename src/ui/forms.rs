use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::grades::{Grade, StudentRecord};
use crate::library::LibraryItem;

/// Build one `Label: value` line, highlighting the focused field and greying
/// out empty ones.
fn field_line(label: &str, value: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        "<required>".to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(display, style),
    ])
}

/// Accept printable characters; numeric fields additionally restrict the
/// character set.
fn accepts(ch: char, numeric: Numeric) -> bool {
    match numeric {
        Numeric::No => !ch.is_control(),
        Numeric::Decimal => ch.is_ascii_digit() || ch == '.',
        Numeric::Integer => ch.is_ascii_digit(),
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Numeric {
    No,
    Decimal,
    Integer,
}

fn parse_score(label: &str, raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(anyhow!("{label} is required."));
    }
    raw.parse::<f64>()
        .with_context(|| format!("{label} must be a number."))
}

fn parse_whole<T: std::str::FromStr>(label: &str, raw: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(anyhow!("{label} is required."));
    }
    raw.parse::<T>()
        .with_context(|| format!("{label} must be a whole number."))
}

/// Fields of the "add student" form, in tab order.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub(crate) enum StudentField {
    #[default]
    Name,
    Id,
    Midterm,
    FinalExam,
    Assignment,
}

impl StudentField {
    const ORDER: [StudentField; 5] = [
        StudentField::Name,
        StudentField::Id,
        StudentField::Midterm,
        StudentField::FinalExam,
        StudentField::Assignment,
    ];

    fn label(self) -> &'static str {
        match self {
            StudentField::Name => "Name",
            StudentField::Id => "Student ID",
            StudentField::Midterm => "Midterm (0-100)",
            StudentField::FinalExam => "Final exam (0-100)",
            StudentField::Assignment => "Assignment (0-100)",
        }
    }

    fn numeric(self) -> Numeric {
        match self {
            StudentField::Name | StudentField::Id => Numeric::No,
            _ => Numeric::Decimal,
        }
    }
}

/// Raw text typed into the student form.
#[derive(Default, Clone, Debug)]
pub(crate) struct StudentForm {
    pub(crate) name: String,
    pub(crate) id: String,
    pub(crate) midterm: String,
    pub(crate) final_exam: String,
    pub(crate) assignment: String,
    pub(crate) active: StudentField,
    pub(crate) error: Option<String>,
}

impl StudentForm {
    fn value(&self, field: StudentField) -> &String {
        match field {
            StudentField::Name => &self.name,
            StudentField::Id => &self.id,
            StudentField::Midterm => &self.midterm,
            StudentField::FinalExam => &self.final_exam,
            StudentField::Assignment => &self.assignment,
        }
    }

    fn value_mut(&mut self, field: StudentField) -> &mut String {
        match field {
            StudentField::Name => &mut self.name,
            StudentField::Id => &mut self.id,
            StudentField::Midterm => &mut self.midterm,
            StudentField::FinalExam => &mut self.final_exam,
            StudentField::Assignment => &mut self.assignment,
        }
    }

    /// Move focus forward (`step = 1`) or backward (`step = -1`), wrapping.
    pub(crate) fn cycle_field(&mut self, step: isize) {
        let len = StudentField::ORDER.len() as isize;
        let current = StudentField::ORDER
            .iter()
            .position(|&f| f == self.active)
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.active = StudentField::ORDER[next];
    }

    /// Append a character to the active field, validating allowed input.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if accepts(ch, self.active.numeric()) {
            self.value_mut(self.active).push(ch);
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.value_mut(self.active).pop();
    }

    /// Turn the typed text into a validated record.
    pub(crate) fn parse_inputs(&self) -> Result<StudentRecord> {
        let midterm = parse_score("Midterm score", &self.midterm)?;
        let final_exam = parse_score("Final exam score", &self.final_exam)?;
        let assignment = parse_score("Assignment score", &self.assignment)?;
        let record = StudentRecord::new(&self.name, &self.id, midterm, final_exam, assignment)?;
        Ok(record)
    }

    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        StudentField::ORDER
            .iter()
            .map(|&field| field_line(field.label(), self.value(field), field == self.active))
            .collect()
    }

    /// `(column, row)` of the cursor relative to the form's inner area.
    pub(crate) fn cursor_offset(&self) -> (u16, u16) {
        let row = StudentField::ORDER
            .iter()
            .position(|&f| f == self.active)
            .unwrap_or(0);
        let prefix = self.active.label().chars().count() + 2;
        let column = prefix + self.value(self.active).chars().count();
        (column as u16, row as u16)
    }
}

/// Which item variant an [`ItemForm`] creates.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum ItemFormKind {
    Book,
    Magazine,
}

impl ItemFormKind {
    pub(crate) fn title(self) -> &'static str {
        match self {
            ItemFormKind::Book => "Add Book",
            ItemFormKind::Magazine => "Add Magazine",
        }
    }
}

/// Fields of the book/magazine form, in tab order.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub(crate) enum ItemField {
    #[default]
    Id,
    Title,
    Creator,
    Year,
    Number,
}

impl ItemField {
    const ORDER: [ItemField; 5] = [
        ItemField::Id,
        ItemField::Title,
        ItemField::Creator,
        ItemField::Year,
        ItemField::Number,
    ];

    fn label(self, kind: ItemFormKind) -> &'static str {
        match (self, kind) {
            (ItemField::Id, ItemFormKind::Book) => "Book ID (e.g. B001)",
            (ItemField::Id, ItemFormKind::Magazine) => "Magazine ID (e.g. M001)",
            (ItemField::Title, _) => "Title",
            (ItemField::Creator, ItemFormKind::Book) => "Author",
            (ItemField::Creator, ItemFormKind::Magazine) => "Publisher",
            (ItemField::Year, _) => "Year",
            (ItemField::Number, ItemFormKind::Book) => "Pages",
            (ItemField::Number, ItemFormKind::Magazine) => "Issue number",
        }
    }

    fn numeric(self) -> Numeric {
        match self {
            ItemField::Year | ItemField::Number => Numeric::Integer,
            _ => Numeric::No,
        }
    }
}

/// Raw text typed into the book/magazine form.
#[derive(Clone, Debug)]
pub(crate) struct ItemForm {
    pub(crate) kind: ItemFormKind,
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) creator: String,
    pub(crate) year: String,
    pub(crate) number: String,
    pub(crate) active: ItemField,
    pub(crate) error: Option<String>,
}

impl ItemForm {
    pub(crate) fn new(kind: ItemFormKind) -> Self {
        Self {
            kind,
            id: String::new(),
            title: String::new(),
            creator: String::new(),
            year: String::new(),
            number: String::new(),
            active: ItemField::default(),
            error: None,
        }
    }

    fn value(&self, field: ItemField) -> &String {
        match field {
            ItemField::Id => &self.id,
            ItemField::Title => &self.title,
            ItemField::Creator => &self.creator,
            ItemField::Year => &self.year,
            ItemField::Number => &self.number,
        }
    }

    fn value_mut(&mut self, field: ItemField) -> &mut String {
        match field {
            ItemField::Id => &mut self.id,
            ItemField::Title => &mut self.title,
            ItemField::Creator => &mut self.creator,
            ItemField::Year => &mut self.year,
            ItemField::Number => &mut self.number,
        }
    }

    pub(crate) fn cycle_field(&mut self, step: isize) {
        let len = ItemField::ORDER.len() as isize;
        let current = ItemField::ORDER
            .iter()
            .position(|&f| f == self.active)
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.active = ItemField::ORDER[next];
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if accepts(ch, self.active.numeric()) {
            self.value_mut(self.active).push(ch);
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.value_mut(self.active).pop();
    }

    /// Turn the typed text into a validated, available item.
    pub(crate) fn parse_inputs(&self) -> Result<LibraryItem> {
        let year: i32 = parse_whole("Year", &self.year)?;
        let item = match self.kind {
            ItemFormKind::Book => {
                let pages: u32 = parse_whole("Pages", &self.number)?;
                LibraryItem::book(&self.id, &self.title, &self.creator, year, pages)?
            }
            ItemFormKind::Magazine => {
                let issue: u32 = parse_whole("Issue number", &self.number)?;
                LibraryItem::magazine(&self.id, &self.title, &self.creator, year, issue)?
            }
        };
        Ok(item)
    }

    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        ItemField::ORDER
            .iter()
            .map(|&field| {
                field_line(
                    field.label(self.kind),
                    self.value(field),
                    field == self.active,
                )
            })
            .collect()
    }

    pub(crate) fn cursor_offset(&self) -> (u16, u16) {
        let row = ItemField::ORDER
            .iter()
            .position(|&f| f == self.active)
            .unwrap_or(0);
        let prefix = self.active.label(self.kind).chars().count() + 2;
        let column = prefix + self.value(self.active).chars().count();
        (column as u16, row as u16)
    }
}

/// What a single-line prompt is collecting input for.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum PromptPurpose {
    GradeFilter,
    TitleSearch,
    FindById,
    Borrow,
    Return,
}

impl PromptPurpose {
    pub(crate) fn title(self) -> &'static str {
        match self {
            PromptPurpose::GradeFilter => "Filter by Grade",
            PromptPurpose::TitleSearch => "Search by Title",
            PromptPurpose::FindById => "Find by ID",
            PromptPurpose::Borrow => "Borrow Item",
            PromptPurpose::Return => "Return Item",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            PromptPurpose::GradeFilter => "Grade (A/B/C/D/E)",
            PromptPurpose::TitleSearch => "Title keyword",
            PromptPurpose::FindById | PromptPurpose::Borrow | PromptPurpose::Return => {
                "Item ID"
            }
        }
    }
}

/// Single-line text prompt.
#[derive(Clone, Debug)]
pub(crate) struct Prompt {
    pub(crate) purpose: PromptPurpose,
    pub(crate) input: String,
    pub(crate) error: Option<String>,
}

impl Prompt {
    pub(crate) fn new(purpose: PromptPurpose) -> Self {
        Self {
            purpose,
            input: String::new(),
            error: None,
        }
    }

    /// Prefill the prompt, used when the selected row already names an item.
    pub(crate) fn with_input(purpose: PromptPurpose, input: &str) -> Self {
        Self {
            input: input.to_string(),
            ..Self::new(purpose)
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.input.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.input.pop();
    }

    /// The trimmed input, rejecting an empty answer.
    pub(crate) fn required_value(&self) -> Result<&str> {
        let value = self.input.trim();
        if value.is_empty() {
            Err(anyhow!("{} is required.", self.purpose.label()))
        } else {
            Ok(value)
        }
    }

    /// Parse the input as a grade letter, case-insensitively.
    pub(crate) fn grade(&self) -> Result<Grade> {
        let raw = self.required_value()?;
        Ok(raw.parse::<Grade>()?)
    }

    pub(crate) fn line(&self) -> Line<'static> {
        field_line(self.purpose.label(), &self.input, true)
    }

    pub(crate) fn cursor_offset(&self) -> (u16, u16) {
        let prefix = self.purpose.label().chars().count() + 2;
        ((prefix + self.input.chars().count()) as u16, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(form: &mut StudentForm, text: &str) {
        for ch in text.chars() {
            form.push_char(ch);
        }
    }

    #[test]
    fn student_form_builds_a_record() {
        let mut form = StudentForm::default();
        type_text(&mut form, "Rina");
        form.cycle_field(1);
        type_text(&mut form, "2024010");
        form.cycle_field(1);
        type_text(&mut form, "80");
        form.cycle_field(1);
        type_text(&mut form, "90.5");
        form.cycle_field(1);
        type_text(&mut form, "70");

        let record = form.parse_inputs().unwrap();
        assert_eq!(record.name(), "Rina");
        // 24 + 36.2 + 21
        assert!((record.final_score() - 81.2).abs() < 1e-9);
        assert_eq!(record.grade(), Grade::A);
    }

    #[test]
    fn score_fields_reject_letters() {
        let mut form = StudentForm {
            active: StudentField::Midterm,
            ..StudentForm::default()
        };
        assert!(!form.push_char('x'));
        assert!(form.push_char('9'));
        assert_eq!(form.midterm, "9");
    }

    #[test]
    fn student_form_reports_missing_and_out_of_range_scores() {
        let form = StudentForm {
            name: "Rina".into(),
            id: "1".into(),
            midterm: "80".into(),
            final_exam: String::new(),
            assignment: "70".into(),
            ..StudentForm::default()
        };
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(err.to_string(), "Final exam score is required.");

        let form = StudentForm {
            final_exam: "150".into(),
            ..form
        };
        let err = form.parse_inputs().unwrap_err();
        assert!(err.to_string().contains("between 0 and 100"));
    }

    #[test]
    fn cycle_field_wraps_both_ways() {
        let mut form = StudentForm::default();
        form.cycle_field(-1);
        assert_eq!(form.active, StudentField::Assignment);
        form.cycle_field(1);
        assert_eq!(form.active, StudentField::Name);
    }

    #[test]
    fn magazine_form_builds_an_item() {
        let form = ItemForm {
            id: "M010".into(),
            title: "Intisari".into(),
            creator: "Kompas Gramedia".into(),
            year: "2023".into(),
            number: "7".into(),
            ..ItemForm::new(ItemFormKind::Magazine)
        };
        let item = form.parse_inputs().unwrap();
        assert_eq!(item.category(), "Magazine");
        assert_eq!(item.item_id(), "M010");
    }

    #[test]
    fn book_form_requires_author() {
        let form = ItemForm {
            id: "B010".into(),
            title: "Ronggeng".into(),
            year: "1982".into(),
            number: "400".into(),
            ..ItemForm::new(ItemFormKind::Book)
        };
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(err.to_string(), "Author must not be empty");
    }

    #[test]
    fn prompt_parses_grades_case_insensitively() {
        let prompt = Prompt::with_input(PromptPurpose::GradeFilter, " c ");
        assert_eq!(prompt.grade().unwrap(), Grade::C);

        let prompt = Prompt::with_input(PromptPurpose::GradeFilter, "z");
        assert!(prompt.grade().is_err());

        let prompt = Prompt::new(PromptPurpose::Borrow);
        assert_eq!(
            prompt.required_value().unwrap_err().to_string(),
            "Item ID is required."
        );
    }
}
