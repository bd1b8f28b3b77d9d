use std::mem;

use anyhow::{anyhow, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState,
    Wrap,
};
use ratatui::Frame;

use crate::config::{AppConfig, StartScreen};
use crate::grades::GradeBook;
use crate::library::{ItemKind, Library, LibraryItem};

use super::forms::{ItemForm, ItemFormKind, Prompt, PromptPurpose, StudentForm};
use super::helpers::{
    availability_style, centered_rect, format_component, format_score, grade_style,
    percentage_bar, surface_error,
};
use super::screens::{GradeView, GradesScreen, LibraryScreen, LibraryView};

/// Row reserved for the screen tabs.
const HEADER_HEIGHT: u16 = 1;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp/PageDown.
const PAGE_STEP: isize = 5;

/// The two record managers hosted by the UI.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Screen {
    Grades,
    Library,
}

/// Fine-grained modes layered over the current screen.
enum Mode {
    Normal,
    AddingStudent(StudentForm),
    AddingItem(ItemForm),
    Prompting(Prompt),
    Statistics,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state: both stores plus what the user is looking at.
pub struct App {
    grades: GradeBook,
    library: Library,
    screen: Screen,
    grades_screen: GradesScreen,
    library_screen: LibraryScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let mut library = Library::new(config.library_name.as_str());
        let grades = if config.seed_data {
            library.load_sample_data();
            GradeBook::with_sample_data()
        } else {
            GradeBook::new()
        };
        Self::from_stores(grades, library, config.start)
    }

    /// Wrap stores built elsewhere.
    pub fn from_stores(grades: GradeBook, library: Library, start: StartScreen) -> Self {
        Self {
            grades,
            library,
            screen: match start {
                StartScreen::Grades => Screen::Grades,
                StartScreen::Library => Screen::Library,
            },
            grades_screen: GradesScreen::default(),
            library_screen: LibraryScreen::default(),
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn grades(&self) -> &GradeBook {
        &self.grades
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::AddingStudent(form) => self.handle_student_form(code, form),
            Mode::AddingItem(form) => self.handle_item_form(code, form),
            Mode::Prompting(prompt) => self.handle_prompt(code, prompt),
            Mode::Statistics => Mode::Normal,
        };

        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') => {
                *exit = true;
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.clear_status();
                self.screen = match self.screen {
                    Screen::Grades => Screen::Library,
                    Screen::Library => Screen::Grades,
                };
                return Mode::Normal;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.clear_status();
                return Mode::Statistics;
            }
            _ => {}
        }

        match self.screen {
            Screen::Grades => self.handle_grades_key(code),
            Screen::Library => self.handle_library_key(code),
        }
    }

    fn handle_grades_key(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Up => self.grades_screen.move_selection(&self.grades, -1),
            KeyCode::Down => self.grades_screen.move_selection(&self.grades, 1),
            KeyCode::PageUp => self.grades_screen.move_selection(&self.grades, -PAGE_STEP),
            KeyCode::PageDown => self.grades_screen.move_selection(&self.grades, PAGE_STEP),
            KeyCode::Home => self.grades_screen.selected = 0,
            KeyCode::End => self.grades_screen.select_last(&self.grades),
            KeyCode::Char('+') | KeyCode::Char('a') => {
                self.clear_status();
                return Mode::AddingStudent(StudentForm::default());
            }
            KeyCode::Char('h') => self.show_extreme(GradeView::Highest),
            KeyCode::Char('l') => self.show_extreme(GradeView::Lowest),
            KeyCode::Char('g') => {
                self.clear_status();
                return Mode::Prompting(Prompt::new(PromptPurpose::GradeFilter));
            }
            KeyCode::Char('c') | KeyCode::Esc => {
                self.grades_screen.set_view(GradeView::All);
                self.clear_status();
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_library_key(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Up => self.library_screen.move_selection(&self.library, -1),
            KeyCode::Down => self.library_screen.move_selection(&self.library, 1),
            KeyCode::PageUp => self
                .library_screen
                .move_selection(&self.library, -PAGE_STEP),
            KeyCode::PageDown => self.library_screen.move_selection(&self.library, PAGE_STEP),
            KeyCode::Home => self.library_screen.selected = 0,
            KeyCode::End => self.library_screen.select_last(&self.library),
            KeyCode::Char('b') => {
                self.clear_status();
                return Mode::AddingItem(ItemForm::new(ItemFormKind::Book));
            }
            KeyCode::Char('m') => {
                self.clear_status();
                return Mode::AddingItem(ItemForm::new(ItemFormKind::Magazine));
            }
            KeyCode::Char('/') | KeyCode::Char('f') => {
                self.clear_status();
                return Mode::Prompting(Prompt::new(PromptPurpose::TitleSearch));
            }
            KeyCode::Char('i') => {
                self.clear_status();
                return Mode::Prompting(Prompt::new(PromptPurpose::FindById));
            }
            KeyCode::Char('o') => {
                self.clear_status();
                return Mode::Prompting(Prompt::with_input(
                    PromptPurpose::Borrow,
                    &self.selected_item_id().unwrap_or_default(),
                ));
            }
            KeyCode::Char('r') => {
                self.clear_status();
                return Mode::Prompting(Prompt::with_input(
                    PromptPurpose::Return,
                    &self.selected_item_id().unwrap_or_default(),
                ));
            }
            KeyCode::Enter => {
                let selected = self
                    .library_screen
                    .current(&self.library)
                    .map(|item| (item.item_id().to_string(), item.is_available()));
                match selected {
                    Some((item_id, true)) => self.borrow_by_id(&item_id),
                    Some((item_id, false)) => self.return_by_id(&item_id),
                    None => self.set_status("No item selected.", StatusKind::Error),
                }
            }
            KeyCode::Char('d') => {
                let added = self.library.load_sample_data();
                if added == 0 {
                    self.set_status("Sample data is already loaded.", StatusKind::Info);
                } else {
                    self.library_screen.set_view(LibraryView::All);
                    self.set_status(format!("Loaded {added} sample items."), StatusKind::Info);
                }
            }
            KeyCode::Char('c') | KeyCode::Esc => {
                self.library_screen.set_view(LibraryView::All);
                self.clear_status();
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_student_form(&mut self, code: KeyCode, mut form: StudentForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add student cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.cycle_field(1),
            KeyCode::BackTab | KeyCode::Up => form.cycle_field(-1),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_student(&form) {
                Ok(()) => return Mode::Normal,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::AddingStudent(form)
    }

    fn handle_item_form(&mut self, code: KeyCode, mut form: ItemForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add item cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.cycle_field(1),
            KeyCode::BackTab | KeyCode::Up => form.cycle_field(-1),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_item(&form) {
                Ok(()) => return Mode::Normal,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::AddingItem(form)
    }

    fn handle_prompt(&mut self, code: KeyCode, mut prompt: Prompt) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Enter => match self.submit_prompt(&prompt) {
                Ok(()) => return Mode::Normal,
                Err(err) => {
                    let message = surface_error(&err);
                    prompt.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if prompt.push_char(ch) {
                    prompt.error = None;
                }
            }
            _ => {}
        }
        Mode::Prompting(prompt)
    }

    /// Act on a confirmed prompt. Malformed input is returned as an error so
    /// the prompt stays open; lookups that simply find nothing close it with
    /// a status message.
    fn submit_prompt(&mut self, prompt: &Prompt) -> Result<()> {
        match prompt.purpose {
            PromptPurpose::GradeFilter => {
                let grade = prompt.grade()?;
                self.grades_screen.set_view(GradeView::Grade(grade));
                let count = self.grades.filter_by_grade(grade).len();
                if count == 0 {
                    self.set_status(format!("No students with grade {grade}."), StatusKind::Info);
                } else {
                    self.set_status(
                        format!("{count} student(s) with grade {grade}."),
                        StatusKind::Info,
                    );
                }
            }
            PromptPurpose::TitleSearch => {
                let keyword = prompt.required_value()?;
                let count = self.library.find_by_title(keyword).len();
                if count == 0 {
                    self.set_status(
                        format!("No item title contains '{keyword}'."),
                        StatusKind::Error,
                    );
                } else {
                    self.library_screen
                        .set_view(LibraryView::Title(keyword.to_string()));
                    self.set_status(format!("Found {count} item(s)."), StatusKind::Info);
                }
            }
            PromptPurpose::FindById => {
                let item_id = prompt.required_value()?;
                if self.library.find_by_id(item_id).is_some() {
                    self.library_screen
                        .set_view(LibraryView::Id(item_id.to_string()));
                    self.set_status(format!("Found item {item_id}."), StatusKind::Info);
                } else {
                    self.set_status(
                        format!("No item with ID '{item_id}'."),
                        StatusKind::Error,
                    );
                }
            }
            PromptPurpose::Borrow => {
                let item_id = prompt.required_value()?;
                self.borrow_by_id(item_id);
            }
            PromptPurpose::Return => {
                let item_id = prompt.required_value()?;
                self.return_by_id(item_id);
            }
        }
        Ok(())
    }

    fn save_new_student(&mut self, form: &StudentForm) -> Result<()> {
        let record = form.parse_inputs()?;
        let message = format!(
            "Added {} ({}): final score {}, grade {}.",
            record.name(),
            record.id(),
            format_score(record.final_score()),
            record.grade()
        );
        self.grades.add_record(record);
        self.grades_screen.select_newest(&self.grades);
        self.set_status(message, StatusKind::Info);
        Ok(())
    }

    fn save_new_item(&mut self, form: &ItemForm) -> Result<()> {
        let item = form.parse_inputs()?;
        let item_id = item.item_id().to_string();
        let title = item.title().to_string();
        if !self.library.add_item(item) {
            return Err(anyhow!("An item with ID '{item_id}' already exists."));
        }
        self.library_screen.select_item(&self.library, &item_id);
        self.set_status(format!("Added '{title}' to the catalog."), StatusKind::Info);
        Ok(())
    }

    fn show_extreme(&mut self, view: GradeView) {
        let (record, which) = match view {
            GradeView::Highest => (self.grades.highest_scoring(), "highest"),
            GradeView::Lowest => (self.grades.lowest_scoring(), "lowest"),
            GradeView::All | GradeView::Grade(_) => return,
        };
        match record {
            Some(record) => {
                let message = format!(
                    "{} has the {which} final score ({}).",
                    record.name(),
                    format_score(record.final_score())
                );
                self.grades_screen.set_view(view);
                self.set_status(message, StatusKind::Info);
            }
            None => self.set_status("No students recorded yet.", StatusKind::Error),
        }
    }

    fn borrow_by_id(&mut self, item_id: &str) {
        let Some(title) = self.library.find_by_id(item_id).map(|i| i.title().to_string()) else {
            self.set_status(format!("No item with ID '{item_id}'."), StatusKind::Error);
            return;
        };
        if self.library.borrow_item(item_id) {
            self.set_status(format!("Borrowed '{title}'."), StatusKind::Info);
        } else {
            self.set_status(format!("'{title}' is already on loan."), StatusKind::Error);
        }
    }

    fn return_by_id(&mut self, item_id: &str) {
        let Some((title, available)) = self
            .library
            .find_by_id(item_id)
            .map(|item| (item.title().to_string(), item.is_available()))
        else {
            self.set_status(format!("No item with ID '{item_id}'."), StatusKind::Error);
            return;
        };
        if available {
            self.set_status(format!("'{title}' is not on loan."), StatusKind::Error);
            return;
        }
        if self.library.return_item(item_id) {
            self.set_status(
                format!("Returned '{title}'. Thank you!"),
                StatusKind::Info,
            );
        } else {
            self.set_status(format!("Could not return '{title}'."), StatusKind::Error);
        }
    }

    fn selected_item_id(&self) -> Option<String> {
        self.library_screen
            .current(&self.library)
            .map(|item| item.item_id().to_string())
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        match self.screen {
            Screen::Grades => self.draw_grades(frame, chunks[1]),
            Screen::Library => self.draw_library(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::Normal => {}
            Mode::AddingStudent(form) => self.draw_student_form(frame, area, form),
            Mode::AddingItem(form) => self.draw_item_form(frame, area, form),
            Mode::Prompting(prompt) => self.draw_prompt(frame, area, prompt),
            Mode::Statistics => match self.screen {
                Screen::Grades => self.draw_grade_statistics(frame, area),
                Screen::Library => self.draw_library_statistics(frame, area),
            },
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let tab = |label: &'static str, active: bool| {
            if active {
                Span::styled(
                    format!(" {label} "),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!(" {label} "), Style::default().fg(Color::Gray))
            }
        };
        let line = Line::from(vec![
            tab("Grades", self.screen == Screen::Grades),
            Span::raw(" "),
            tab("Library", self.screen == Screen::Library),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_grades(&self, frame: &mut Frame, area: Rect) {
        let rows = self.grades_screen.rows(&self.grades);
        let block = Block::default().borders(Borders::ALL).title(format!(
            "{} ({})",
            self.grades_screen.view.title(),
            rows.len()
        ));

        if rows.is_empty() {
            let message = Paragraph::new("No students to show. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new([
            "No", "Name", "ID", "Midterm", "Final", "Assign.", "Score", "Grade",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let table_rows = rows.iter().enumerate().map(|(idx, record)| {
            Row::new(vec![
                Cell::from((idx + 1).to_string()),
                Cell::from(record.name().to_string()),
                Cell::from(record.id().to_string()),
                Cell::from(format_component(record.midterm_score())),
                Cell::from(format_component(record.final_exam_score())),
                Cell::from(format_component(record.assignment_score())),
                Cell::from(format_score(record.final_score())),
                Cell::from(Span::styled(
                    record.grade().to_string(),
                    grade_style(record.grade()),
                )),
            ])
        });

        let widths = [
            Constraint::Length(4),
            Constraint::Min(18),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
        ];

        let table = Table::new(table_rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = TableState::default().with_selected(Some(self.grades_screen.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_library(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let rows = self.library_screen.rows(&self.library);
        let block = Block::default().borders(Borders::ALL).title(format!(
            "{} - {} ({})",
            self.library.name(),
            self.library_screen.view.title(),
            rows.len()
        ));

        if rows.is_empty() {
            let message = Paragraph::new(
                "Nothing to show. Press 'b' or 'm' to add items, or 'd' for sample data.",
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(message, chunks[0]);
        } else {
            let items: Vec<ListItem> = rows
                .iter()
                .map(|item| {
                    ListItem::new(Line::from(vec![
                        Span::raw(format!(
                            "[{}] {} ({}) ",
                            item.item_id(),
                            item.title(),
                            item.year()
                        )),
                        Span::styled(item.state().label(), availability_style(item.state())),
                    ]))
                })
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ListState::default();
            state.select(Some(self.library_screen.selected));
            frame.render_stateful_widget(list, chunks[0], &mut state);
        }

        let detail_block = Block::default().borders(Borders::ALL).title("Details");
        let lines = match self.library_screen.current(&self.library) {
            Some(item) => detail_lines(item),
            None => vec![Line::from(Span::styled(
                "No item selected.",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        let detail = Paragraph::new(lines)
            .block(detail_block)
            .wrap(Wrap { trim: false });
        frame.render_widget(detail, chunks[1]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = Line::from(Span::styled(
            self.footer_instructions(),
            Style::default().fg(Color::Gray),
        ));

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> &'static str {
        match (&self.mode, self.screen) {
            (Mode::AddingStudent(_) | Mode::AddingItem(_), _) => {
                "Enter save • Tab next field • Shift+Tab previous • Esc cancel"
            }
            (Mode::Prompting(_), _) => "Enter confirm • Esc cancel",
            (Mode::Statistics, _) => "Press any key to close",
            (Mode::Normal, Screen::Grades) => {
                "↑/↓ move • + add • h/l highest/lowest • g grade filter • c clear • s stats • Tab library • q quit"
            }
            (Mode::Normal, Screen::Library) => {
                "↑/↓ move • b/m add book/magazine • / search • i find id • o borrow • r return • Enter toggle • d sample data • s stats • Tab grades • q quit"
            }
        }
    }

    fn draw_student_form(&self, frame: &mut Frame, area: Rect, form: &StudentForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Student").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = form.lines();
        lines.push(Line::from(""));
        lines.push(form_hint(form.error.as_deref()));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (column, row) = form.cursor_offset();
        frame.set_cursor_position((inner.x + column, inner.y + row));
    }

    fn draw_item_form(&self, frame: &mut Frame, area: Rect, form: &ItemForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(form.kind.title()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = form.lines();
        lines.push(Line::from(""));
        lines.push(form_hint(form.error.as_deref()));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (column, row) = form.cursor_offset();
        frame.set_cursor_position((inner.x + column, inner.y + row));
    }

    fn draw_prompt(&self, frame: &mut Frame, area: Rect, prompt: &Prompt) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(prompt.purpose.title())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            prompt.line(),
            Line::from(""),
            form_hint(prompt.error.as_deref()),
        ];
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (column, row) = prompt.cursor_offset();
        frame.set_cursor_position((inner.x + column, inner.y + row));
    }

    fn draw_grade_statistics(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Class Statistics")
            .borders(Borders::ALL);
        let summary = self.grades.summary();

        let mut lines = Vec::new();
        if summary.total == 0 {
            lines.push(Line::from("No students to summarize."));
        } else {
            lines.push(Line::from(format!("Total students: {}", summary.total)));
            lines.push(Line::from(vec![
                Span::raw(format!("Class average: {} ", format_score(summary.average))),
                Span::styled(
                    format!("(grade {})", summary.class_grade),
                    grade_style(summary.class_grade),
                ),
            ]));
            if let Some(highest) = &summary.highest {
                lines.push(Line::from(format!(
                    "Highest: {} - {}",
                    format_score(highest.final_score()),
                    highest.name()
                )));
            }
            if let Some(lowest) = &summary.lowest {
                lines.push(Line::from(format!(
                    "Lowest: {} - {}",
                    format_score(lowest.final_score()),
                    lowest.name()
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from("Grade distribution:"));
            for (grade, count) in summary.distribution.iter() {
                let percent = summary.distribution.percentage(grade);
                lines.push(Line::from(vec![
                    Span::styled(format!("  Grade {grade}: "), grade_style(grade)),
                    Span::raw(format!("{count} student(s) ({percent:.1}%) ")),
                    Span::styled(percentage_bar(percent), grade_style(grade)),
                ]));
            }
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_library_statistics(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(50, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!("Statistics - {}", self.library.name()))
            .borders(Borders::ALL);
        let stats = self.library.statistics();

        let mut lines = vec![Line::from(format!("Total items: {}", stats.total_items))];
        for (category, count) in &stats.by_category {
            lines.push(Line::from(format!("  - {category}: {count}")));
        }
        lines.push(Line::from(format!("Available: {}", stats.available_count)));
        lines.push(Line::from(format!("Borrowed: {}", stats.borrowed_count)));

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, popup_area);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Detail pane content: the item's own description plus derived facts.
fn detail_lines(item: &LibraryItem) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = item
        .describe()
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect();
    if let ItemKind::Magazine(_) = item.kind() {
        let latest = if item.is_latest_issue() { "yes" } else { "no" };
        lines.push(Line::from(format!("  Latest issue: {latest}")));
    }
    lines
}

/// Red error text when validation failed, otherwise the key hint.
fn form_hint(error: Option<&str>) -> Line<'static> {
    match error {
        Some(error) => Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            "Enter to save • Tab to switch field • Esc to cancel",
            Style::default().fg(Color::Gray),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn seeded(start: StartScreen) -> App {
        App::new(&AppConfig {
            start,
            ..AppConfig::default()
        })
    }

    fn press_all(app: &mut App, keys: &[KeyCode]) {
        for &key in keys {
            app.handle_key(key);
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
    }

    fn status(app: &App) -> Option<(&str, StatusKind)> {
        app.status.as_ref().map(|s| (s.text.as_str(), s.kind))
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn config_controls_seed_and_start_screen() {
        let app = seeded(StartScreen::Library);
        assert_eq!(app.screen, Screen::Library);
        assert_eq!(app.grades().len(), 5);
        assert_eq!(app.library().total_items(), 5);

        let empty = App::new(&AppConfig {
            seed_data: false,
            library_name: "Empty Shelf".into(),
            ..AppConfig::default()
        });
        assert!(empty.grades().is_empty());
        assert_eq!(empty.library().total_items(), 0);
        assert_eq!(empty.library().name(), "Empty Shelf");
    }

    #[test]
    fn q_quits_and_tab_switches() {
        let mut app = seeded(StartScreen::Grades);
        assert!(!app.handle_key(KeyCode::Tab));
        assert_eq!(app.screen, Screen::Library);
        assert!(!app.handle_key(KeyCode::BackTab));
        assert_eq!(app.screen, Screen::Grades);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn add_student_through_the_form() {
        let mut app = seeded(StartScreen::Grades);
        app.handle_key(KeyCode::Char('+'));
        type_text(&mut app, "Rina");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "2024010");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "80");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "90.5");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "70");
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.grades().len(), 6);
        assert_eq!(app.grades().list_all()[5].name(), "Rina");
        assert_eq!(app.grades_screen.selected, 5);
        assert_eq!(status(&app).map(|s| s.1), Some(StatusKind::Info));
    }

    #[test]
    fn invalid_student_form_stays_open() {
        let mut app = seeded(StartScreen::Grades);
        app.handle_key(KeyCode::Char('+'));
        type_text(&mut app, "Rina");
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.mode, Mode::AddingStudent(ref form) if form.error.is_some()));
        assert_eq!(app.grades().len(), 5);
        assert_eq!(status(&app).map(|s| s.1), Some(StatusKind::Error));

        app.handle_key(KeyCode::Esc);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.grades().len(), 5);
    }

    #[test]
    fn grade_filter_prompt_is_case_insensitive() {
        let mut app = seeded(StartScreen::Grades);
        app.handle_key(KeyCode::Char('g'));
        type_text(&mut app, "c");
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.grades_screen.view, GradeView::Grade(crate::grades::Grade::C));
        let rows = app.grades_screen.rows(&app.grades);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name(), "Dewi Lestari");

        app.handle_key(KeyCode::Char('c'));
        assert_eq!(app.grades_screen.view, GradeView::All);
    }

    #[test]
    fn bad_grade_keeps_prompt_open() {
        let mut app = seeded(StartScreen::Grades);
        app.handle_key(KeyCode::Char('g'));
        type_text(&mut app, "x");
        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Prompting(ref p) if p.error.is_some()));
        assert_eq!(app.grades_screen.view, GradeView::All);
    }

    #[test]
    fn highest_and_lowest_views() {
        let mut app = seeded(StartScreen::Grades);
        app.handle_key(KeyCode::Char('h'));
        assert_eq!(app.grades_screen.view, GradeView::Highest);
        assert_eq!(app.grades_screen.rows(&app.grades)[0].name(), "Ahmad Rizki");

        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.grades_screen.rows(&app.grades)[0].name(), "Eko Prasetyo");

        let mut empty = App::from_stores(GradeBook::new(), Library::default(), StartScreen::Grades);
        empty.handle_key(KeyCode::Char('h'));
        assert_eq!(empty.grades_screen.view, GradeView::All);
        assert_eq!(status(&empty).map(|s| s.1), Some(StatusKind::Error));
    }

    #[test]
    fn borrow_and_return_through_prompts() {
        let mut app = seeded(StartScreen::Library);

        app.handle_key(KeyCode::Char('o'));
        // prefilled with the selected item
        assert!(matches!(app.mode, Mode::Prompting(ref p) if p.input == "B001"));
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.library().borrowed_count(), 1);
        assert_eq!(status(&app), Some(("Borrowed 'Laskar Pelangi'.", StatusKind::Info)));

        app.handle_key(KeyCode::Char('o'));
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.library().borrowed_count(), 1);
        assert_eq!(status(&app).map(|s| s.1), Some(StatusKind::Error));

        app.handle_key(KeyCode::Char('r'));
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.library().borrowed_count(), 0);

        app.handle_key(KeyCode::Char('r'));
        app.handle_key(KeyCode::Enter);
        assert_eq!(
            status(&app),
            Some(("'Laskar Pelangi' is not on loan.", StatusKind::Error))
        );
    }

    #[test]
    fn unknown_id_leaves_library_untouched() {
        let mut app = seeded(StartScreen::Library);
        app.handle_key(KeyCode::Char('o'));
        press_all(&mut app, &[KeyCode::Backspace; 4]);
        type_text(&mut app, "X999");
        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.library().borrowed_count(), 0);
        assert_eq!(status(&app), Some(("No item with ID 'X999'.", StatusKind::Error)));
    }

    #[test]
    fn enter_toggles_selected_item() {
        let mut app = seeded(StartScreen::Library);
        press_all(&mut app, &[KeyCode::Down, KeyCode::Enter]);
        assert!(!app.library().find_by_id("B002").unwrap().is_available());
        app.handle_key(KeyCode::Enter);
        assert!(app.library().find_by_id("B002").unwrap().is_available());
        assert_eq!(app.library().borrowed_count(), 0);
    }

    #[test]
    fn search_and_find_update_the_view() {
        let mut app = seeded(StartScreen::Library);
        app.handle_key(KeyCode::Char('/'));
        type_text(&mut app, "pelangi");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.library_screen.view, LibraryView::Title("pelangi".into()));
        assert_eq!(app.library_screen.rows(&app.library).len(), 1);

        app.handle_key(KeyCode::Char('i'));
        type_text(&mut app, "M002");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.library_screen.view, LibraryView::Id("M002".into()));

        app.handle_key(KeyCode::Char('/'));
        type_text(&mut app, "zzz");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.library_screen.view, LibraryView::Id("M002".into()));
        assert_eq!(status(&app).map(|s| s.1), Some(StatusKind::Error));
    }

    #[test]
    fn duplicate_item_id_keeps_form_open() {
        let mut app = seeded(StartScreen::Library);
        app.handle_key(KeyCode::Char('b'));
        for value in ["B001", "Another", "Someone", "2020", "100"] {
            type_text(&mut app, value);
            app.handle_key(KeyCode::Tab);
        }
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.mode, Mode::AddingItem(ref form) if form.error.is_some()));
        assert_eq!(app.library().total_items(), 5);
        assert_eq!(
            status(&app),
            Some(("An item with ID 'B001' already exists.", StatusKind::Error))
        );
    }

    #[test]
    fn new_magazine_is_selected() {
        let mut app = seeded(StartScreen::Library);
        app.handle_key(KeyCode::Char('m'));
        for value in ["M003", "Bobo", "Kompas Gramedia", "2023", "12"] {
            type_text(&mut app, value);
            app.handle_key(KeyCode::Tab);
        }
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.library().total_items(), 6);
        assert_eq!(app.selected_item_id().as_deref(), Some("M003"));
    }

    #[test]
    fn sample_data_key_is_idempotent() {
        let mut app = App::from_stores(GradeBook::new(), Library::default(), StartScreen::Library);
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.library().total_items(), 5);
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.library().total_items(), 5);
    }

    #[test]
    fn statistics_overlay_closes_on_any_key() {
        let mut app = seeded(StartScreen::Grades);
        app.handle_key(KeyCode::Char('s'));
        assert!(matches!(app.mode, Mode::Statistics));
        app.handle_key(KeyCode::Char('x'));
        assert!(matches!(app.mode, Mode::Normal));
    }

    #[test]
    fn renders_grades_and_statistics() {
        let mut app = seeded(StartScreen::Grades);
        let screen = render(&app);
        assert!(screen.contains("Budi Santoso"));
        assert!(screen.contains("87.90"));

        app.handle_key(KeyCode::Char('s'));
        let screen = render(&app);
        assert!(screen.contains("Class average: 75.04"));
        assert!(screen.contains("Grade A: 3 student(s) (60.0%)"));
    }

    #[test]
    fn renders_library_details_and_statistics() {
        let mut app = seeded(StartScreen::Library);
        let screen = render(&app);
        assert!(screen.contains("[B001] Laskar Pelangi (2005)"));
        assert!(screen.contains("Author: Andrea Hirata"));

        app.handle_key(KeyCode::Char('s'));
        let screen = render(&app);
        assert!(screen.contains("Total items: 5"));
        assert!(screen.contains("- Magazine: 2"));
    }

    #[test]
    fn renders_empty_stores() {
        let app = App::from_stores(GradeBook::new(), Library::default(), StartScreen::Grades);
        assert!(render(&app).contains("No students to show"));
    }
}
