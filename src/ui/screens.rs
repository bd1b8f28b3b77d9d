use crate::grades::{Grade, GradeBook, StudentRecord};
use crate::library::{Library, LibraryItem};

/// Move `selected` by `offset` within a list of `len` rows, clamping at both
/// ends.
fn step_selection(selected: usize, len: usize, offset: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = selected as isize + offset;
    target.clamp(0, len as isize - 1) as usize
}

/// Which subset of the grade book the table shows.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum GradeView {
    #[default]
    All,
    Grade(Grade),
    Highest,
    Lowest,
}

impl GradeView {
    pub(crate) fn title(&self) -> String {
        match self {
            GradeView::All => "All students".to_string(),
            GradeView::Grade(grade) => format!("Students with grade {grade}"),
            GradeView::Highest => "Highest final score".to_string(),
            GradeView::Lowest => "Lowest final score".to_string(),
        }
    }
}

/// Table state for the grade tracker screen.
#[derive(Default, Debug)]
pub(crate) struct GradesScreen {
    pub(crate) view: GradeView,
    pub(crate) selected: usize,
}

impl GradesScreen {
    /// Rows visible under the current view.
    pub(crate) fn rows<'a>(&self, book: &'a GradeBook) -> Vec<&'a StudentRecord> {
        match self.view {
            GradeView::All => book.list_all().iter().collect(),
            GradeView::Grade(grade) => book.filter_by_grade(grade),
            GradeView::Highest => book.highest_scoring().into_iter().collect(),
            GradeView::Lowest => book.lowest_scoring().into_iter().collect(),
        }
    }

    pub(crate) fn set_view(&mut self, view: GradeView) {
        self.view = view;
        self.selected = 0;
    }

    pub(crate) fn move_selection(&mut self, book: &GradeBook, offset: isize) {
        self.selected = step_selection(self.selected, self.rows(book).len(), offset);
    }

    pub(crate) fn select_last(&mut self, book: &GradeBook) {
        self.selected = self.rows(book).len().saturating_sub(1);
    }

    /// Select the last row, used after appending a record.
    pub(crate) fn select_newest(&mut self, book: &GradeBook) {
        self.set_view(GradeView::All);
        self.select_last(book);
    }
}

/// Which subset of the catalog the list shows.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum LibraryView {
    #[default]
    All,
    Title(String),
    Id(String),
}

impl LibraryView {
    pub(crate) fn title(&self) -> String {
        match self {
            LibraryView::All => "All items".to_string(),
            LibraryView::Title(keyword) => format!("Titles containing '{keyword}'"),
            LibraryView::Id(id) => format!("Item {id}"),
        }
    }
}

/// List state for the library screen.
#[derive(Default, Debug)]
pub(crate) struct LibraryScreen {
    pub(crate) view: LibraryView,
    pub(crate) selected: usize,
}

impl LibraryScreen {
    pub(crate) fn rows<'a>(&self, library: &'a Library) -> Vec<&'a LibraryItem> {
        match &self.view {
            LibraryView::All => library.list_all().iter().collect(),
            LibraryView::Title(keyword) => library.find_by_title(keyword),
            LibraryView::Id(id) => library.find_by_id(id).into_iter().collect(),
        }
    }

    pub(crate) fn current<'a>(&self, library: &'a Library) -> Option<&'a LibraryItem> {
        self.rows(library).get(self.selected).copied()
    }

    pub(crate) fn set_view(&mut self, view: LibraryView) {
        self.view = view;
        self.selected = 0;
    }

    pub(crate) fn move_selection(&mut self, library: &Library, offset: isize) {
        self.selected = step_selection(self.selected, self.rows(library).len(), offset);
    }

    pub(crate) fn select_last(&mut self, library: &Library) {
        self.selected = self.rows(library).len().saturating_sub(1);
    }

    /// Jump to the item with `item_id` in the full listing.
    pub(crate) fn select_item(&mut self, library: &Library, item_id: &str) {
        self.set_view(LibraryView::All);
        if let Some(index) = library
            .list_all()
            .iter()
            .position(|item| item.item_id() == item_id)
        {
            self.selected = index;
        }
    }
}
