use std::fmt;

use chrono::{Datelike, Local};

use crate::error::{require_text, ValidationError};

/// Category-specific behaviour shared by every kind of catalog entry.
pub trait CatalogEntry {
    /// Fixed category label for the variant.
    fn category(&self) -> &'static str;

    /// Variant-specific `(label, value)` rows for the detail view.
    fn details(&self, year: i32) -> Vec<(&'static str, String)>;
}

/// A bound book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    author: String,
    page_count: u32,
}

impl Book {
    /// Minutes per page assumed by [`Book::reading_minutes`].
    pub const MINUTES_PER_PAGE: u32 = 2;

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Rough reading time at two minutes per page.
    pub fn reading_minutes(&self) -> u64 {
        u64::from(self.page_count) * u64::from(Self::MINUTES_PER_PAGE)
    }
}

impl CatalogEntry for Book {
    fn category(&self) -> &'static str {
        "Book"
    }

    fn details(&self, year: i32) -> Vec<(&'static str, String)> {
        vec![
            ("Author", self.author.clone()),
            ("Year", year.to_string()),
            ("Pages", self.page_count.to_string()),
            ("Reading time", format!("{} min", self.reading_minutes())),
        ]
    }
}

/// A periodical issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Magazine {
    publisher: String,
    issue_number: u32,
}

impl Magazine {
    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn issue_number(&self) -> u32 {
        self.issue_number
    }
}

impl CatalogEntry for Magazine {
    fn category(&self) -> &'static str {
        "Magazine"
    }

    fn details(&self, year: i32) -> Vec<(&'static str, String)> {
        vec![
            ("Publisher", self.publisher.clone()),
            ("Year", year.to_string()),
            ("Issue", format!("#{}", self.issue_number)),
        ]
    }
}

/// The closed set of item variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Book(Book),
    Magazine(Magazine),
}

impl ItemKind {
    fn entry(&self) -> &dyn CatalogEntry {
        match self {
            ItemKind::Book(book) => book,
            ItemKind::Magazine(magazine) => magazine,
        }
    }
}

/// Lending state of a single item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Availability {
    #[default]
    Available,
    Borrowed,
}

impl Availability {
    pub fn label(self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Borrowed => "Borrowed",
        }
    }
}

/// A catalog entry with its lending state.
///
/// The id is fixed at construction. The title can be changed through
/// [`LibraryItem::set_title`], which keeps it trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryItem {
    item_id: String,
    title: String,
    year: i32,
    state: Availability,
    kind: ItemKind,
}

impl LibraryItem {
    /// Build an available book after validating the text fields.
    pub fn book(
        item_id: &str,
        title: &str,
        author: &str,
        year: i32,
        page_count: u32,
    ) -> Result<Self, ValidationError> {
        let kind = ItemKind::Book(Book {
            author: require_text("Author", author)?,
            page_count,
        });
        Self::with_kind(item_id, title, year, kind)
    }

    /// Build an available magazine issue after validating the text fields.
    pub fn magazine(
        item_id: &str,
        title: &str,
        publisher: &str,
        year: i32,
        issue_number: u32,
    ) -> Result<Self, ValidationError> {
        let kind = ItemKind::Magazine(Magazine {
            publisher: require_text("Publisher", publisher)?,
            issue_number,
        });
        Self::with_kind(item_id, title, year, kind)
    }

    fn with_kind(
        item_id: &str,
        title: &str,
        year: i32,
        kind: ItemKind,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            item_id: require_text("Item id", item_id)?,
            title: require_text("Title", title)?,
            year,
            state: Availability::Available,
            kind,
        })
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the title. Blank input is rejected and leaves the old title.
    pub fn set_title(&mut self, value: &str) -> Result<(), ValidationError> {
        self.title = require_text("Title", value)?;
        Ok(())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn state(&self) -> Availability {
        self.state
    }

    pub fn is_available(&self) -> bool {
        self.state == Availability::Available
    }

    /// Lend the item out. Returns `false` without touching the state when it
    /// is already borrowed.
    #[must_use]
    pub fn borrow(&mut self) -> bool {
        match self.state {
            Availability::Available => {
                self.state = Availability::Borrowed;
                true
            }
            Availability::Borrowed => false,
        }
    }

    /// Mark the item as back on the shelf. Calling it on an available item is
    /// a no-op.
    pub fn return_item(&mut self) {
        self.state = Availability::Available;
    }

    pub fn category(&self) -> &'static str {
        self.kind.entry().category()
    }

    /// Multi-line description including the variant's own fields.
    pub fn describe(&self) -> String {
        let entry = self.kind.entry();
        let mut out = format!(
            "{}\n  ID: {}\n  Title: {}",
            entry.category().to_uppercase(),
            self.item_id,
            self.title
        );
        for (label, value) in entry.details(self.year) {
            out.push_str(&format!("\n  {label}: {value}"));
        }
        out.push_str(&format!("\n  Status: {}", self.state.label()));
        out
    }

    /// Only meaningful for magazines: whether the issue came out in the
    /// current calendar year.
    pub fn is_latest_issue(&self) -> bool {
        self.is_latest_issue_in(Local::now().year())
    }

    /// Same as [`LibraryItem::is_latest_issue`] against an explicit year.
    pub fn is_latest_issue_in(&self, current_year: i32) -> bool {
        matches!(self.kind, ItemKind::Magazine(_)) && self.year == current_year
    }
}

impl fmt::Display for LibraryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}) - {}",
            self.item_id,
            self.title,
            self.year,
            self.state.label()
        )
    }
}
