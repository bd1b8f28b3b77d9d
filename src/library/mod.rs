//! Library catalog: books and magazines with a borrow/return state machine,
//! held in insertion order for one session.

mod item;
pub mod seed;

use std::collections::BTreeMap;

use tracing::{debug, info};

pub use item::{Availability, Book, CatalogEntry, ItemKind, LibraryItem, Magazine};

/// Display name used when none is configured.
pub const DEFAULT_LIBRARY_NAME: &str = "Perpustakaan Digital Nusantara";

/// Every category label, so statistics list empty categories too.
pub const CATEGORIES: [&str; 2] = ["Book", "Magazine"];

/// Snapshot of the collection computed by [`Library::statistics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryStats {
    pub total_items: usize,
    pub by_category: BTreeMap<&'static str, usize>,
    pub available_count: usize,
    pub borrowed_count: usize,
}

/// Ordered catalog plus a running count of items currently lent out.
///
/// `borrowed_count` always equals the number of items whose state is
/// `Borrowed`: the only code that flips an item's state is `borrow_item` and
/// `return_item`, and both adjust the counter in the same step.
#[derive(Debug, Clone)]
pub struct Library {
    name: String,
    items: Vec<LibraryItem>,
    borrowed_count: usize,
}

impl Default for Library {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARY_NAME)
    }
}

impl Library {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            borrowed_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append `item` unless its id is already catalogued.
    ///
    /// Items arriving already borrowed are counted so the borrowed counter
    /// stays in step with the items.
    #[must_use]
    pub fn add_item(&mut self, item: LibraryItem) -> bool {
        if self.find_by_id(item.item_id()).is_some() {
            debug!(id = item.item_id(), "duplicate item id rejected");
            return false;
        }
        if !item.is_available() {
            self.borrowed_count += 1;
        }
        info!(
            id = item.item_id(),
            category = item.category(),
            "item added to catalog"
        );
        self.items.push(item);
        true
    }

    /// Every item in insertion order.
    pub fn list_all(&self) -> &[LibraryItem] {
        &self.items
    }

    /// Items whose title contains `keyword`, ignoring case.
    pub fn find_by_title(&self, keyword: &str) -> Vec<&LibraryItem> {
        let needle = keyword.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.title().to_lowercase().contains(&needle))
            .collect()
    }

    /// The item with exactly this id.
    pub fn find_by_id(&self, item_id: &str) -> Option<&LibraryItem> {
        self.items.iter().find(|item| item.item_id() == item_id)
    }

    fn find_by_id_mut(&mut self, item_id: &str) -> Option<&mut LibraryItem> {
        self.items.iter_mut().find(|item| item.item_id() == item_id)
    }

    /// Lend out the item with `item_id`. Fails when the id is unknown or the
    /// item is already borrowed.
    #[must_use]
    pub fn borrow_item(&mut self, item_id: &str) -> bool {
        let Some(item) = self.find_by_id_mut(item_id) else {
            debug!(id = item_id, "borrow failed: unknown item");
            return false;
        };
        if !item.borrow() {
            debug!(id = item_id, "borrow failed: already borrowed");
            return false;
        }
        self.borrowed_count += 1;
        info!(id = item_id, borrowed = self.borrowed_count, "item borrowed");
        true
    }

    /// Take back the item with `item_id`. Fails when the id is unknown or the
    /// item is not currently borrowed.
    #[must_use]
    pub fn return_item(&mut self, item_id: &str) -> bool {
        let Some(item) = self.find_by_id_mut(item_id) else {
            debug!(id = item_id, "return failed: unknown item");
            return false;
        };
        if item.is_available() {
            debug!(id = item_id, "return failed: item was not borrowed");
            return false;
        }
        item.return_item();
        self.borrowed_count -= 1;
        info!(id = item_id, borrowed = self.borrowed_count, "item returned");
        true
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn available_items(&self) -> usize {
        self.items.iter().filter(|item| item.is_available()).count()
    }

    pub fn borrowed_count(&self) -> usize {
        self.borrowed_count
    }

    /// Counts derived by scanning the catalog.
    pub fn statistics(&self) -> LibraryStats {
        let mut by_category: BTreeMap<&'static str, usize> =
            CATEGORIES.iter().map(|&category| (category, 0)).collect();
        for item in &self.items {
            *by_category.entry(item.category()).or_default() += 1;
        }
        LibraryStats {
            total_items: self.total_items(),
            by_category,
            available_count: self.available_items(),
            borrowed_count: self.borrowed_count,
        }
    }

    /// Add the demo items, skipping ids that are already present. Returns how
    /// many were new.
    pub fn load_sample_data(&mut self) -> usize {
        let mut added = 0;
        for item in seed::sample_items() {
            if self.add_item(item) {
                added += 1;
            }
        }
        info!(added, "sample data loaded");
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, title: &str) -> LibraryItem {
        LibraryItem::book(id, title, "Author", 2000, 100).unwrap()
    }

    fn borrowed_items(library: &Library) -> usize {
        library
            .list_all()
            .iter()
            .filter(|item| !item.is_available())
            .count()
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut library = Library::default();
        assert!(library.add_item(book("B1", "First")));
        assert!(!library.add_item(book("B1", "Second")));
        assert_eq!(library.total_items(), 1);
        assert_eq!(library.list_all()[0].title(), "First");
    }

    #[test]
    fn items_keep_insertion_order() {
        let mut library = Library::new("Test");
        for id in ["C", "A", "B"] {
            assert!(library.add_item(book(id, id)));
        }
        let ids: Vec<&str> = library.list_all().iter().map(LibraryItem::item_id).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
        assert_eq!(library.name(), "Test");
    }

    #[test]
    fn title_search_ignores_case() {
        let mut library = Library::default();
        assert!(library.add_item(book("B1", "Laskar Pelangi")));
        assert!(library.add_item(book("B2", "Bumi Manusia")));
        assert!(library.add_item(book("B3", "Pelangi di Mars")));

        let hits: Vec<&str> = library
            .find_by_title("pelangi")
            .into_iter()
            .map(LibraryItem::item_id)
            .collect();
        assert_eq!(hits, vec!["B1", "B3"]);
        assert!(library.find_by_title("xyz").is_empty());
    }

    #[test]
    fn find_by_id_is_exact() {
        let mut library = Library::default();
        assert!(library.add_item(book("B1", "One")));
        assert!(library.find_by_id("B1").is_some());
        assert!(library.find_by_id("b1").is_none());
        assert!(library.find_by_id("B").is_none());
    }

    #[test]
    fn borrow_and_return_update_counter() {
        let mut library = Library::default();
        assert!(library.add_item(book("B1", "One")));
        let before = library.borrowed_count();

        assert!(library.borrow_item("B1"));
        assert!(!library.borrow_item("B1"));
        assert_eq!(library.borrowed_count(), before + 1);
        assert!(!library.find_by_id("B1").unwrap().is_available());

        assert!(library.return_item("B1"));
        assert!(!library.return_item("B1"));
        assert_eq!(library.borrowed_count(), before);
    }

    #[test]
    fn unknown_ids_fail_without_side_effects() {
        let mut library = Library::default();
        assert!(library.add_item(book("B1", "One")));
        assert!(!library.borrow_item("nope"));
        assert!(!library.return_item("nope"));
        assert_eq!(library.borrowed_count(), 0);
        assert!(library.find_by_id("B1").unwrap().is_available());
    }

    #[test]
    fn adding_a_borrowed_item_counts_it() {
        let mut library = Library::default();
        let mut item = book("B1", "One");
        assert!(item.borrow());
        assert!(library.add_item(item));
        assert_eq!(library.borrowed_count(), borrowed_items(&library));
        assert!(library.return_item("B1"));
        assert_eq!(library.borrowed_count(), 0);
    }

    #[test]
    fn statistics_scan_the_catalog() {
        let mut library = Library::default();
        assert_eq!(library.load_sample_data(), 5);
        assert!(library.borrow_item("B002"));
        assert!(library.borrow_item("M001"));

        let stats = library.statistics();
        assert_eq!(stats.total_items, 5);
        assert_eq!(stats.by_category.get("Book"), Some(&3));
        assert_eq!(stats.by_category.get("Magazine"), Some(&2));
        assert_eq!(stats.available_count, 3);
        assert_eq!(stats.borrowed_count, 2);
    }

    #[test]
    fn empty_statistics_list_every_category() {
        let stats = Library::default().statistics();
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.by_category.get("Book"), Some(&0));
        assert_eq!(stats.by_category.get("Magazine"), Some(&0));
    }

    #[test]
    fn sample_data_loads_once() {
        let mut library = Library::default();
        assert_eq!(library.load_sample_data(), 5);
        assert_eq!(library.load_sample_data(), 0);
        assert_eq!(library.total_items(), 5);
    }
}
