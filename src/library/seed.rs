use super::item::LibraryItem;

/// Fresh copies of the demo catalog: three books followed by two magazines.
pub fn sample_items() -> Vec<LibraryItem> {
    let books = [
        ("B001", "Laskar Pelangi", "Andrea Hirata", 2005, 529),
        ("B002", "Bumi Manusia", "Pramoedya Ananta Toer", 1980, 535),
        ("B003", "Sang Pemimpi", "Andrea Hirata", 2006, 292),
    ];
    let magazines = [
        ("M001", "National Geographic Indonesia", "PT Media Nusantara", 2025, 120),
        ("M002", "Tempo", "Tempo Inti Media", 2024, 4520),
    ];

    let books = books
        .into_iter()
        .filter_map(|(id, title, author, year, pages)| {
            LibraryItem::book(id, title, author, year, pages).ok()
        });
    let magazines = magazines
        .into_iter()
        .filter_map(|(id, title, publisher, year, issue)| {
            LibraryItem::magazine(id, title, publisher, year, issue).ok()
        });
    books.chain(magazines).collect()
}
