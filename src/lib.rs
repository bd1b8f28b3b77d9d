//! Two small in-memory record managers behind one terminal UI: a student
//! grade tracker and a library catalog with borrow/return tracking.
pub mod config;
pub mod error;
pub mod grades;
pub mod library;
pub mod logging;
pub mod ui;

pub use config::{AppConfig, Cli, StartScreen};
pub use error::ValidationError;
pub use grades::{Grade, GradeBook, StudentRecord};
pub use library::{Library, LibraryItem};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
