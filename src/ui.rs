//! Ratatui front-end hosting the grade tracker and the library catalog as two
//! screens of one application.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
