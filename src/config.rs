//! Command-line options and the runtime configuration derived from them.

use clap::{Parser, ValueEnum};

use crate::library::DEFAULT_LIBRARY_NAME;

/// Which record manager the UI opens on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StartScreen {
    #[default]
    Grades,
    Library,
}

#[derive(Debug, Parser)]
#[command(
    name = "coursework-desk",
    version,
    about = "In-memory student grade tracker and library catalog"
)]
pub struct Cli {
    /// Screen shown at startup
    #[arg(long, value_enum, default_value_t = StartScreen::Grades)]
    pub start: StartScreen,

    /// Start with empty stores instead of the demo data
    #[arg(long)]
    pub empty: bool,

    /// Display name of the library
    #[arg(long, default_value = DEFAULT_LIBRARY_NAME)]
    pub library_name: String,
}

/// Settings consumed by [`crate::ui::App::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub start: StartScreen,
    pub seed_data: bool,
    pub library_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start: StartScreen::Grades,
            seed_data: true,
            library_name: DEFAULT_LIBRARY_NAME.to_string(),
        }
    }
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        let name = cli.library_name.trim();
        Self {
            start: cli.start,
            seed_data: !cli.empty,
            library_name: if name.is_empty() {
                DEFAULT_LIBRARY_NAME.to_string()
            } else {
                name.to_string()
            },
        }
    }
}
