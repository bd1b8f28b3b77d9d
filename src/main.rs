//! Binary entry point: parse flags, build the stores and drive the Ratatui
//! event loop until the user exits.
use clap::Parser;
use coursework_desk::{logging, run_app, App, AppConfig, Cli};
use tracing::info;

fn main() -> anyhow::Result<()> {
    logging::init();
    let config = AppConfig::from(Cli::parse());
    info!(start = ?config.start, seed = config.seed_data, "starting");

    let mut app = App::new(&config);
    run_app(&mut app)
}
