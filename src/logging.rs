//! Diagnostic tracing for the record stores.
//!
//! The terminal UI owns stdout, so events go to stderr and stay quiet unless
//! `RUST_LOG` asks for them. Redirect stderr to a file to read them while the
//! UI is running:
//!
//! ```bash
//! RUST_LOG=coursework_desk=debug coursework-desk 2>desk.log
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Calling it twice is harmless; the second
/// call leaves the first subscriber in place.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
