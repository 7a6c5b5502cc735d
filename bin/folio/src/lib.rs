//! Folio CLI Library
//!
//! Command implementations for the `folio` binary, exposed as a library so
//! they can be tested and reused.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (index, check, search, recent)
//! - [`store`] - File-backed key-value store for the recent-search log
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folio::cmd;
//!
//! // Build the search index from ./content
//! cmd::index::run(Path::new("folio.toml"), None, None, false).unwrap();
//! ```

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

pub mod cmd;
pub mod store;

// Re-export core types for convenience
pub use folio_client::{SearchEngine, SearchSession};
pub use folio_core::{Config, SearchDocument};
pub use folio_search::{ContentCollector, SearchIndex};
pub use store::FileStore;

/// Load `folio.toml` with environment overrides, or defaults when it is absent.
pub fn load_config(path: &Path) -> Result<Config> {
    Config::load_or_default(path)
        .wrap_err_with(|| format!("Failed to load configuration from {}", path.display()))
}

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// folio::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
