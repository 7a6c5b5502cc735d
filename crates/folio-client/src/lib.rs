//! Folio Search Client
//!
//! Turns free-text input into a ranked, navigable list of site documents.
//!
//! # Features
//!
//! - **SearchEngine**: fuzzy matching over title, description, tags and content
//! - **RecentSearches**: persisted log of the last few queries
//! - **SelectionCursor**: wrap-around keyboard selection
//! - **Debouncer**: timestamp-driven quiet-period tracking
//! - **SearchSession**: the interaction state machine tying it all together
//! - **browser** (feature): index fetch, `localStorage` and DOM helpers
//!
//! Everything except the `browser` module is platform-neutral so the same
//! logic drives the Leptos component, the CLI and the tests.
//!
//! # Example
//!
//! ```
//! use folio_client::{MemoryStore, SearchEngine, SearchSession, SearchView};
//! use folio_core::{Category, SearchConfig, SearchDocument};
//!
//! let config = SearchConfig::default();
//! let docs = vec![SearchDocument::new("a", "Learning Rust", "/blog/rust/", Category::Blog)];
//! let engine = SearchEngine::new(docs, &config);
//! let mut session = SearchSession::new(engine, MemoryStore::new(), &config);
//!
//! match session.query("rust") {
//!     SearchView::Results(hits) => assert_eq!(hits[0].document.url, "/blog/rust/"),
//!     SearchView::Suggestions(_) => unreachable!(),
//! }
//! ```

#[cfg(feature = "browser")]
pub mod browser;
pub mod cursor;
pub mod debounce;
pub mod engine;
pub mod recent;
pub mod render;
pub mod session;

pub use cursor::{Direction, SelectionCursor};
pub use debounce::Debouncer;
pub use engine::{SearchEngine, SearchHit};
pub use recent::{KeyValueStore, MemoryStore, RecentSearches};
pub use session::{FocusTarget, InputKey, KeyOutcome, SearchSession, SearchView, is_search_shortcut};
use thiserror::Error;

/// Search client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network error while fetching the index.
    #[error("Network error: {0}")]
    Network(String),

    /// Index request answered with a non-success status.
    #[error("Failed to load index: HTTP {0}")]
    Status(u16),

    /// Index or stored data could not be parsed.
    #[error("Failed to parse: {0}")]
    Parse(#[from] serde_json::Error),

    /// Client-side storage is unavailable or refused the operation.
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
