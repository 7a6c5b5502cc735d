//! Folio Search Index Library
//!
//! Produces the static `search-index.json` artifact the search client loads.
//!
//! # Features
//!
//! - **Content collection**: Markdown files with YAML/TOML frontmatter
//! - **Plain-text extraction**: Markdown reduced to matchable text and previews
//! - **Index validation**: unique ids and non-empty URLs enforced before writing
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folio_search::{ContentCollector, SearchIndex};
//!
//! let documents = ContentCollector::new("content").collect().unwrap();
//! let index = SearchIndex::new(documents);
//! index.write_to_file(Path::new("public/search-index.json")).unwrap();
//! ```

pub mod collector;
pub mod index;
pub mod text;

pub use collector::ContentCollector;
pub use index::{MAX_INDEX_SIZE, SearchIndex};
pub use text::{markdown_to_text, preview};
use thiserror::Error;

/// Search index errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Content or index invariant error.
    #[error(transparent)]
    Core(#[from] folio_core::CoreError),
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
