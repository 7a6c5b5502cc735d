//! Folio Core Library
//!
//! Shared schema, configuration, and error handling for the Folio site search.
//!
//! The [`SearchDocument`] type is the contract between the build-time index
//! producer (`folio-search`) and the runtime search client (`folio-client`).

pub mod config;
pub mod document;
pub mod error;
pub mod frontmatter;

pub use config::{Config, SearchConfig};
pub use document::{Category, IndexReport, SearchDocument};
pub use error::{CoreError, Result};
pub use frontmatter::Frontmatter;
