//! Folio UI Components
//!
//! Leptos components for the site search.
//!
//! # Components
//!
//! - [`Search`] - Input, result list and recent-search suggestions
//! - [`SearchShortcut`] - Global `/` shortcut focusing the search input
//!
//! # Example
//!
//! ```ignore
//! use folio_core::SearchConfig;
//! use folio_ui::Search;
//! use leptos::prelude::*;
//!
//! #[component]
//! fn Header() -> impl IntoView {
//!     view! { <Search config=SearchConfig::default() /> }
//! }
//! ```

pub mod search;
pub mod shortcut;

use folio_core::SearchConfig;
use leptos::prelude::*;
pub use search::Search;
pub use shortcut::SearchShortcut;

/// Mount the search component at the end of `<body>`.
pub fn mount(config: SearchConfig) {
    leptos::mount::mount_to_body(move || view! { <Search config=config /> });
}
