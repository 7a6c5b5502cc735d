//! Search interaction state machine.
//!
//! A [`SearchSession`] owns everything one search component instance needs:
//! the engine, the recent-search log, the debounce state, the current view
//! and the selection cursor. Event handlers in the host (DOM listeners, CLI
//! key replay, tests) call into it and act on what it returns.

use std::time::Duration;

use folio_core::SearchConfig;
use tracing::{debug, trace};

use crate::{
    cursor::{Direction, SelectionCursor},
    debounce::Debouncer,
    engine::{SearchEngine, SearchHit},
    recent::{KeyValueStore, RecentSearches},
};

/// What the component shows below the input.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchView {
    /// Recent searches, shown for an empty query.
    Suggestions(Vec<String>),
    /// Ranked results for a non-empty query.
    Results(Vec<SearchHit>),
}

/// Keys the search input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

impl InputKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Self {
        match key {
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// Result of handling a key in the search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The selection moved.
    Selected(Option<usize>),
    /// The browser should navigate to this URL.
    Navigate(String),
    /// Query and selection were cleared.
    Cleared,
    /// Nothing to do; let the key through.
    Ignored,
}

/// Where keyboard focus was when a global key arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// An input, textarea or contenteditable element.
    Editable,
    /// Anything else.
    Other,
}

/// Whether a global key press should move focus to the search input.
///
/// `/` is the shortcut, except while typing into an editable element.
pub fn is_search_shortcut(key: &str, focus: FocusTarget) -> bool {
    key == "/" && focus == FocusTarget::Other
}

/// State of one search component instance.
#[derive(Debug)]
pub struct SearchSession<S> {
    engine: SearchEngine,
    recent: RecentSearches<S>,
    debouncer: Debouncer<String>,
    cursor: SelectionCursor,
    text: String,
    query: String,
    view: SearchView,
}

impl<S: KeyValueStore> SearchSession<S> {
    /// Create a session showing the suggestions view.
    pub fn new(engine: SearchEngine, store: S, config: &SearchConfig) -> Self {
        let recent = RecentSearches::from_config(store, config);
        let view = SearchView::Suggestions(recent.entries().to_vec());
        Self {
            engine,
            recent,
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_ms)),
            cursor: SelectionCursor::new(),
            text: String::new(),
            query: String::new(),
            view,
        }
    }

    /// Swap in a freshly loaded engine and refresh the current view.
    pub fn set_engine(&mut self, engine: SearchEngine) {
        self.engine = engine;
        let query = self.query.clone();
        self.query(&query);
    }

    /// The engine in use.
    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Current input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text of the last executed query.
    pub fn last_query(&self) -> &str {
        &self.query
    }

    /// Current view.
    pub fn view(&self) -> &SearchView {
        &self.view
    }

    /// Current results; empty in the suggestions view.
    pub fn results(&self) -> &[SearchHit] {
        match &self.view {
            SearchView::Results(hits) => hits,
            SearchView::Suggestions(_) => &[],
        }
    }

    /// Selected result index.
    pub fn selected(&self) -> Option<usize> {
        self.cursor.selected()
    }

    /// Remembered queries, most recent first.
    pub fn recent(&self) -> &[String] {
        self.recent.entries()
    }

    /// Run a query right away.
    ///
    /// Blank text shows the suggestions view. Any query resets the selection.
    pub fn query(&mut self, text: &str) -> &SearchView {
        self.query = text.to_string();
        self.cursor.reset();

        self.view = if text.trim().is_empty() {
            SearchView::Suggestions(self.recent.entries().to_vec())
        } else {
            let hits = self.engine.search(text);
            debug!(query = text, results = hits.len(), "search executed");
            SearchView::Results(hits)
        };
        &self.view
    }

    /// Record a keystroke; the query runs once input has been quiet long enough.
    pub fn input(&mut self, text: &str, now: Duration) {
        self.text = text.to_string();
        self.debouncer.push(self.text.clone(), now);
        trace!(text, "input debounced");
    }

    /// When the pending input becomes due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.debouncer.deadline()
    }

    /// Run the pending query if its quiet period has elapsed.
    ///
    /// Returns whether a query ran.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.debouncer.poll(now) {
            Some(text) => {
                self.query(&text);
                true
            }
            None => false,
        }
    }

    /// Run the pending query immediately, ignoring the quiet period.
    ///
    /// Pending text equal to the last query is dropped so the current
    /// selection survives. Returns whether a query ran.
    pub fn flush(&mut self) -> bool {
        match self.debouncer.cancel() {
            Some(text) if text != self.query => {
                self.query(&text);
                true
            }
            _ => false,
        }
    }

    /// The input gained focus; re-run the query if it holds text.
    pub fn focus(&mut self) -> bool {
        if self.text.trim().is_empty() {
            return false;
        }
        self.debouncer.cancel();
        let text = self.text.clone();
        self.query(&text);
        true
    }

    /// Move the selection through the current results.
    pub fn navigate(&mut self, direction: Direction) -> Option<usize> {
        let len = self.results().len();
        self.cursor.navigate(direction, len)
    }

    /// Pick the selected result, or the first one when nothing is selected.
    ///
    /// Returns the URL to navigate to and remembers the query.
    pub fn commit(&mut self) -> Option<String> {
        let results = self.results();
        let index = self.cursor.selected().unwrap_or(0);
        let url = results.get(index).or_else(|| results.first())?.document.url.clone();

        let query = self.query.clone();
        self.recent.record(&query);
        debug!(query = %query, url = %url, "search committed");
        Some(url)
    }

    /// Remember a query without running it.
    pub fn record_recent_search(&mut self, text: &str) -> bool {
        let changed = self.recent.record(text);
        if changed && matches!(self.view, SearchView::Suggestions(_)) {
            self.view = SearchView::Suggestions(self.recent.entries().to_vec());
        }
        changed
    }

    /// Forget all remembered queries.
    pub fn clear_recent_searches(&mut self) {
        self.recent.clear();
        if matches!(self.view, SearchView::Suggestions(_)) {
            self.view = SearchView::Suggestions(Vec::new());
        }
    }

    /// Fill the input with a remembered query and run it.
    pub fn select_suggestion(&mut self, index: usize) -> Option<&SearchView> {
        let suggestion = self.recent.entries().get(index)?.clone();
        self.debouncer.cancel();
        self.text = suggestion.clone();
        Some(self.query(&suggestion))
    }

    /// Empty the input and return to the suggestions view.
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        self.text.clear();
        self.query("");
    }

    /// React to a key pressed inside the search input.
    pub fn handle_key(&mut self, key: InputKey) -> KeyOutcome {
        match key {
            InputKey::ArrowDown => KeyOutcome::Selected(self.navigate(Direction::Down)),
            InputKey::ArrowUp => KeyOutcome::Selected(self.navigate(Direction::Up)),
            InputKey::Enter => {
                // Enter must act on what was typed, not on a stale result list.
                self.flush();
                self.commit()
                    .map_or(KeyOutcome::Ignored, KeyOutcome::Navigate)
            }
            InputKey::Escape => {
                self.clear();
                KeyOutcome::Cleared
            }
            InputKey::Other => KeyOutcome::Ignored,
        }
    }
}
