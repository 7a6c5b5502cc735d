//! Browser bindings: index fetch, `localStorage` and DOM helpers.

use std::time::Duration;

use folio_core::{SearchConfig, SearchDocument};
use gloo_net::http::Request;
use tracing::{info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{EventTarget, HtmlElement, Storage};

use crate::{ClientError, Result, engine::SearchEngine, recent::KeyValueStore, session::FocusTarget};

/// Fetch the serialized document list.
pub async fn fetch_index(index_url: &str) -> Result<Vec<SearchDocument>> {
    let response = Request::get(index_url)
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ClientError::Status(response.status()));
    }

    let json = response
        .text()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    Ok(serde_json::from_str(&json)?)
}

/// Fetch the index and build the search structure.
///
/// Any failure is logged and yields an empty engine, so queries simply
/// return nothing.
pub async fn load_engine(config: &SearchConfig) -> SearchEngine {
    match fetch_index(&config.index_path).await {
        Ok(documents) => {
            info!(documents = documents.len(), "search index loaded");
            SearchEngine::new(documents, config)
        }
        Err(e) => {
            warn!(url = %config.index_path, error = %e, "failed to load search index");
            SearchEngine::empty(config)
        }
    }
}

/// `window.localStorage`, looked up on every call.
///
/// Private browsing modes and disabled storage surface as errors that the
/// recent-search log swallows.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<Storage> {
        web_sys::window()
            .ok_or_else(|| ClientError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| ClientError::Storage("localStorage unavailable".to_string()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<()> {
        Self::storage()?.remove_item(key).map_err(js_error)
    }
}

fn js_error(value: JsValue) -> ClientError {
    ClientError::Storage(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Classify the target of a keyboard event.
pub fn focus_target(target: Option<EventTarget>) -> FocusTarget {
    let Some(element) = target.and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
        return FocusTarget::Other;
    };

    let tag = element.tag_name().to_ascii_uppercase();
    if matches!(tag.as_str(), "INPUT" | "TEXTAREA") || element.is_content_editable() {
        FocusTarget::Editable
    } else {
        FocusTarget::Other
    }
}

/// Milliseconds since the epoch as a [`Duration`], for driving the debouncer.
pub fn now() -> Duration {
    Duration::from_millis(js_sys::Date::now() as u64)
}

/// Navigate the browser to `url`.
pub fn navigate_to(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(url) {
        warn!(url, error = ?e, "navigation failed");
    }
}
