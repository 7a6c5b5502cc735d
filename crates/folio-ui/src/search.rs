//! The search component.
//!
//! All interaction state lives in a [`SearchSession`]; the component forwards
//! DOM events to it and mirrors the resulting state into signals for the view.

use std::time::Duration;

use folio_client::{
    InputKey, KeyOutcome, SearchEngine, SearchSession, SearchView,
    browser::{LocalStore, load_engine, navigate_to, now},
    render::{highlight, result_id},
};
use folio_core::SearchConfig;
use leptos::{html, prelude::*, task::spawn_local};

use crate::shortcut::SearchShortcut;

const RESULTS_ID: &str = "folio-search-results";

/// Site search: input, ranked results and recent-search suggestions.
///
/// The index is fetched once on mount. Until it arrives, and if fetching
/// fails, queries return no results.
#[component]
pub fn Search(
    /// Search settings.
    #[prop(default = SearchConfig::default())]
    config: SearchConfig,
    /// Placeholder text for the input.
    #[prop(default = "Search...".to_string())]
    placeholder: String,
) -> impl IntoView {
    let input_ref = NodeRef::<html::Input>::new();
    let session = StoredValue::new_local(SearchSession::new(
        SearchEngine::empty(&config),
        LocalStore,
        &config,
    ));
    let timer = StoredValue::new_local(None::<TimeoutHandle>);
    let debounce = Duration::from_millis(config.debounce_ms);

    let text = RwSignal::new(String::new());
    let query = RwSignal::new(String::new());
    let current = RwSignal::new(SearchView::Suggestions(Vec::new()));
    let selected = RwSignal::new(None::<usize>);
    let loading = RwSignal::new(true);

    // Mirror session state into the signals the view reads.
    let sync = move || {
        session.with_value(|s| {
            if text.with_untracked(|t| t != s.text()) {
                text.set(s.text().to_string());
            }
            if query.with_untracked(|q| q != s.last_query()) {
                query.set(s.last_query().to_string());
            }
            if current.with_untracked(|v| v != s.view()) {
                current.set(s.view().clone());
            }
            selected.set(s.selected());
        });
    };
    sync();

    let cancel_timer = move || {
        timer.update_value(|handle| {
            if let Some(handle) = handle.take() {
                handle.clear();
            }
        });
    };

    spawn_local(async move {
        let engine = load_engine(&config).await;
        if session.try_update_value(|s| s.set_engine(engine)).is_none() {
            return;
        }
        loading.set(false);
        sync();
    });

    let on_input = move |ev| {
        let value = event_target_value(&ev);
        session.update_value(|s| s.input(&value, now()));
        text.set(value);

        cancel_timer();
        let handle = set_timeout_with_handle(
            move || {
                timer.set_value(None);
                session.update_value(|s| {
                    s.flush();
                });
                sync();
            },
            debounce,
        );
        timer.set_value(handle.ok());
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = InputKey::from_key(&ev.key());
        if key == InputKey::Other {
            return;
        }
        ev.prevent_default();
        if matches!(key, InputKey::Enter | InputKey::Escape) {
            cancel_timer();
        }

        let outcome = session.try_update_value(|s| s.handle_key(key));
        sync();
        if let Some(KeyOutcome::Navigate(url)) = outcome {
            navigate_to(&url);
        }
    };

    let on_focus = move |_| {
        cancel_timer();
        session.update_value(|s| {
            s.focus();
        });
        sync();
    };

    let results = move || match current.get() {
        SearchView::Suggestions(recent) if recent.is_empty() => {
            view! { <div class="folio-search-empty"></div> }.into_any()
        }
        SearchView::Suggestions(recent) => view! {
          <div class="folio-search-suggestions">
            <span class="folio-search-suggestions-title">"Recent searches"</span>
            <ul>
              {recent
                .into_iter()
                .enumerate()
                .map(|(index, entry)| {
                  view! {
                    <li class="folio-search-suggestion">
                      <button
                        type="button"
                        on:click=move |_| {
                          session.update_value(|s| {
                            s.select_suggestion(index);
                          });
                          sync();
                          if let Some(input) = input_ref.get_untracked() {
                            let _ = input.focus();
                          }
                        }
                      >
                        {entry}
                      </button>
                    </li>
                  }
                })
                .collect_view()}
            </ul>
            <button
              type="button"
              class="folio-search-clear-recent"
              on:click=move |_| {
                session.update_value(|s| s.clear_recent_searches());
                sync();
              }
            >
              "Clear"
            </button>
          </div>
        }
        .into_any(),
        SearchView::Results(hits) if hits.is_empty() => view! {
          <div class="folio-search-no-results">
            "No results found for \"" {move || query.get().trim().to_string()} "\""
          </div>
        }
        .into_any(),
        SearchView::Results(hits) => {
            let q = query.get_untracked();
            view! {
              <ul class="folio-search-list" role="listbox">
                {hits
                  .into_iter()
                  .enumerate()
                  .map(|(index, hit)| {
                    let doc = hit.document;
                    let title = highlight(&doc.title, &q);
                    let committed = q.clone();
                    let preview = doc.content_preview;
                    view! {
                      <li
                        id=result_id(index)
                        class="folio-search-item"
                        class:selected=move || selected.get() == Some(index)
                        role="option"
                        aria-selected=move || (selected.get() == Some(index)).to_string()
                      >
                        <a
                          href=doc.url
                          class="folio-search-link"
                          on:click=move |_| {
                            session.update_value(|s| {
                              s.record_recent_search(&committed);
                            });
                          }
                        >
                          <span class="folio-search-title" inner_html=title></span>
                          <span class="folio-search-category">{doc.category.as_str()}</span>
                          {(!preview.is_empty())
                            .then(move || {
                              view! { <span class="folio-search-preview">{preview}</span> }
                            })}
                        </a>
                      </li>
                    }
                  })
                  .collect_view()}
              </ul>
            }
            .into_any()
        }
    };

    view! {
      <div class="folio-search">
        <div class="folio-search-box">
          <input
            node_ref=input_ref
            type="search"
            class="folio-search-input"
            placeholder=placeholder
            autocomplete="off"
            role="combobox"
            aria-autocomplete="list"
            aria-controls=RESULTS_ID
            aria-expanded=move || current.with(is_expanded).to_string()
            aria-activedescendant=move || selected.get().map(result_id)
            prop:value=move || text.get()
            on:input=on_input
            on:keydown=on_keydown
            on:focus=on_focus
          />
          <Show when=move || loading.get()>
            <span class="folio-search-spinner" aria-label="Loading"></span>
          </Show>
          <kbd class="folio-search-hint">"/"</kbd>
        </div>
        <div id=RESULTS_ID class="folio-search-results">
          {results}
        </div>
        <div class="folio-search-status" role="status" aria-live="polite">
          {move || current.with(status_text)}
        </div>
        <SearchShortcut input=input_ref />
      </div>
    }
}

/// Whether the result list is showing anything.
fn is_expanded(view: &SearchView) -> bool {
    match view {
        SearchView::Suggestions(recent) => !recent.is_empty(),
        SearchView::Results(hits) => !hits.is_empty(),
    }
}

/// Screen-reader announcement for the current view.
fn status_text(view: &SearchView) -> String {
    match view {
        SearchView::Suggestions(_) => String::new(),
        SearchView::Results(hits) => match hits.len() {
            0 => "No results".to_string(),
            1 => "1 result".to_string(),
            n => format!("{n} results"),
        },
    }
}
