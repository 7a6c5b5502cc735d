//! Global keyboard shortcut for the search input.

use folio_client::{browser::focus_target, is_search_shortcut};
use leptos::{html, prelude::*};
use tracing::warn;

/// Focuses `input` when `/` is pressed outside an editable element.
#[component]
#[allow(clippy::unused_unit)]
pub fn SearchShortcut(
    /// The search input to focus.
    input: NodeRef<html::Input>,
) -> impl IntoView {
    Effect::new(move |_| {
        use wasm_bindgen::{JsCast, prelude::*};

        let handler =
            Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
                if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
                    return;
                }
                if !is_search_shortcut(&ev.key(), focus_target(ev.target())) {
                    return;
                }
                if let Some(element) = input.get_untracked() {
                    ev.prevent_default();
                    let _ = element.focus();
                }
            });

        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) =
            window.add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
        {
            warn!(error = ?e, "failed to register search shortcut");
            return;
        }

        // Leak the closure to keep it alive
        handler.forget();
    });
}
