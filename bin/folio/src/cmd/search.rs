//! Search command - query an index from the terminal

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use color_eyre::eyre::{Result, WrapErr, bail};
use folio_client::{
    InputKey, KeyOutcome, KeyValueStore, SearchEngine, SearchSession, SearchView,
    render::{render_results, render_suggestions},
};

use crate::store::FileStore;

/// Run the search command.
///
/// Drives the same session the browser component uses: the query is typed,
/// then `keys` are pressed in order. Pressing Enter commits the selection and
/// records the query in the recent-search log at `state_path`.
pub fn run(
    config_path: &Path,
    state_path: &Path,
    query: &str,
    index_path: Option<&Path>,
    keys: &[String],
    html: bool,
) -> Result<()> {
    let config = crate::load_config(config_path)?;
    let index_path: PathBuf =
        index_path.map_or_else(|| PathBuf::from(&config.content.output), Path::to_path_buf);
    let keys = keys
        .iter()
        .map(|name| parse_key(name))
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(?index_path, query, ?keys, "Searching");

    let engine = SearchEngine::load_file(&index_path, &config.search)
        .wrap_err_with(|| format!("Failed to load index from {}", index_path.display()))?;
    let mut session = SearchSession::new(engine, FileStore::new(state_path), &config.search);

    let target = replay(&mut session, query, &keys);

    if html {
        let markup = match session.view() {
            SearchView::Suggestions(recent) => render_suggestions(recent),
            SearchView::Results(hits) => {
                render_results(hits, session.last_query(), session.selected())
            }
        };
        println!("{markup}");
    } else {
        print_view(&session);
    }

    if let Some(url) = target {
        println!("→ {url}");
    }

    Ok(())
}

/// Type `query`, then press `keys` until one navigates.
///
/// Returns the navigation target, if any.
pub fn replay<S: KeyValueStore>(
    session: &mut SearchSession<S>,
    query: &str,
    keys: &[InputKey],
) -> Option<String> {
    session.input(query, Duration::ZERO);
    session.flush();

    for &key in keys {
        match session.handle_key(key) {
            KeyOutcome::Navigate(url) => return Some(url),
            outcome => tracing::debug!(?key, ?outcome, "Key handled"),
        }
    }
    None
}

/// Parse a key name given on the command line.
fn parse_key(name: &str) -> Result<InputKey> {
    let key = match name.trim().to_ascii_lowercase().as_str() {
        "down" | "arrowdown" => InputKey::ArrowDown,
        "up" | "arrowup" => InputKey::ArrowUp,
        "enter" => InputKey::Enter,
        "esc" | "escape" => InputKey::Escape,
        _ => bail!("Unknown key '{name}' (expected down, up, enter or escape)"),
    };
    Ok(key)
}

fn print_view<S: KeyValueStore>(session: &SearchSession<S>) {
    match session.view() {
        SearchView::Suggestions(recent) if recent.is_empty() => {
            println!("No recent searches");
        }
        SearchView::Suggestions(recent) => {
            println!("Recent searches:");
            for entry in recent {
                println!("  {entry}");
            }
        }
        SearchView::Results(hits) if hits.is_empty() => {
            println!("No results found for \"{}\"", session.last_query().trim());
        }
        SearchView::Results(hits) => {
            for (index, hit) in hits.iter().enumerate() {
                let marker = if session.selected() == Some(index) { '>' } else { ' ' };
                let doc = &hit.document;
                println!(
                    "{marker} {:>2}. {} [{}] {} ({:.3})",
                    index + 1,
                    doc.title,
                    doc.category,
                    doc.url,
                    hit.score
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use folio_client::MemoryStore;
    use folio_core::{Category, SearchConfig, SearchDocument};
    use tempfile::TempDir;

    use super::*;

    fn session() -> SearchSession<MemoryStore> {
        let config = SearchConfig::default();
        let docs = vec![
            SearchDocument::new("rust", "Learning Rust", "/blog/rust/", Category::Blog),
            SearchDocument::new("rusty", "Rusty Tools", "/projects/rusty/", Category::Project),
        ];
        SearchSession::new(SearchEngine::new(docs, &config), MemoryStore::new(), &config)
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("Down").unwrap(), InputKey::ArrowDown);
        assert_eq!(parse_key("arrowup").unwrap(), InputKey::ArrowUp);
        assert_eq!(parse_key("ENTER").unwrap(), InputKey::Enter);
        assert_eq!(parse_key("esc").unwrap(), InputKey::Escape);
        assert!(parse_key("tab").is_err());
    }

    #[test]
    fn test_replay_enter_without_selection_takes_first() {
        let mut session = session();
        let first = session.query("rust").clone();
        let SearchView::Results(hits) = first else {
            panic!("expected results");
        };

        let target = replay(&mut session, "rust", &[InputKey::Enter]);
        assert_eq!(target.as_deref(), Some(hits[0].document.url.as_str()));
        assert_eq!(session.recent(), ["rust"]);
    }

    #[test]
    fn test_replay_arrow_wraps_to_last() {
        let mut session = session();
        let target = replay(&mut session, "rust", &[InputKey::ArrowUp, InputKey::Enter]);

        let last = session.results().last().unwrap().document.url.clone();
        assert_eq!(target, Some(last));
    }

    #[test]
    fn test_replay_escape_clears() {
        let mut session = session();
        let target = replay(&mut session, "rust", &[InputKey::Escape]);
        assert_eq!(target, None);
        assert_eq!(session.text(), "");
        assert!(matches!(session.view(), SearchView::Suggestions(_)));
    }

    #[test]
    fn test_run_records_recent_search() {
        let dir = TempDir::new().unwrap();
        let index = dir.path().join("search-index.json");
        fs::write(
            &index,
            r#"[{"id":"rust","title":"Learning Rust","url":"/blog/rust/","category":"blog"}]"#,
        )
        .unwrap();
        let state = dir.path().join("state.json");

        run(
            &dir.path().join("folio.toml"),
            &state,
            "rust",
            Some(&index),
            &["enter".to_string()],
            false,
        )
        .unwrap();

        let stored = FileStore::new(&state)
            .get("folio:recent-searches")
            .unwrap()
            .unwrap();
        assert_eq!(stored, r#"["rust"]"#);
    }

    #[test]
    fn test_run_missing_index_fails() {
        let dir = TempDir::new().unwrap();
        let result = run(
            &dir.path().join("folio.toml"),
            &dir.path().join("state.json"),
            "rust",
            Some(&dir.path().join("missing.json")),
            &[],
            false,
        );
        assert!(result.is_err());
    }
}
