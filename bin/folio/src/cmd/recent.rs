//! Recent command - inspect the recent-search log

use std::path::Path;

use color_eyre::eyre::Result;
use folio_client::RecentSearches;

use crate::store::FileStore;

/// Run the recent command.
///
/// Prints the remembered queries, most recent first, or forgets them all.
pub fn run(config_path: &Path, state_path: &Path, clear: bool) -> Result<()> {
    let config = crate::load_config(config_path)?;
    let mut recent = RecentSearches::from_config(FileStore::new(state_path), &config.search);
    tracing::info!(?state_path, entries = recent.len(), clear, "Recent searches");

    if clear {
        recent.clear();
        println!("Cleared recent searches");
        return Ok(());
    }

    if recent.is_empty() {
        println!("No recent searches");
    }
    for entry in recent.entries() {
        println!("{entry}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use folio_client::KeyValueStore;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_clear_removes_stored_log() {
        let dir = TempDir::new().unwrap();
        let state = dir.path().join("state.json");
        let store = FileStore::new(&state);
        store.set("folio:recent-searches", r#"["rust","leptos"]"#).unwrap();

        run(&dir.path().join("folio.toml"), &state, false).unwrap();
        assert!(store.get("folio:recent-searches").unwrap().is_some());

        run(&dir.path().join("folio.toml"), &state, true).unwrap();
        assert_eq!(store.get("folio:recent-searches").unwrap(), None);
    }
}
