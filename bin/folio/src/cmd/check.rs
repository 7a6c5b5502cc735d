//! Check command - validate a built search index

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr, bail};
use folio_search::{MAX_INDEX_SIZE, SearchIndex};

/// Run the check command.
///
/// Loads the index and reports duplicate ids, empty URLs and size.
pub fn run(config_path: &Path, index_path: Option<&Path>) -> Result<()> {
    let config = crate::load_config(config_path)?;
    let index_path: PathBuf =
        index_path.map_or_else(|| PathBuf::from(&config.content.output), Path::to_path_buf);
    tracing::info!(?index_path, "Checking search index");

    let json = std::fs::read_to_string(&index_path)
        .wrap_err_with(|| format!("Failed to read {}", index_path.display()))?;
    let index = SearchIndex::from_json(&json).wrap_err("Index is not a valid document list")?;
    let report = index.report();

    println!("Checking {}...", index_path.display());
    println!("  Documents: {}", report.documents);
    for (category, count) in &report.categories {
        println!("    {:<9} {count}", category.as_str());
    }

    if json.len() > MAX_INDEX_SIZE {
        println!(
            "  ⚠ Index is {:.1} KB, above the recommended {} KB",
            json.len() as f64 / 1024.0,
            MAX_INDEX_SIZE / 1024
        );
    }

    for id in &report.duplicate_ids {
        println!("  ✗ Duplicate id: {id}");
    }
    for id in &report.empty_urls {
        println!("  ✗ Empty url: {id}");
    }

    let violations = report.duplicate_ids.len() + report.empty_urls.len();
    if violations > 0 {
        bail!("Index check failed with {violations} error(s)");
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const DOC: &str = r#"{"id":"a","title":"A","url":"/a/","category":"blog"}"#;

    #[test]
    fn test_check_valid_index() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("search-index.json");
        fs::write(&path, format!("[{DOC}]")).unwrap();

        assert!(run(&dir.path().join("folio.toml"), Some(&path)).is_ok());
    }

    #[test]
    fn test_check_duplicate_ids_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("search-index.json");
        fs::write(&path, format!("[{DOC},{DOC}]")).unwrap();

        assert!(run(&dir.path().join("folio.toml"), Some(&path)).is_err());
    }

    #[test]
    fn test_check_malformed_index_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("search-index.json");
        fs::write(&path, "{\"not\": \"a list\"}").unwrap();

        assert!(run(&dir.path().join("folio.toml"), Some(&path)).is_err());
    }
}
