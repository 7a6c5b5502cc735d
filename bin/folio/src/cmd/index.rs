//! Index command - builds the search index from content

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr};
use folio_search::{ContentCollector, SearchIndex};

/// Run the index command.
///
/// Collects the content directory and writes the JSON index the client loads.
pub fn run(
    config_path: &Path,
    content: Option<&Path>,
    output: Option<&Path>,
    drafts: bool,
) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?content, ?output, drafts, "Building search index");

    let mut config = crate::load_config(config_path)?;

    if let Some(dir) = content {
        config.content.dir = dir.to_string_lossy().to_string();
    }
    if drafts {
        config.content.drafts = true;
    }
    let output: PathBuf =
        output.map_or_else(|| PathBuf::from(&config.content.output), Path::to_path_buf);

    let documents = ContentCollector::from_config(&config)
        .collect()
        .wrap_err("Failed to collect content")?;
    let index = SearchIndex::new(documents);
    let bytes = index
        .write_to_file(&output)
        .wrap_err_with(|| format!("Failed to write index to {}", output.display()))?;

    let report = index.report();
    let duration = start.elapsed();

    println!();
    println!("  Search index for {} built successfully!", config.site.title);
    println!();
    println!("  Documents:  {}", report.documents);
    for (category, count) in &report.categories {
        println!("    {:<9} {count}", category.as_str());
    }
    println!("  Size:       {:.1} KB", bytes as f64 / 1024.0);
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output.display());
    println!();

    tracing::info!(documents = report.documents, bytes, ?duration, "Search index built");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_run_writes_index() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content/blog");
        fs::create_dir_all(&content).unwrap();
        fs::write(content.join("hello.md"), "---\ntitle: Hello\n---\nWorld\n").unwrap();
        fs::write(
            content.join("wip.md"),
            "---\ntitle: Draft\ndraft: true\n---\nSoon\n",
        )
        .unwrap();

        let output = dir.path().join("public/search-index.json");
        run(
            &dir.path().join("folio.toml"),
            Some(&dir.path().join("content")),
            Some(&output),
            false,
        )
        .unwrap();

        let index = SearchIndex::read_from_file(&output).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.documents()[0].url, "/blog/hello/");

        run(
            &dir.path().join("folio.toml"),
            Some(&dir.path().join("content")),
            Some(&output),
            true,
        )
        .unwrap();
        assert_eq!(SearchIndex::read_from_file(&output).unwrap().len(), 2);
    }

    #[test]
    fn test_run_refuses_duplicate_ids() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        fs::create_dir_all(content.join("blog")).unwrap();
        fs::write(content.join("blog/a.md"), "---\ntitle: A\nid: same\n---\n").unwrap();
        fs::write(content.join("blog/b.md"), "---\ntitle: B\nid: same\n---\n").unwrap();

        let output = dir.path().join("search-index.json");
        let result = run(
            &dir.path().join("folio.toml"),
            Some(&content),
            Some(&output),
            false,
        );
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
