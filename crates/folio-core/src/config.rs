//! Site and search configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Content collection settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Search index and client settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Default author for documents without one in their frontmatter.
    #[serde(default)]
    pub author: Option<String>,
}

/// Content collection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding Markdown sources.
    #[serde(default = "default_content_dir")]
    pub dir: String,

    /// File the search index artifact is written to.
    #[serde(default = "default_output")]
    pub output: String,

    /// Whether drafts are indexed.
    #[serde(default)]
    pub drafts: bool,
}

/// Search configuration shared by the index builder and the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// URL path the client fetches the index from.
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Storage key for the recent-search log.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Quiet period before a keystroke burst triggers a query (milliseconds).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of results per query.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Maximum number of remembered queries.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Minimum trimmed length of a query worth remembering.
    #[serde(default = "default_min_recent_len")]
    pub min_recent_len: usize,

    /// Highest score (0 = perfect, 1 = worst) still counted as a match.
    #[serde(default = "default_threshold")]
    pub threshold: f32,

    /// Number of leading content characters considered for matching.
    #[serde(default = "default_content_chars")]
    pub content_chars: usize,

    /// Length of the generated `contentPreview` excerpt.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    /// Per-field weights.
    #[serde(default)]
    pub weights: FieldWeights,
}

/// Relative importance of each matched field, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    #[serde(default = "default_title_weight")]
    pub title: f32,
    #[serde(default = "default_tags_weight")]
    pub tags: f32,
    #[serde(default = "default_description_weight")]
    pub description: f32,
    #[serde(default = "default_content_weight")]
    pub content: f32,
}

// Default value functions
fn default_site_title() -> String {
    "Folio".to_string()
}

fn default_content_dir() -> String {
    "content".to_string()
}

fn default_output() -> String {
    "public/search-index.json".to_string()
}

fn default_index_path() -> String {
    "/search-index.json".to_string()
}

fn default_storage_key() -> String {
    "folio:recent-searches".to_string()
}

fn default_debounce_ms() -> u64 {
    200
}

fn default_max_results() -> usize {
    8
}

fn default_recent_limit() -> usize {
    5
}

fn default_min_recent_len() -> usize {
    2
}

fn default_threshold() -> f32 {
    0.8
}

fn default_content_chars() -> usize {
    2000
}

fn default_preview_chars() -> usize {
    160
}

fn default_title_weight() -> f32 {
    1.0
}

fn default_tags_weight() -> f32 {
    0.8
}

fn default_description_weight() -> f32 {
    0.6
}

fn default_content_weight() -> f32 {
    0.3
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_site_title(),
            author: None,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            output: default_output(),
            drafts: false,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            storage_key: default_storage_key(),
            debounce_ms: default_debounce_ms(),
            max_results: default_max_results(),
            recent_limit: default_recent_limit(),
            min_recent_len: default_min_recent_len(),
            threshold: default_threshold(),
            content_chars: default_content_chars(),
            preview_chars: default_preview_chars(),
            weights: FieldWeights::default(),
        }
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: default_title_weight(),
            tags: default_tags_weight(),
            description: default_description_weight(),
            content: default_content_weight(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, layering `FOLIO__SECTION__KEY` environment variables on top.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file with environment overrides if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_with_env(path)
        } else {
            tracing::info!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        self.search.validate()
    }
}

impl SearchConfig {
    /// Validate search settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(CoreError::config("search.max_results must be at least 1"));
        }

        if self.recent_limit == 0 {
            return Err(CoreError::config("search.recent_limit must be at least 1"));
        }

        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(CoreError::config(format!(
                "search.threshold must be in (0, 1], got {}",
                self.threshold
            )));
        }

        if self.storage_key.is_empty() {
            return Err(CoreError::config("search.storage_key cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
title = "Test Site"
author = "Jane Doe"

[content]
dir = "src/content"
output = "dist/search-index.json"
drafts = true

[search]
debounce_ms = 150
max_results = 10
storage_key = "site:recent"

[search.weights]
content = 0.1
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Test Site");
        assert_eq!(config.site.author.as_deref(), Some("Jane Doe"));
        assert_eq!(config.content.dir, "src/content");
        assert_eq!(config.content.output, "dist/search-index.json");
        assert!(config.content.drafts);
        assert_eq!(config.search.debounce_ms, 150);
        assert_eq!(config.search.max_results, 10);
        assert_eq!(config.search.storage_key, "site:recent");
        assert_eq!(config.search.weights.content, 0.1);
        assert_eq!(config.search.weights.title, 1.0);
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        let minimal_config = r#"
[site]
title = "Minimal Site"
"#;
        std::fs::write(&config_path, minimal_config).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.content.dir, "content");
        assert!(!config.content.drafts);
        assert_eq!(config.search.index_path, "/search-index.json");
        assert_eq!(config.search.debounce_ms, 200);
        assert_eq!(config.search.max_results, 8);
        assert_eq!(config.search.recent_limit, 5);
        assert_eq!(config.search.min_recent_len, 2);
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        let config_content = r#"
[site]
title = ""
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_search_validation() {
        let mut search = SearchConfig::default();
        assert!(search.validate().is_ok());

        search.max_results = 0;
        assert!(search.validate().is_err());

        search = SearchConfig {
            threshold: 1.5,
            ..SearchConfig::default()
        };
        let err = search.validate().unwrap_err();
        assert!(err.to_string().contains("threshold"));
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/folio.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/folio.toml")).unwrap();
        assert_eq!(config.site.title, "Folio");
        assert_eq!(config.search.max_results, 8);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        // Only this test touches FOLIO__SEARCH__* variables.
        // SAFETY: no other thread in this test binary reads or writes them.
        unsafe { std::env::set_var("FOLIO__SEARCH__MAX_RESULTS", "3") };
        let overridden = Config::load_or_default(&config_path);
        unsafe { std::env::set_var("FOLIO__SEARCH__MAX_RESULTS", "0") };
        let invalid = Config::load_with_env(&config_path);
        unsafe { std::env::remove_var("FOLIO__SEARCH__MAX_RESULTS") };

        let config = overridden.expect("load config");
        assert_eq!(config.search.max_results, 3);
        assert_eq!(config.search.debounce_ms, 150);
        assert_eq!(config.site.title, "Test Site");

        let err = invalid.unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }
}
