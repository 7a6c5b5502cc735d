//! Content collection.
//!
//! Walks the content directory and turns each Markdown page into a
//! [`SearchDocument`].

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use folio_core::{Category, Config, CoreError, SearchDocument, frontmatter::parse_frontmatter};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    Result,
    text::{markdown_to_text, preview},
};

const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Collects search documents from a content directory.
#[derive(Debug, Clone)]
pub struct ContentCollector {
    content_dir: PathBuf,
    include_drafts: bool,
    default_author: Option<String>,
    preview_chars: usize,
}

impl ContentCollector {
    /// Create a collector with default settings.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            include_drafts: false,
            default_author: None,
            preview_chars: 160,
        }
    }

    /// Create a collector using the site and content settings.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.content.dir)
            .with_drafts(config.content.drafts)
            .with_author(config.site.author.clone())
            .with_preview_chars(config.search.preview_chars)
    }

    /// Include pages marked `draft`.
    #[must_use]
    pub fn with_drafts(mut self, include: bool) -> Self {
        self.include_drafts = include;
        self
    }

    /// Author used when a page does not name one.
    #[must_use]
    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.default_author = author;
        self
    }

    /// Maximum preview length in characters.
    #[must_use]
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    /// Collect every indexable page.
    ///
    /// Pages that fail to parse are skipped with a warning. A missing
    /// content directory yields no documents.
    pub fn collect(&self) -> Result<Vec<SearchDocument>> {
        info!(dir = %self.content_dir.display(), "collecting content");

        let files = self.find_content_files()?;
        info!(count = files.len(), "found content files");

        let mut documents = Vec::with_capacity(files.len());
        for path in &files {
            match self.parse_file(path) {
                Ok(Some(doc)) => documents.push(doc),
                Ok(None) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "failed to parse file"),
            }
        }

        info!(documents = documents.len(), "content collection complete");
        Ok(documents)
    }

    fn find_content_files(&self) -> Result<Vec<PathBuf>> {
        if !self.content_dir.exists() {
            warn!(dir = %self.content_dir.display(), "content directory does not exist");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.content_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && is_content_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Parse a single page. Returns `None` for pages that are not indexed.
    pub fn parse_file(&self, path: &Path) -> Result<Option<SearchDocument>> {
        debug!(path = %path.display(), "parsing file");

        let raw = fs::read_to_string(path)?;
        let (frontmatter, body) = parse_frontmatter(&raw, path)?;
        frontmatter.validate(path)?;

        if frontmatter.draft && !self.include_drafts {
            debug!(path = %path.display(), "skipping draft");
            return Ok(None);
        }

        let relative = path.strip_prefix(&self.content_dir).unwrap_or(path);
        let slug = slug_for(relative);

        let category = match frontmatter
            .category
            .or_else(|| section_of(&slug).and_then(Category::from_section))
        {
            Some(category) => category,
            None => {
                debug!(path = %path.display(), "no category, not indexed");
                return Ok(None);
            }
        };

        let id = match frontmatter.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ if slug.is_empty() => category.as_str().to_string(),
            _ => slug.clone(),
        };

        let content = markdown_to_text(&body);
        let description = frontmatter.description.clone().unwrap_or_default();
        let summary = if content.is_empty() { &description } else { &content };

        let document = SearchDocument {
            id,
            title: frontmatter.title.trim().to_string(),
            content_preview: preview(summary, self.preview_chars),
            description,
            url: url_for_slug(&slug),
            category,
            tags: frontmatter.tags.clone(),
            author: frontmatter
                .author
                .clone()
                .or_else(|| self.default_author.clone())
                .unwrap_or_default(),
            date: frontmatter.iso_date().unwrap_or_default(),
            content,
        };
        document
            .validate()
            .map_err(|e| CoreError::frontmatter(path, e.to_string()))?;

        Ok(Some(document))
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext.as_str()))
}

/// Slug for a path relative to the content directory.
///
/// `blog/hello.md` becomes `blog/hello`; an `index.md` takes its directory's
/// slug, so the root index has an empty slug.
pub fn slug_for(relative: &Path) -> String {
    let mut parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(last) = parts.pop() {
        let stem = Path::new(&last)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or(last);
        if stem != "index" && stem != "_index" {
            parts.push(stem);
        }
    }

    parts.join("/")
}

/// Site URL for a slug, with leading and trailing slashes.
pub fn url_for_slug(slug: &str) -> String {
    if slug.is_empty() {
        "/".to_string()
    } else {
        format!("/{slug}/")
    }
}

fn section_of(slug: &str) -> Option<&str> {
    slug.split('/').next().filter(|s| !s.is_empty())
}
