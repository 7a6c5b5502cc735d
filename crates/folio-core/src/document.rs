//! Search documents and index-level invariants.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Kind of content a document comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Blog post.
    Blog,
    /// Project page.
    Project,
    /// Curriculum vitae section.
    Cv,
}

impl Category {
    /// Map a content section name to a category.
    ///
    /// Accepts both singular and plural section names (`project`, `projects`).
    pub fn from_section(section: &str) -> Option<Self> {
        match section.to_lowercase().as_str() {
            "blog" | "posts" | "post" => Some(Self::Blog),
            "project" | "projects" => Some(Self::Project),
            "cv" | "resume" => Some(Self::Cv),
            _ => None,
        }
    }

    /// Lowercase label used in JSON and in rendered results.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Project => "project",
            Self::Cv => "cv",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One indexable unit of site content.
///
/// Produced once at build time and immutable at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocument {
    /// Unique identifier within the index.
    pub id: String,

    /// Document title.
    pub title: String,

    /// Short description.
    #[serde(default)]
    pub description: String,

    /// Navigation target.
    pub url: String,

    /// Content category.
    pub category: Category,

    /// Ordered tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Short excerpt shown under the title.
    #[serde(default)]
    pub content_preview: String,

    /// Full plain text, only used for matching.
    #[serde(default)]
    pub content: String,

    /// Author name.
    #[serde(default)]
    pub author: String,

    /// Publication date as an ISO string.
    #[serde(default)]
    pub date: String,
}

impl SearchDocument {
    /// Create a document with the required fields set and everything else empty.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            url: url.into(),
            category,
            tags: Vec::new(),
            content_preview: String::new(),
            content: String::new(),
            author: String::new(),
            date: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the full content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Check the per-document invariants.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::document(&self.id, "id must not be empty"));
        }
        if self.url.trim().is_empty() {
            return Err(CoreError::document(&self.id, "url must not be empty"));
        }
        Ok(())
    }
}

/// Summary of an index and the invariant violations found in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    /// Number of documents.
    pub documents: usize,

    /// Ids appearing more than once, in first-seen order.
    pub duplicate_ids: Vec<String>,

    /// Ids of documents with an empty URL.
    pub empty_urls: Vec<String>,

    /// Document count per category.
    pub categories: BTreeMap<Category, usize>,
}

impl IndexReport {
    /// Inspect a document list.
    pub fn inspect(documents: &[SearchDocument]) -> Self {
        let mut seen = HashSet::new();
        let mut report = Self {
            documents: documents.len(),
            ..Self::default()
        };

        for doc in documents {
            if !seen.insert(doc.id.as_str()) && !report.duplicate_ids.contains(&doc.id) {
                report.duplicate_ids.push(doc.id.clone());
            }
            if doc.url.trim().is_empty() {
                report.empty_urls.push(doc.id.clone());
            }
            *report.categories.entry(doc.category).or_default() += 1;
        }

        report
    }

    /// Whether the index satisfies all invariants.
    pub fn is_valid(&self) -> bool {
        self.duplicate_ids.is_empty() && self.empty_urls.is_empty()
    }

    /// Convert violations into an error.
    pub fn into_result(self) -> Result<Self> {
        if let Some(id) = self.duplicate_ids.first() {
            return Err(CoreError::document(id, "duplicate id"));
        }
        if let Some(id) = self.empty_urls.first() {
            return Err(CoreError::document(id, "url must not be empty"));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_section() {
        assert_eq!(Category::from_section("blog"), Some(Category::Blog));
        assert_eq!(Category::from_section("Projects"), Some(Category::Project));
        assert_eq!(Category::from_section("cv"), Some(Category::Cv));
        assert_eq!(Category::from_section("about"), None);
    }

    #[test]
    fn test_document_wire_format() {
        let json = r#"{
            "id": "blog/generics",
            "title": "TypeScript Generics Guide",
            "url": "/blog/generics/",
            "category": "blog",
            "tags": ["typescript", "types"],
            "contentPreview": "Generics let you...",
            "date": "2024-03-01"
        }"#;

        let doc: SearchDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.category, Category::Blog);
        assert_eq!(doc.content_preview, "Generics let you...");
        assert!(doc.description.is_empty());
        assert!(doc.content.is_empty());

        let out = serde_json::to_string(&doc).unwrap();
        assert!(out.contains("\"contentPreview\""));
        assert!(out.contains("\"category\":\"blog\""));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let json = r#"{"id":"x","title":"X","url":"/x","category":"gallery"}"#;
        assert!(serde_json::from_str::<SearchDocument>(json).is_err());
    }

    #[test]
    fn test_validate_empty_url() {
        let doc = SearchDocument::new("a", "A", " ", Category::Blog);
        assert!(doc.validate().is_err());
        assert!(SearchDocument::new("a", "A", "/a", Category::Blog).validate().is_ok());
    }

    #[test]
    fn test_index_report() {
        let docs = vec![
            SearchDocument::new("a", "A", "/a", Category::Blog),
            SearchDocument::new("b", "B", "", Category::Project),
            SearchDocument::new("a", "A again", "/a2", Category::Blog),
            SearchDocument::new("a", "A third", "/a3", Category::Cv),
        ];

        let report = IndexReport::inspect(&docs);
        assert_eq!(report.documents, 4);
        assert_eq!(report.duplicate_ids, vec!["a"]);
        assert_eq!(report.empty_urls, vec!["b"]);
        assert_eq!(report.categories[&Category::Blog], 2);
        assert!(!report.is_valid());
        assert!(report.into_result().is_err());
    }

    #[test]
    fn test_index_report_valid() {
        let docs = vec![
            SearchDocument::new("a", "A", "/a", Category::Blog),
            SearchDocument::new("b", "B", "/b", Category::Cv),
        ];
        let report = IndexReport::inspect(&docs).into_result().unwrap();
        assert_eq!(report.documents, 2);
    }
}
