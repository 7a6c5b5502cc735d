//! Fuzzy matching and result ranking.
//!
//! Each document field is scored with `nucleo-matcher` and normalised against
//! the query's perfect self-match, so scores land in `[0, 1]` with 0 being a
//! perfect match. Field weights scale the match quality and a document keeps
//! its best field score.

use std::{fs, path::Path};

use folio_core::{SearchConfig, SearchDocument, config::FieldWeights};
use nucleo_matcher::{Config as MatcherConfig, Matcher, Utf32String};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::Result;

/// Query characters considered for matching; the rest is ignored.
///
/// Keeps nucleo's `u16` scores from overflowing on pasted text.
pub const MAX_QUERY_CHARS: usize = 256;

/// A document paired with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// The matched document.
    pub document: SearchDocument,

    /// Relevance score, lower is better.
    pub score: f32,

    /// Position of the document in the index.
    pub position: usize,
}

/// Pre-converted matching haystacks for one document.
struct IndexedDocument {
    document: SearchDocument,
    title: Utf32String,
    description: Utf32String,
    content: Utf32String,
    tags: Vec<Utf32String>,
}

impl IndexedDocument {
    fn new(document: SearchDocument, content_chars: usize) -> Self {
        let content: String = document.content.chars().take(content_chars).collect();
        Self {
            title: Utf32String::from(document.title.as_str()),
            description: Utf32String::from(document.description.as_str()),
            content: Utf32String::from(content.as_str()),
            tags: document
                .tags
                .iter()
                .map(|tag| Utf32String::from(tag.as_str()))
                .collect(),
            document,
        }
    }
}

/// In-memory fuzzy search structure over the site documents.
pub struct SearchEngine {
    documents: Vec<IndexedDocument>,
    matcher: Matcher,
    max_results: usize,
    threshold: f32,
    weights: FieldWeights,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("documents", &self.documents.len())
            .field("max_results", &self.max_results)
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl SearchEngine {
    /// Build the search structure over a document list.
    pub fn new(documents: Vec<SearchDocument>, config: &SearchConfig) -> Self {
        let mut matcher_config = MatcherConfig::DEFAULT;
        matcher_config.ignore_case = true;

        let documents: Vec<_> = documents
            .into_iter()
            .map(|doc| IndexedDocument::new(doc, config.content_chars))
            .collect();

        debug!(documents = documents.len(), "built search structure");

        Self {
            documents,
            matcher: Matcher::new(matcher_config),
            max_results: config.max_results,
            threshold: config.threshold,
            weights: config.weights,
        }
    }

    /// An engine with no documents; every query returns nothing.
    pub fn empty(config: &SearchConfig) -> Self {
        Self::new(Vec::new(), config)
    }

    /// Parse a serialized document list.
    pub fn from_json(json: &str, config: &SearchConfig) -> Result<Self> {
        let documents: Vec<SearchDocument> = serde_json::from_str(json)?;
        Ok(Self::new(documents, config))
    }

    /// Load a serialized document list from disk.
    pub fn load_file(path: &Path, config: &SearchConfig) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let engine = Self::from_json(&json, config)?;
        info!(path = %path.display(), documents = engine.len(), "loaded search index");
        Ok(engine)
    }

    /// Load from disk, degrading to an empty index on failure.
    pub fn load_file_or_empty(path: &Path, config: &SearchConfig) -> Self {
        Self::load_file(path, config).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "search index unavailable, using empty index");
            Self::empty(config)
        })
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterate over the indexed documents in index order.
    pub fn documents(&self) -> impl Iterator<Item = &SearchDocument> {
        self.documents.iter().map(|indexed| &indexed.document)
    }

    /// Run a query and return at most `max_results` hits, best first.
    ///
    /// Equal scores keep index order. Only the first [`MAX_QUERY_CHARS`]
    /// characters of the trimmed query are matched.
    pub fn search(&mut self, query: &str) -> Vec<SearchHit> {
        let needle: String = query
            .trim()
            .chars()
            .take(MAX_QUERY_CHARS)
            .collect::<String>()
            .to_lowercase();
        if needle.is_empty() || self.documents.is_empty() {
            return Vec::new();
        }

        let needle = Utf32String::from(needle.as_str());
        let Self {
            documents,
            matcher,
            max_results,
            threshold,
            weights,
        } = self;

        let perfect = matcher
            .fuzzy_match(needle.slice(..), needle.slice(..))
            .map_or(1.0, |score| f32::from(score.max(1)));

        let mut hits: Vec<SearchHit> = documents
            .iter()
            .enumerate()
            .filter_map(|(position, indexed)| {
                let mut field = |haystack: &Utf32String, weight: f32| {
                    field_score(matcher, haystack, &needle, perfect, weight)
                };

                let best = [
                    field(&indexed.title, weights.title),
                    field(&indexed.description, weights.description),
                    field(&indexed.content, weights.content),
                ]
                .into_iter()
                .chain(indexed.tags.iter().map(|tag| field(tag, weights.tags)))
                .flatten()
                .min_by(f32::total_cmp)?;

                (best <= *threshold).then(|| SearchHit {
                    document: indexed.document.clone(),
                    score: best,
                    position,
                })
            })
            .collect();

        // Stable sort keeps index order for ties.
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        hits.truncate(*max_results);
        hits
    }
}

/// Weighted, normalised score of one field, `None` when it does not match.
fn field_score(
    matcher: &mut Matcher,
    haystack: &Utf32String,
    needle: &Utf32String,
    perfect: f32,
    weight: f32,
) -> Option<f32> {
    if weight <= 0.0 {
        return None;
    }
    let raw = matcher.fuzzy_match(haystack.slice(..), needle.slice(..))?;
    let quality = (f32::from(raw) / perfect).min(1.0);
    Some(1.0 - quality * weight.min(1.0))
}

#[cfg(test)]
mod tests {
    use folio_core::Category;

    use super::*;

    fn create_test_documents() -> Vec<SearchDocument> {
        vec![
            SearchDocument::new(
                "blog/generics",
                "TypeScript Generics Guide",
                "/blog/generics/",
                Category::Blog,
            )
            .with_description("Test-driven tour of generic constraints")
            .with_tags(["typescript"]),
            SearchDocument::new("blog/test-2", "Test Article 2", "/blog/test-2/", Category::Blog),
            SearchDocument::new("blog/test-3", "Test Article 3", "/blog/test-3/", Category::Blog),
        ]
    }

    #[test]
    fn test_query_matches_all_three() {
        let config = SearchConfig::default();
        let mut engine = SearchEngine::new(create_test_documents(), &config);

        let hits = engine.search("test");
        assert_eq!(hits.len(), 3);
        // Title matches outrank the description match.
        assert_eq!(hits[0].document.id, "blog/test-2");
        assert_eq!(hits[1].document.id, "blog/test-3");
        assert_eq!(hits[2].document.id, "blog/generics");
    }

    #[test]
    fn test_case_insensitive() {
        let config = SearchConfig::default();
        let mut engine = SearchEngine::new(create_test_documents(), &config);

        let upper = engine.search("TEST ARTICLE");
        let lower = engine.search("test article");
        assert_eq!(upper, lower);
        assert!(!upper.is_empty());
    }

    #[test]
    fn test_ties_keep_index_order() {
        let config = SearchConfig::default();
        let docs = (0..5)
            .map(|i| {
                SearchDocument::new(
                    format!("p{i}"),
                    "Same Title",
                    format!("/p{i}/"),
                    Category::Project,
                )
            })
            .collect();
        let mut engine = SearchEngine::new(docs, &config);

        let hits = engine.search("same");
        let positions: Vec<_> = hits.iter().map(|h| h.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_result_limit() {
        let config = SearchConfig::default();
        let docs = (0..20)
            .map(|i| {
                SearchDocument::new(
                    format!("b{i}"),
                    format!("Rust note {i}"),
                    format!("/b{i}/"),
                    Category::Blog,
                )
            })
            .collect();
        let mut engine = SearchEngine::new(docs, &config);

        assert_eq!(engine.search("rust").len(), 8);
    }

    #[test]
    fn test_scores_ascending() {
        let config = SearchConfig::default();
        let mut engine = SearchEngine::new(create_test_documents(), &config);

        let hits = engine.search("generics");
        assert!(!hits.is_empty());
        assert!(hits.windows(2).all(|w| w[0].score <= w[1].score));
        assert!(hits.iter().all(|h| (0.0..=1.0).contains(&h.score)));
    }

    #[test]
    fn test_tag_match() {
        let config = SearchConfig::default();
        let mut engine = SearchEngine::new(create_test_documents(), &config);

        let hits = engine.search("typescript");
        assert_eq!(hits[0].document.id, "blog/generics");
    }

    #[test]
    fn test_content_match() {
        let config = SearchConfig::default();
        let docs = vec![
            SearchDocument::new("cv", "Curriculum Vitae", "/cv/", Category::Cv)
                .with_content("Worked on distributed storage engines"),
        ];
        let mut engine = SearchEngine::new(docs, &config);

        let hits = engine.search("distributed");
        assert_eq!(hits.len(), 1);
        // Content-only matches carry the content weight penalty.
        assert!(hits[0].score >= 1.0 - config.weights.content - f32::EPSILON);
    }

    #[test]
    fn test_no_match() {
        let config = SearchConfig::default();
        let mut engine = SearchEngine::new(create_test_documents(), &config);
        assert!(engine.search("zzzzqqq").is_empty());
    }

    #[test]
    fn test_blank_query() {
        let config = SearchConfig::default();
        let mut engine = SearchEngine::new(create_test_documents(), &config);
        assert!(engine.search("").is_empty());
        assert!(engine.search("   ").is_empty());
    }

    #[test]
    fn test_markup_in_query() {
        let config = SearchConfig::default();
        let mut engine = SearchEngine::new(create_test_documents(), &config);
        let hits = engine.search(r#"<script>"alert('x')"</script>"#);
        assert!(hits.len() <= 8);
    }

    #[test]
    fn test_oversized_query() {
        let config = SearchConfig::default();
        let mut docs = create_test_documents();
        docs.push(SearchDocument::new("a", "a".repeat(300), "/a/", Category::Blog));
        let mut engine = SearchEngine::new(docs, &config);

        let hits = engine.search(&"a".repeat(5000));
        assert!(hits.len() <= config.max_results);
        assert!(hits.iter().all(|h| (0.0..=1.0).contains(&h.score)));
        assert_eq!(hits.first().map(|h| h.document.id.as_str()), Some("a"));

        // Only the leading characters count.
        let long = format!("test{}", " x".repeat(3000));
        assert_eq!(engine.search(&long), engine.search(&long[..MAX_QUERY_CHARS]));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"id": "a", "title": "Alpha", "url": "/a/", "category": "blog"},
            {"id": "b", "title": "Beta", "url": "/b/", "category": "cv"}
        ]"#;
        let engine = SearchEngine::from_json(json, &SearchConfig::default()).unwrap();
        assert_eq!(engine.len(), 2);
        assert_eq!(engine.documents().next().unwrap().title, "Alpha");
    }

    #[test]
    fn test_load_file_or_empty() {
        let config = SearchConfig::default();
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        let mut engine = SearchEngine::load_file_or_empty(&missing, &config);
        assert!(engine.is_empty());
        assert!(engine.search("anything").is_empty());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(SearchEngine::load_file(&broken, &config).is_err());
        assert!(SearchEngine::load_file_or_empty(&broken, &config).is_empty());
    }
}
