//! The serialized search index.
//!
//! On disk the index is a bare JSON array of documents, the shape the
//! client fetches from `/search-index.json`.

use std::{fs, path::Path};

use folio_core::{IndexReport, SearchDocument};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::Result;

/// Recommended maximum size of the serialized index (500KB).
pub const MAX_INDEX_SIZE: usize = 500 * 1024;

/// Ordered list of search documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchIndex {
    documents: Vec<SearchDocument>,
}

impl SearchIndex {
    /// Build an index, ordering documents newest first and then by id.
    pub fn new(mut documents: Vec<SearchDocument>) -> Self {
        documents.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Self { documents }
    }

    /// Documents in index order.
    pub fn documents(&self) -> &[SearchDocument] {
        &self.documents
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Summarise the index and its invariant violations.
    pub fn report(&self) -> IndexReport {
        IndexReport::inspect(&self.documents)
    }

    /// Check unique ids and non-empty URLs.
    pub fn validate(&self) -> Result<IndexReport> {
        Ok(self.report().into_result()?)
    }

    /// Serialize the index to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize an index from JSON, keeping the stored order.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read an index file.
    pub fn read_from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Validate and write the index, returning the number of bytes written.
    ///
    /// Nothing is written when validation fails.
    pub fn write_to_file(&self, path: &Path) -> Result<usize> {
        let report = self.validate()?;
        let json = self.to_json()?;

        if json.len() > MAX_INDEX_SIZE {
            warn!(
                size = json.len(),
                max = MAX_INDEX_SIZE,
                "search index exceeds recommended size"
            );
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &json)?;

        info!(
            path = %path.display(),
            documents = report.documents,
            bytes = json.len(),
            "wrote search index"
        );
        Ok(json.len())
    }
}

impl From<Vec<SearchDocument>> for SearchIndex {
    fn from(documents: Vec<SearchDocument>) -> Self {
        Self::new(documents)
    }
}
