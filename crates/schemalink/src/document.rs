//! Page content access.
//!
//! The scanner does not extract text itself; it consumes positioned tokens
//! through [`DocumentReader`], so any extractor that can report token
//! bounding boxes in top-left page space can feed it. [`MemoryDocument`]
//! holds pre-extracted pages and backs both tests and the JSON token-dump
//! loader.

#[cfg(feature = "serde")]
use std::path::Path;

use schemalink_core::PageContent;

use crate::error::LinkError;

/// Source of extracted page content for one document.
pub trait DocumentReader {
    /// Stable identifier for the document, usually its file path.
    fn id(&self) -> &str;

    fn page_count(&self) -> usize;

    /// Page dimensions in points, `(width, height)`.
    fn page_size(&self, index: usize) -> Option<(f64, f64)>;

    /// Extracted content for one page (0-indexed).
    fn page(&self, index: usize) -> Result<PageContent, LinkError>;
}

/// A document whose pages are already extracted and held in memory.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    id: String,
    pages: Vec<PageContent>,
}

impl MemoryDocument {
    pub fn new(id: impl Into<String>, pages: Vec<PageContent>) -> Self {
        Self {
            id: id.into(),
            pages,
        }
    }

    /// Load a JSON token dump: the serialized form of `Vec<PageContent>`.
    /// The dump's file path becomes the document id.
    #[cfg(feature = "serde")]
    pub fn from_dump(path: &Path) -> Result<Self, LinkError> {
        let text = std::fs::read_to_string(path)?;
        let pages: Vec<PageContent> = serde_json::from_str(&text)
            .map_err(|e| LinkError::Config(format!("token dump {}: {e}", path.display())))?;
        Ok(Self::new(path.display().to_string(), pages))
    }

    /// Heights of all pages in order, as link synthesis expects them.
    pub fn page_heights(&self) -> Vec<f64> {
        self.pages.iter().map(|p| p.height).collect()
    }
}

impl DocumentReader for MemoryDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_size(&self, index: usize) -> Option<(f64, f64)> {
        self.pages.get(index).map(|p| (p.width, p.height))
    }

    fn page(&self, index: usize) -> Result<PageContent, LinkError> {
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| LinkError::Reader(format!("page {index} out of range")))
    }
}
