//! Watched documents and the tab selection.
//!
//! [DocumentSet] is the ordered, deduplicated list of documents shown as tabs.
//! Only the initializer and the navigation controller move the selection.

use crate::core::watcher::ModToken;
use crate::error::{ViewerError, ViewerResult};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A single watched text file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    path: PathBuf,
    display_name: String,
    modified: Option<ModToken>,
}

impl Document {
    pub fn new(path: PathBuf) -> Self {
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let modified = ModToken::of(&path).ok();
        Self {
            path,
            display_name,
            modified,
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Last modification token recorded for this document.
    #[inline]
    pub fn modified(&self) -> Option<ModToken> {
        self.modified
    }
}

/// Ordered collection of documents plus the currently selected tab.
#[derive(Debug)]
pub struct DocumentSet {
    documents: Vec<Document>,
    selected: usize,
}

impl DocumentSet {
    /// Builds the set from resolved paths.
    ///
    /// Duplicates are dropped by exact path equality, keeping the first occurrence.
    /// Fails with [ViewerError::EmptySet] if nothing remains.
    pub fn initialize<I>(paths: I) -> ViewerResult<Self>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut seen = HashSet::new();
        let documents: Vec<Document> = paths
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .map(Document::new)
            .collect();

        if documents.is_empty() {
            return Err(ViewerError::EmptySet);
        }

        Ok(Self {
            documents,
            selected: 0,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[inline]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &Document {
        &self.documents[self.selected]
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn as_slice(&self) -> &[Document] {
        &self.documents
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.documents.iter().map(|d| d.path.clone()).collect()
    }

    pub fn display_names(&self) -> Vec<String> {
        self.documents
            .iter()
            .map(|d| d.display_name.clone())
            .collect()
    }

    pub fn set_selected(&mut self, index: usize) -> ViewerResult<()> {
        if index >= self.documents.len() {
            return Err(ViewerError::IndexOutOfRange {
                index,
                len: self.documents.len(),
            });
        }
        self.selected = index;
        Ok(())
    }

    /// Stores the token observed by the watcher. Unknown indexes are ignored.
    pub fn record_modified(&mut self, index: usize, token: ModToken) {
        if let Some(doc) = self.documents.get_mut(index) {
            doc.modified = Some(token);
        }
    }
}
