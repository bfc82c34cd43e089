use std::sync::Arc;

use dashmap::DashMap;
use ropey::Rope;
use tower_lsp::lsp_types::{TextDocumentContentChangeEvent, Url};
use tracing::debug;

use super::error::ServerError;
use super::text::apply_change;
use crate::analyzer::AnalysisResult;

/// An open document and its cached analysis.
#[derive(Debug, Default)]
pub struct Document {
    pub content: Rope,
    pub version: i32,
    pub cached_analysis: Option<Arc<AnalysisResult>>,
}

/// Open documents keyed by URI. Entries live from `didOpen` to `didClose`.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, uri: Url, text: &str, version: i32) {
        debug!(%uri, version, "document opened");
        self.documents.insert(
            uri,
            Document {
                content: Rope::from_str(text),
                version,
                cached_analysis: None,
            },
        );
    }

    pub fn close(&self, uri: &Url) -> Option<Document> {
        debug!(%uri, "document closed");
        self.documents.remove(uri).map(|(_, doc)| doc)
    }

    pub fn contains(&self, uri: &Url) -> bool {
        self.documents.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn uris(&self) -> Vec<Url> {
        self.documents.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Applies content changes in order and drops the cached analysis.
    pub fn change(
        &self,
        uri: &Url,
        version: i32,
        changes: Vec<TextDocumentContentChangeEvent>,
    ) -> Result<(), ServerError> {
        let mut doc = self
            .documents
            .get_mut(uri)
            .ok_or_else(|| ServerError::DocumentNotFound(uri.clone()))?;
        for change in &changes {
            apply_change(&mut doc.content, change);
        }
        doc.version = version;
        doc.cached_analysis = None;
        Ok(())
    }

    /// Current text and version.
    pub fn snapshot(&self, uri: &Url) -> Result<(String, i32), ServerError> {
        self.documents
            .get(uri)
            .map(|doc| (doc.content.to_string(), doc.version))
            .ok_or_else(|| ServerError::DocumentNotFound(uri.clone()))
    }

    pub fn text(&self, uri: &Url) -> Result<String, ServerError> {
        self.snapshot(uri).map(|(text, _)| text)
    }

    pub fn cached_analysis(&self, uri: &Url) -> Option<Arc<AnalysisResult>> {
        self.documents.get(uri)?.cached_analysis.clone()
    }

    /// Stores `analysis` unless the document changed since `version` was read.
    pub fn store_analysis(&self, uri: &Url, version: i32, analysis: Arc<AnalysisResult>) -> bool {
        match self.documents.get_mut(uri) {
            Some(mut doc) if doc.version == version => {
                doc.cached_analysis = Some(analysis);
                true
            }
            _ => false,
        }
    }

    pub fn clear_analyses(&self) {
        for mut doc in self.documents.iter_mut() {
            doc.cached_analysis = None;
        }
    }
}
