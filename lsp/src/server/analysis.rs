use std::sync::Arc;

use pbls_core::settings::Settings;
use pbls_core::TextEdit as CoreTextEdit;
use tower_lsp::lsp_types::{SymbolInformation, TextEdit, Url};
use tracing::{debug, warn};

use super::error::ServerError;
use super::state::PbLanguageServer;
use crate::analyzer::{collect_workspace_symbols, lsp_edit, AnalysisResult, PbAnalyzer};

impl PbLanguageServer {
    /// Cached analysis, or a fresh one once the document's settings are known.
    pub(crate) async fn analyze_document(&self, uri: &Url) -> Result<Arc<AnalysisResult>, ServerError> {
        if let Some(cached) = self.documents.cached_analysis(uri) {
            return Ok(cached);
        }
        if !self.documents.contains(uri) {
            return Err(ServerError::DocumentNotFound(uri.clone()));
        }
        let settings = self.load_settings(uri).await?;

        // the document may have been closed or edited while settings were loading
        let (content, version) = self.documents.snapshot(uri)?;
        let analysis = Arc::new(PbAnalyzer::with_settings(&settings).analyze(&content));
        if !self.documents.store_analysis(uri, version, analysis.clone()) {
            debug!(%uri, version, "analysis outdated before it was cached");
        }
        Ok(analysis)
    }

    pub(crate) async fn publish_diagnostics(&self, uri: Url) {
        match self.analyze_document(&uri).await {
            Ok(analysis) => {
                let version = self.documents.snapshot(&uri).ok().map(|(_, version)| version);
                self.client
                    .publish_diagnostics(uri, analysis.diagnostics.clone(), version)
                    .await;
            }
            Err(ServerError::DocumentNotFound(uri)) => debug!(%uri, "document closed before diagnostics"),
            Err(err) => warn!(%uri, "diagnostics skipped: {err}"),
        }
    }

    pub(crate) async fn format_document<F>(&self, uri: &Url, format: F) -> Result<Vec<TextEdit>, ServerError>
    where
        F: FnOnce(&str, &Settings) -> Vec<CoreTextEdit>,
    {
        if !self.documents.contains(uri) {
            return Err(ServerError::DocumentNotFound(uri.clone()));
        }
        let settings = self.load_settings(uri).await?;
        let text = self.documents.text(uri)?;
        Ok(format(&text, &settings).into_iter().map(lsp_edit).collect())
    }

    /// Case-insensitive substring search over the outlines of all open documents.
    pub(crate) async fn workspace_symbols(&self, query: &str) -> Vec<SymbolInformation> {
        let query = query.to_lowercase();
        let mut found = Vec::new();
        for uri in self.documents.uris() {
            match self.analyze_document(&uri).await {
                Ok(analysis) => collect_workspace_symbols(&uri, &analysis.symbols, None, &query, &mut found),
                Err(err) => debug!(%uri, "skipped in workspace symbols: {err}"),
            }
        }
        found
    }
}
