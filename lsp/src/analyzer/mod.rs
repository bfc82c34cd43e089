use pbls_core::settings::{Settings, DEFAULT_MAX_PROBLEMS};
use pbls_core::text::LineIndex;
use pbls_core::{load_symbols, validate};
use tower_lsp::lsp_types::{Diagnostic, DocumentSymbol};
use tracing::debug;

mod convert;
#[cfg(test)]
mod tests;

pub use convert::{
    collect_workspace_symbols, core_options, core_position, document_symbols, lsp_diagnostic, lsp_edit, lsp_range,
    lsp_symbol_kind,
};

/// Outline and naming diagnostics of one document, in LSP form.
#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    pub diagnostics: Vec<Diagnostic>,
    pub symbols: Vec<DocumentSymbol>,
}

/// Runs the symbol builder and validator over a whole document.
#[derive(Debug, Clone)]
pub struct PbAnalyzer {
    max_problems: usize,
}

impl Default for PbAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PbAnalyzer {
    pub fn new() -> Self {
        Self {
            max_problems: DEFAULT_MAX_PROBLEMS,
        }
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            max_problems: settings.max_number_of_problems,
        }
    }

    pub fn max_problems(&self) -> usize {
        self.max_problems
    }

    pub fn analyze(&self, content: &str) -> AnalysisResult {
        let tree = load_symbols(content);
        let index = LineIndex::new(content);
        let diagnostics: Vec<Diagnostic> = validate(&tree, self.max_problems)
            .iter()
            .map(|d| lsp_diagnostic(&index, d))
            .collect();
        debug!(symbols = tree.len(), diagnostics = diagnostics.len(), "analyzed document");

        AnalysisResult {
            diagnostics,
            symbols: document_symbols(&tree, &index),
        }
    }
}
