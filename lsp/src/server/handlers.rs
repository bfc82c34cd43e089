use pbls_core::{format_all, format_on_type, format_range};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::LanguageServer;
use tracing::{info, warn};

use super::state::PbLanguageServer;
use crate::analyzer::{core_options, core_position};

pub(crate) const ON_TYPE_FIRST_TRIGGER: &str = ":";
pub(crate) const ON_TYPE_MORE_TRIGGERS: [&str; 4] = ["\n", "(", "[", "{"];

/// Lines and cut column for a range formatting request. A range ending at column 0 of
/// a later line does not touch that line.
pub(crate) fn range_bounds(range: Range) -> (u32, u32, Option<u32>) {
    if range.end.character == 0 && range.end.line > range.start.line {
        (range.start.line, range.end.line - 1, None)
    } else {
        (range.start.line, range.end.line, Some(range.end.character))
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for PbLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("PureBasic Language Server initializing with params: {:?}", params.root_uri);

        let workspace_configuration = params
            .capabilities
            .workspace
            .as_ref()
            .and_then(|workspace| workspace.configuration)
            .unwrap_or(false);
        self.settings.set_workspace_configuration(workspace_configuration);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    ..Default::default()
                }),
                document_symbol_provider: Some(OneOf::Left(true)),
                workspace_symbol_provider: Some(OneOf::Left(true)),
                document_formatting_provider: Some(OneOf::Left(true)),
                document_range_formatting_provider: Some(OneOf::Left(true)),
                document_on_type_formatting_provider: Some(DocumentOnTypeFormattingOptions {
                    first_trigger_character: ON_TYPE_FIRST_TRIGGER.to_string(),
                    more_trigger_character: Some(ON_TYPE_MORE_TRIGGERS.iter().map(|c| c.to_string()).collect()),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "PureBasic Language Server".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("PureBasic Language Server initialized");
        self.client
            .log_message(MessageType::INFO, "PureBasic Language Server started")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("PureBasic Language Server shutting down");
        Ok(())
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        if let Err(err) = self.settings.reset(&params.settings) {
            warn!("configuration change rejected: {err}");
        }
        self.documents.clear_analyses();
        for uri in self.documents.uris() {
            self.publish_diagnostics(uri).await;
        }
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        self.documents.open(document.uri.clone(), &document.text, document.version);
        self.publish_diagnostics(document.uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Err(err) = self
            .documents
            .change(&uri, params.text_document.version, params.content_changes)
        {
            warn!("change ignored: {err}");
            return;
        }
        self.publish_diagnostics(uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.close(&uri);
        self.settings.evict(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn completion(&self, _: CompletionParams) -> Result<Option<CompletionResponse>> {
        Ok(Some(CompletionResponse::Array(self.get_completions())))
    }

    async fn document_symbol(&self, params: DocumentSymbolParams) -> Result<Option<DocumentSymbolResponse>> {
        let analysis = self.analyze_document(&params.text_document.uri).await?;
        Ok(Some(DocumentSymbolResponse::Nested(analysis.symbols.clone())))
    }

    async fn symbol(&self, params: WorkspaceSymbolParams) -> Result<Option<Vec<SymbolInformation>>> {
        Ok(Some(self.workspace_symbols(&params.query).await))
    }

    async fn formatting(&self, params: DocumentFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        let options = core_options(&params.options);
        let edits = self
            .format_document(&params.text_document.uri, |text, settings| {
                format_all(text, &options, settings)
            })
            .await?;
        Ok(Some(edits))
    }

    async fn range_formatting(&self, params: DocumentRangeFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        let options = core_options(&params.options);
        let (start_line, end_line, cut) = range_bounds(params.range);
        let edits = self
            .format_document(&params.text_document.uri, |text, settings| {
                format_range(text, &options, settings, start_line, end_line, cut)
            })
            .await?;
        Ok(Some(edits))
    }

    async fn on_type_formatting(&self, params: DocumentOnTypeFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        let options = core_options(&params.options);
        let position = core_position(params.text_document_position.position);
        let edits = self
            .format_document(&params.text_document_position.text_document.uri, |text, settings| {
                format_on_type(text, &options, settings, position)
            })
            .await?;
        Ok(Some(edits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        let whole_lines = Range::new(Position::new(2, 0), Position::new(5, 0));
        assert_eq!(range_bounds(whole_lines), (2, 4, None));

        let partial = Range::new(Position::new(2, 0), Position::new(5, 7));
        assert_eq!(range_bounds(partial), (2, 5, Some(7)));

        let empty = Range::new(Position::new(3, 0), Position::new(3, 0));
        assert_eq!(range_bounds(empty), (3, 3, Some(0)));
    }
}
