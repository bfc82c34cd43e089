use pbls_core::indent::FormattingOptions as CoreFormattingOptions;
use pbls_core::text::{LineIndex, Position as CorePosition, Range as CoreRange};
use pbls_core::{Diagnostic as CoreDiagnostic, Icon, Severity, SymbolId, SymbolTree, TextEdit as CoreTextEdit};
use tower_lsp::lsp_types::{
    Diagnostic, DiagnosticSeverity, DocumentSymbol, FormattingOptions, Location, NumberOrString, Position, Range,
    SymbolInformation, SymbolKind, TextEdit, Url,
};

pub(crate) const DIAGNOSTIC_SOURCE: &str = "purebasic";

pub fn lsp_position(position: CorePosition) -> Position {
    Position::new(position.line, position.character)
}

pub fn core_position(position: Position) -> CorePosition {
    CorePosition::new(position.line, position.character)
}

pub fn lsp_range(range: CoreRange) -> Range {
    Range::new(lsp_position(range.start), lsp_position(range.end))
}

pub fn lsp_symbol_kind(icon: Icon) -> SymbolKind {
    match icon {
        Icon::Module => SymbolKind::MODULE,
        Icon::Interface => SymbolKind::INTERFACE,
        Icon::Function => SymbolKind::FUNCTION,
        Icon::Struct => SymbolKind::STRUCT,
        Icon::Package => SymbolKind::PACKAGE,
        Icon::Enum => SymbolKind::ENUM,
        Icon::EnumMember => SymbolKind::ENUM_MEMBER,
        Icon::Field => SymbolKind::FIELD,
        Icon::Constant => SymbolKind::CONSTANT,
    }
}

/// Nested outline in document order.
pub fn document_symbols(tree: &SymbolTree, index: &LineIndex<'_>) -> Vec<DocumentSymbol> {
    tree.root_ids()
        .iter()
        .map(|&id| document_symbol(tree, index, id))
        .collect()
}

fn document_symbol(tree: &SymbolTree, index: &LineIndex<'_>, id: SymbolId) -> DocumentSymbol {
    let symbol = &tree[id];
    let children: Vec<DocumentSymbol> = symbol
        .children
        .iter()
        .map(|&child| document_symbol(tree, index, child))
        .collect();

    #[allow(deprecated)]
    DocumentSymbol {
        name: symbol.name.clone(),
        detail: symbol.detail.clone(),
        kind: lsp_symbol_kind(symbol.icon()),
        tags: None,
        deprecated: None,
        range: lsp_range(index.range(symbol.span)),
        selection_range: lsp_range(index.range(symbol.selection_span)),
        children: if children.is_empty() { None } else { Some(children) },
    }
}

pub fn lsp_diagnostic(index: &LineIndex<'_>, diagnostic: &CoreDiagnostic) -> Diagnostic {
    let severity = match diagnostic.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Information => DiagnosticSeverity::INFORMATION,
        Severity::Hint => DiagnosticSeverity::HINT,
    };
    Diagnostic {
        range: lsp_range(index.range(diagnostic.span)),
        severity: Some(severity),
        code: Some(NumberOrString::String(diagnostic.code.as_str().to_string())),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: diagnostic.message.clone(),
        ..Default::default()
    }
}

pub fn lsp_edit(edit: CoreTextEdit) -> TextEdit {
    TextEdit {
        range: lsp_range(edit.range),
        new_text: edit.new_text,
    }
}

pub fn core_options(options: &FormattingOptions) -> CoreFormattingOptions {
    CoreFormattingOptions {
        tab_size: options.tab_size,
        insert_spaces: options.insert_spaces,
    }
}

/// Flattens `symbols` into `out`, keeping those whose name contains `query`
/// (case-insensitive). An empty query keeps everything.
pub fn collect_workspace_symbols(
    uri: &Url,
    symbols: &[DocumentSymbol],
    container: Option<&str>,
    query: &str,
    out: &mut Vec<SymbolInformation>,
) {
    for symbol in symbols {
        if query.is_empty() || symbol.name.to_lowercase().contains(query) {
            #[allow(deprecated)]
            out.push(SymbolInformation {
                name: symbol.name.clone(),
                kind: symbol.kind,
                tags: None,
                deprecated: None,
                location: Location::new(uri.clone(), symbol.range),
                container_name: container.map(str::to_string),
            });
        }
        if let Some(children) = &symbol.children {
            collect_workspace_symbols(uri, children, Some(&symbol.name), query, out);
        }
    }
}
