use std::sync::Arc;

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};
use tower_lsp::Client;

use super::config::ClientSettings;
use super::store::DocumentStore;

const BLOCK_KEYWORDS: &[&str] = &[
    "DeclareModule",
    "EndDeclareModule",
    "Module",
    "EndModule",
    "UseModule",
    "UnuseModule",
    "Interface",
    "EndInterface",
    "Procedure",
    "ProcedureC",
    "ProcedureCDLL",
    "ProcedureDLL",
    "ProcedureReturn",
    "EndProcedure",
    "Structure",
    "StructureUnion",
    "EndStructureUnion",
    "EndStructure",
    "Import",
    "ImportC",
    "EndImport",
    "Macro",
    "EndMacro",
    "Enumeration",
    "EnumerationBinary",
    "EndEnumeration",
    "DataSection",
    "EndDataSection",
];

const FLOW_KEYWORDS: &[&str] = &[
    "If", "ElseIf", "Else", "EndIf", "Select", "Case", "Default", "EndSelect", "For", "To", "Step", "Next", "ForEach",
    "While", "Wend", "Repeat", "Until", "ForEver", "With", "EndWith", "Break", "Continue", "Goto", "Gosub", "Return",
    "CompilerIf", "CompilerElseIf", "CompilerElse", "CompilerEndIf", "CompilerSelect", "CompilerCase",
    "CompilerDefault", "CompilerEndSelect",
];

const DECLARATION_KEYWORDS: &[&str] = &[
    "Define", "Global", "Protected", "Shared", "Static", "Threaded", "Dim", "ReDim", "NewList", "NewMap", "Declare",
    "DeclareC", "DeclareCDLL", "DeclareDLL", "Extends", "Array", "List", "Map", "EnableExplicit", "DisableExplicit",
    "IncludeFile", "XIncludeFile", "IncludePath", "IncludeBinary", "End",
];

/// Language server state shared across handlers.
pub struct PbLanguageServer {
    pub(crate) client: Client,
    pub(crate) documents: Arc<DocumentStore>,
    pub(crate) settings: ClientSettings,
}

impl PbLanguageServer {
    pub fn new(client: Client) -> Self {
        Self::with_store(client, Arc::new(DocumentStore::new()))
    }

    pub fn with_store(client: Client, documents: Arc<DocumentStore>) -> Self {
        Self {
            client,
            documents,
            settings: ClientSettings::new(),
        }
    }

    pub fn documents(&self) -> &Arc<DocumentStore> {
        &self.documents
    }

    pub(crate) fn get_completions(&self) -> Vec<CompletionItem> {
        let groups = [
            (BLOCK_KEYWORDS, "block keyword"),
            (FLOW_KEYWORDS, "flow keyword"),
            (DECLARATION_KEYWORDS, "declaration keyword"),
        ];
        groups
            .iter()
            .flat_map(|(keywords, detail)| {
                keywords.iter().map(move |keyword| CompletionItem {
                    label: keyword.to_string(),
                    kind: Some(CompletionItemKind::KEYWORD),
                    detail: Some(detail.to_string()),
                    ..Default::default()
                })
            })
            .collect()
    }
}
