//! Block rule table.
//!
//! Each [`SymbolKind`] carries its own open/close keywords, content pattern, required
//! parent and naming rule. Lookup walks [`SymbolKind::ALL`] in order, so the first
//! matching opener wins and the `Constant` catch-all has to stay last.

use serde::Serialize;

use crate::token::ContentPattern;
use crate::validate::NamingRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SymbolKind {
    DeclareModule,
    Module,
    Interface,
    Procedure,
    Structure,
    Import,
    Macro,
    Enumeration,
    EnumMember,
    Field,
    Constant,
}

/// Presentation hint for outline views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Icon {
    Module,
    Interface,
    Function,
    Struct,
    Package,
    Enum,
    EnumMember,
    Field,
    Constant,
}

const STRUCTURE_KEYWORDS: &[&str] = &[
    "StructureUnion",
    "EndStructureUnion",
    "Array",
    "List",
    "Map",
    "Align",
    "Extends",
    "CompilerIf",
    "CompilerElse",
    "CompilerElseIf",
    "CompilerEndIf",
    "CompilerSelect",
    "CompilerCase",
    "CompilerDefault",
    "CompilerEndSelect",
];

fn is_keyword(word: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| k.eq_ignore_ascii_case(word))
}

fn is_constant_name(word: &str) -> bool {
    word.len() > 1 && word.starts_with('#')
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 11] = [
        SymbolKind::DeclareModule,
        SymbolKind::Module,
        SymbolKind::Interface,
        SymbolKind::Procedure,
        SymbolKind::Structure,
        SymbolKind::Import,
        SymbolKind::Macro,
        SymbolKind::Enumeration,
        SymbolKind::EnumMember,
        SymbolKind::Field,
        SymbolKind::Constant,
    ];

    pub fn opens(self, word: &str) -> bool {
        match self {
            SymbolKind::DeclareModule => is_keyword(word, &["DeclareModule"]),
            SymbolKind::Module => is_keyword(word, &["Module"]),
            SymbolKind::Interface => is_keyword(word, &["Interface"]),
            SymbolKind::Procedure => is_keyword(word, &["Procedure", "ProcedureC", "ProcedureCDLL", "ProcedureDLL"]),
            SymbolKind::Structure => is_keyword(word, &["Structure"]),
            SymbolKind::Import => is_keyword(word, &["Import", "ImportC"]),
            SymbolKind::Macro => is_keyword(word, &["Macro"]),
            SymbolKind::Enumeration => is_keyword(word, &["Enumeration", "EnumerationBinary"]),
            SymbolKind::EnumMember | SymbolKind::Constant => is_constant_name(word),
            SymbolKind::Field => {
                !word.starts_with('#') && find_closing(word).is_none() && !is_keyword(word, STRUCTURE_KEYWORDS)
            }
        }
    }

    pub fn closes(self, word: &str) -> bool {
        match self {
            SymbolKind::DeclareModule => is_keyword(word, &["EndDeclareModule"]),
            SymbolKind::Module => is_keyword(word, &["EndModule"]),
            SymbolKind::Interface => is_keyword(word, &["EndInterface"]),
            SymbolKind::Procedure => is_keyword(word, &["EndProcedure"]),
            SymbolKind::Structure => is_keyword(word, &["EndStructure"]),
            SymbolKind::Import => is_keyword(word, &["EndImport"]),
            SymbolKind::Macro => is_keyword(word, &["EndMacro"]),
            SymbolKind::Enumeration => is_keyword(word, &["EndEnumeration"]),
            SymbolKind::EnumMember | SymbolKind::Field | SymbolKind::Constant => false,
        }
    }

    /// Content token expected right after the opening keyword; `None` means the keyword
    /// token is itself the symbol name.
    pub fn content(self) -> Option<ContentPattern> {
        match self {
            SymbolKind::Procedure => Some(ContentPattern::ReturnTypeName),
            SymbolKind::Import => Some(ContentPattern::Path),
            SymbolKind::DeclareModule
            | SymbolKind::Module
            | SymbolKind::Interface
            | SymbolKind::Structure
            | SymbolKind::Macro
            | SymbolKind::Enumeration => Some(ContentPattern::Name),
            SymbolKind::EnumMember | SymbolKind::Field | SymbolKind::Constant => None,
        }
    }

    /// Kind the innermost open symbol must have for this rule to fire.
    pub fn parent(self) -> Option<SymbolKind> {
        match self {
            SymbolKind::EnumMember => Some(SymbolKind::Enumeration),
            SymbolKind::Field => Some(SymbolKind::Structure),
            _ => None,
        }
    }

    /// Block symbols stay open until their closing keyword; the others are
    /// single-statement symbols.
    pub fn is_block(self) -> bool {
        !matches!(self, SymbolKind::EnumMember | SymbolKind::Field | SymbolKind::Constant)
    }

    pub fn naming(self) -> NamingRule {
        match self {
            SymbolKind::DeclareModule
            | SymbolKind::Module
            | SymbolKind::Interface
            | SymbolKind::Procedure
            | SymbolKind::Structure
            | SymbolKind::Macro => NamingRule::Identifier,
            SymbolKind::Enumeration => NamingRule::SuffixedIdentifier,
            SymbolKind::EnumMember | SymbolKind::Constant => NamingRule::Constant,
            SymbolKind::Import => NamingRule::QuotedString,
            SymbolKind::Field => NamingRule::Field,
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            SymbolKind::DeclareModule | SymbolKind::Module => Icon::Module,
            SymbolKind::Interface => Icon::Interface,
            SymbolKind::Procedure | SymbolKind::Macro => Icon::Function,
            SymbolKind::Structure => Icon::Struct,
            SymbolKind::Import => Icon::Package,
            SymbolKind::Enumeration => Icon::Enum,
            SymbolKind::EnumMember => Icon::EnumMember,
            SymbolKind::Field => Icon::Field,
            SymbolKind::Constant => Icon::Constant,
        }
    }
}

/// First rule opening on `word`, honouring required parents against the innermost
/// open symbol.
pub fn find_opening(word: &str, innermost: Option<SymbolKind>) -> Option<SymbolKind> {
    SymbolKind::ALL
        .into_iter()
        .find(|kind| kind.opens(word) && kind.parent().is_none_or(|parent| innermost == Some(parent)))
}

pub fn find_closing(word: &str) -> Option<SymbolKind> {
    SymbolKind::ALL.into_iter().find(|kind| kind.closes(word))
}
