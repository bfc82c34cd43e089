//! Source analysis for PureBasic documents: symbol outline, naming diagnostics and
//! layout formatting.

pub mod error;
pub mod format;
pub mod indent;
pub mod line;
pub mod rules;
pub mod settings;
pub mod symbol;
pub mod text;
pub mod token;
pub mod validate;

pub use error::{Error, Result};
pub use format::{TextEdit, apply_edits, format_all, format_on_type, format_range};
pub use indent::FormattingOptions;
pub use rules::{Icon, SymbolKind};
pub use settings::Settings;
pub use symbol::{Symbol, SymbolId, SymbolTree};
pub use validate::{Diagnostic, RuleCode, Severity, validate};

/// Builds the symbol tree of a document.
pub fn load_symbols(text: &str) -> SymbolTree {
    SymbolTree::build(text)
}
