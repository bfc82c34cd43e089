use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::symbol::{Symbol, SymbolTree};
use crate::text::Span;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier rule"));
static SUFFIXED_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*\$?$").expect("suffixed identifier rule"));
static CONSTANT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[A-Za-z_][A-Za-z0-9_]*\$?$").expect("constant rule"));
static QUOTED_STRING: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(?:[^"\r\n\\]|\\.)*""#).expect("string rule"));
static FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\*?[A-Za-z_][A-Za-z0-9_]*|[A-Za-z_][A-Za-z0-9_]*\$?)$").expect("field rule"));
static NATIVE_POINTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*.+\$$").expect("pointer rule"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

/// Stable diagnostic codes, one per naming failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleCode {
    InvalidIdentifier,
    InvalidSuffixedIdentifier,
    InvalidConstant,
    MalformedString,
    PointerWithNativeType,
    InvalidField,
}

impl RuleCode {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCode::InvalidIdentifier => "PB1000",
            RuleCode::InvalidSuffixedIdentifier => "PB1001",
            RuleCode::InvalidConstant => "PB1002",
            RuleCode::MalformedString => "PB1003",
            RuleCode::PointerWithNativeType => "PB1004",
            RuleCode::InvalidField => "PB1005",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Byte span of the offending name.
    pub span: Span,
    pub message: String,
    pub code: RuleCode,
}

/// Naming predicate attached to each symbol kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingRule {
    /// `Foo`, `_bar2`
    Identifier,
    /// identifier with an optional `$` string suffix
    SuffixedIdentifier,
    /// `#NAME` with an optional `$`
    Constant,
    /// a terminated `"..."` literal
    QuotedString,
    /// structure field: `name`, `name$` or pointer `*name`
    Field,
}

impl NamingRule {
    pub fn is_valid(self, name: &str) -> bool {
        match self {
            NamingRule::Identifier => IDENTIFIER.is_match(name),
            NamingRule::SuffixedIdentifier => SUFFIXED_IDENTIFIER.is_match(name),
            NamingRule::Constant => CONSTANT.is_match(name),
            NamingRule::QuotedString => QUOTED_STRING.is_match(name),
            NamingRule::Field => FIELD.is_match(name),
        }
    }

    pub fn check(self, name: &str, span: Span) -> Option<Diagnostic> {
        if self.is_valid(name) {
            return None;
        }
        let (code, message) = match self {
            NamingRule::Identifier => (
                RuleCode::InvalidIdentifier,
                format!("The identifier name '{name}' contains some unexpected characters."),
            ),
            NamingRule::SuffixedIdentifier => (
                RuleCode::InvalidSuffixedIdentifier,
                format!("The identifier name '{name}' contains some unexpected characters."),
            ),
            NamingRule::Constant => (
                RuleCode::InvalidConstant,
                format!("The constant name '{name}' contains some unexpected characters."),
            ),
            NamingRule::QuotedString => (RuleCode::MalformedString, format!("The string '{name}' is not well-formed.")),
            NamingRule::Field if NATIVE_POINTER.is_match(name) => (
                RuleCode::PointerWithNativeType,
                format!("The field '{name}' is a non-supported pointer using a native type."),
            ),
            NamingRule::Field => (
                RuleCode::InvalidField,
                format!("The field name '{name}' contains some unexpected characters."),
            ),
        };
        Some(Diagnostic {
            severity: Severity::Error,
            span,
            message,
            code,
        })
    }
}

pub fn check_symbol(symbol: &Symbol) -> Option<Diagnostic> {
    symbol.kind.naming().check(&symbol.name, symbol.name_span)
}

/// Applies every symbol's naming rule in document order, stopping once
/// `max_problems` diagnostics have been collected.
pub fn validate(tree: &SymbolTree, max_problems: usize) -> Vec<Diagnostic> {
    tree.iter().filter_map(check_symbol).take(max_problems).collect()
}
