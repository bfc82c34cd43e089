//! Nested symbol tree built from the token stream.

mod builder;
#[cfg(test)]
mod symbol_test;

use std::ops::Index;

use serde::Serialize;

use crate::rules::{Icon, SymbolKind};
use crate::text::Span;

pub use builder::build;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SymbolId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// From the opening keyword to the end of its closer, or to the end of the
    /// document while the block is still open.
    pub span: Span,
    pub name_span: Span,
    /// Opening keyword through the content token.
    pub selection_span: Span,
    pub children: Vec<SymbolId>,
    #[serde(skip)]
    pub parent: Option<SymbolId>,
    pub closed: bool,
    pub is_root: bool,
    /// Declared return type such as `.i`.
    pub detail: Option<String>,
}

impl Symbol {
    pub fn icon(&self) -> Icon {
        self.kind.icon()
    }
}

/// Arena of symbols in discovery order plus the ids of the root symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolTree {
    symbols: Vec<Symbol>,
    roots: Vec<SymbolId>,
}

impl SymbolTree {
    pub fn build(text: &str) -> Self {
        build(text)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0)
    }

    pub fn root_ids(&self) -> &[SymbolId] {
        &self.roots
    }

    pub fn roots(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.roots.iter().map(move |&id| &self[id])
    }

    pub fn children(&self, id: SymbolId) -> impl Iterator<Item = &Symbol> + '_ {
        self.get(id)
            .map(|symbol| symbol.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&child| &self[child])
    }

    pub fn parent(&self, id: SymbolId) -> Option<&Symbol> {
        self.get(id)?.parent.and_then(|parent| self.get(parent))
    }

    /// Every symbol in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    fn push(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len());
        match symbol.parent {
            Some(parent) => self.symbols[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        self.symbols.push(symbol);
        id
    }

    fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0]
    }
}

impl Index<SymbolId> for SymbolTree {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }
}

impl<'a> IntoIterator for &'a SymbolTree {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
