use tracing::trace;

use super::{Symbol, SymbolId, SymbolTree};
use crate::rules::{SymbolKind, find_closing, find_opening};
use crate::text::Span;
use crate::token::{Scanner, Token};

/// Scans `text` once and returns its symbol tree.
///
/// Unclosed blocks end at `text.len()`. A closer pops every block opened after the
/// matching one, and those inherit the closer's end.
pub fn build(text: &str) -> SymbolTree {
    let mut builder = Builder {
        tree: SymbolTree::default(),
        open: Vec::new(),
        scanner: Scanner::new(text),
        doc_end: text.len(),
    };
    builder.run();
    builder.tree
}

struct Builder<'a> {
    tree: SymbolTree,
    open: Vec<SymbolId>,
    scanner: Scanner<'a>,
    doc_end: usize,
}

impl<'a> Builder<'a> {
    fn run(&mut self) {
        while let Some(token) = self.scanner.next() {
            let innermost = self.open.last().map(|&id| self.tree[id].kind);
            if let Some(kind) = find_opening(token.text, innermost) {
                self.open_symbol(kind, &token);
            } else if let Some(kind) = find_closing(token.text) {
                self.close_symbol(kind, &token);
            }
        }
    }

    fn open_symbol(&mut self, kind: SymbolKind, keyword: &Token<'a>) {
        let (detail, name) = match kind.content() {
            Some(pattern) => match self.scanner.adjacent(pattern) {
                Some(content) => (content.return_type, content),
                None => {
                    trace!(keyword = keyword.text, offset = keyword.start(), "opening keyword without a name");
                    return;
                }
            },
            None => (None, keyword.clone()),
        };

        let selection_end = self.scanner.cursor();
        let end = if kind.is_block() { self.doc_end } else { selection_end };
        let parent = self.open.last().copied();
        let id = self.tree.push(Symbol {
            name: name.text.to_string(),
            kind,
            span: Span::new(keyword.start(), end),
            name_span: name.span(),
            selection_span: Span::new(keyword.start(), selection_end),
            children: Vec::new(),
            parent,
            closed: !kind.is_block(),
            is_root: parent.is_none(),
            detail: detail.map(str::to_string),
        });
        if kind.is_block() {
            self.open.push(id);
        }
    }

    fn close_symbol(&mut self, kind: SymbolKind, closer: &Token<'a>) {
        let Some(depth) = self.open.iter().rposition(|&id| self.tree[id].kind == kind) else {
            trace!(keyword = closer.text, offset = closer.start(), "closing keyword without an open block");
            return;
        };
        let matched = self.open[depth];
        let end = self.scanner.cursor();
        for id in self.open.drain(depth..) {
            self.tree.get_mut(id).span.end = end;
        }
        self.tree.get_mut(matched).closed = true;
    }
}
