use ropey::{Rope, RopeSlice};
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent};

/// Chars in a rope line, excluding its terminator.
fn content_len(line: RopeSlice<'_>) -> usize {
    let mut len = line.len_chars();
    if len > 0 && line.char(len - 1) == '\n' {
        len -= 1;
    }
    if len > 0 && line.char(len - 1) == '\r' {
        len -= 1;
    }
    len
}

/// Converts an LSP (UTF-16) position to a rope char index, clamped to the end of its line.
pub(crate) fn position_to_char(rope: &Rope, position: Position) -> usize {
    let line = position.line as usize;
    if line >= rope.len_lines() {
        return rope.len_chars();
    }
    let line_start = rope.line_to_char(line);
    let line_end = line_start + content_len(rope.line(line));
    let target = rope.char_to_utf16_cu(line_start) + position.character as usize;
    let target = target.min(rope.char_to_utf16_cu(line_end));
    rope.utf16_cu_to_char(target).clamp(line_start, line_end)
}

/// Applies one `didChange` event; a change without a range replaces the whole text.
pub(crate) fn apply_change(rope: &mut Rope, change: &TextDocumentContentChangeEvent) {
    let Some(range) = change.range else {
        *rope = Rope::from_str(&change.text);
        return;
    };
    let a = position_to_char(rope, range.start);
    let b = position_to_char(rope, range.end);
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    if start != end {
        rope.remove(start..end);
    }
    if !change.text.is_empty() {
        rope.insert(start, &change.text);
    }
}
