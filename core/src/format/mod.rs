//! Line-by-line formatting: indentation plus whitespace normalisation.

mod beautify;
#[cfg(test)]
mod format_test;

use serde::Serialize;

pub use beautify::beautify;

use crate::indent::{FormattingOptions, IndentContext};
use crate::line::{ParsedLine, trim_leading_spaces};
use crate::settings::Settings;
use crate::text::{LineIndex, Position, Range, utf16_len, utf16_to_byte};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
}

impl TextEdit {
    fn replace_line_part(line: u32, start: u32, end: u32, new_text: String) -> Self {
        Self {
            range: Range::new(Position::new(line, start), Position::new(line, end)),
            new_text,
        }
    }
}

/// Formats lines `start_line..=end_line`.
///
/// With `cut`, the end line is split at that UTF-16 column: the part before it is
/// formatted, the part after it only loses leading whitespace when nothing but
/// whitespace precedes the cut.
pub fn format_range(
    text: &str,
    options: &FormattingOptions,
    settings: &Settings,
    start_line: u32,
    end_line: u32,
    cut: Option<u32>,
) -> Vec<TextEdit> {
    let index = LineIndex::new(text);
    let last_line = index.line_count().saturating_sub(1) as u32;
    let end_line = end_line.min(last_line);
    if start_line > end_line {
        return Vec::new();
    }

    let mut indentation = IndentContext::new(options, &settings.indentation_rules);
    for line in (0..start_line).rev() {
        if indentation.pick(&ParsedLine::parse(index.line(line as usize))) {
            break;
        }
    }

    let mut edits = Vec::new();
    for line in start_line..=end_line {
        let full = index.line(line as usize);
        let split = match cut {
            Some(column) if line == end_line => utf16_to_byte(full, column),
            _ => full.len(),
        };
        let (read, after) = full.split_at(split);
        let after = (!after.is_empty()).then_some(after);

        let mut parsed = ParsedLine::parse(read);
        indentation.forward(&mut parsed);
        parsed.content = beautify(&parsed.content);
        let new_after = match after {
            Some(after) if parsed.is_blank => Some(trim_leading_spaces(after)),
            Some(after) => Some(after),
            None => {
                parsed.trim_end_spaces();
                None
            }
        };

        let new_read = parsed.render();
        let read_end = utf16_len(read);
        if new_read != read {
            edits.push(TextEdit::replace_line_part(line, 0, read_end, new_read));
        }
        if let (Some(after), Some(new_after)) = (after, new_after)
            && new_after != after
        {
            edits.push(TextEdit::replace_line_part(
                line,
                read_end,
                read_end + utf16_len(after),
                new_after.to_string(),
            ));
        }
    }
    edits
}

pub fn format_all(text: &str, options: &FormattingOptions, settings: &Settings) -> Vec<TextEdit> {
    let last_line = LineIndex::new(text).line_count().saturating_sub(1) as u32;
    format_range(text, options, settings, 0, last_line, None)
}

/// Reformats the line before `position` and the part of its own line left of it.
pub fn format_on_type(text: &str, options: &FormattingOptions, settings: &Settings, position: Position) -> Vec<TextEdit> {
    format_range(
        text,
        options,
        settings,
        position.line.saturating_sub(1),
        position.line,
        Some(position.character),
    )
}

/// Applies non-overlapping edits, as produced by [`format_range`], to `text`.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    let index = LineIndex::new(text);
    let mut spans: Vec<_> = edits
        .iter()
        .map(|edit| {
            let start = index.position_to_offset(edit.range.start);
            let end = index.position_to_offset(edit.range.end).max(start);
            (start, end, edit.new_text.as_str())
        })
        .collect();
    spans.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let mut out = text.to_string();
    for (start, end, new_text) in spans {
        out.replace_range(start..end, new_text);
    }
    out
}
