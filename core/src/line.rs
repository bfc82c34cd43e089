//! Structural view of a single source line.
//!
//! Literals and the trailing comment are swapped for placeholders (`""`, `''`, `;`)
//! so that rewriting the content can never touch their bodies.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static LITERALS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(?:[^"\\]|\\.)*"?|'[^']*'?|;.*|\s+$"#).expect("line literal pattern"));
static PLACEHOLDERS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"""|''|;"#).expect("placeholder pattern"));
static WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$?\b\w+\b\$?").expect("word pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedLine {
    pub indents: String,
    /// Content with literal and comment regions replaced by placeholders.
    pub content: String,
    /// Extracted literals, in order of appearance.
    pub strings: Vec<String>,
    pub comment: String,
    pub end_spaces: String,
    pub words: Vec<String>,
    pub is_blank: bool,
}

impl ParsedLine {
    /// `text` must not contain a line terminator.
    pub fn parse(text: &str) -> Self {
        let rest = text.trim_start_matches([' ', '\t']);
        let indents = &text[..text.len() - rest.len()];

        let mut strings = Vec::new();
        let mut comment = String::new();
        let mut end_spaces = String::new();
        let content = LITERALS
            .replace_all(rest, |caps: &Captures| {
                let found = &caps[0];
                match found.as_bytes()[0] {
                    b'"' => {
                        strings.push(found.to_string());
                        "\"\""
                    }
                    b'\'' => {
                        strings.push(found.to_string());
                        "''"
                    }
                    b';' => {
                        let body = found.trim_end();
                        end_spaces = found[body.len()..].to_string();
                        comment = body.to_string();
                        ";"
                    }
                    _ => {
                        end_spaces = found.to_string();
                        ""
                    }
                }
            })
            .into_owned();

        let words = WORDS.find_iter(&content).map(|m| m.as_str().to_string()).collect();
        let is_blank = content.is_empty() && comment.is_empty();
        Self {
            indents: indents.to_string(),
            content,
            strings,
            comment,
            end_spaces,
            words,
            is_blank,
        }
    }

    /// Rebuilds the line, putting literals and the comment back in place.
    pub fn render(&self) -> String {
        let mut strings = self.strings.iter();
        let content = PLACEHOLDERS.replace_all(&self.content, |caps: &Captures| {
            if &caps[0] == ";" {
                self.comment.clone()
            } else {
                strings.next().cloned().unwrap_or_default()
            }
        });
        format!("{}{}{}", self.indents, content, self.end_spaces)
    }

    /// Blank lines lose their indentation, others their trailing whitespace.
    pub fn trim_end_spaces(&mut self) {
        if self.is_blank {
            self.indents.clear();
        } else {
            self.end_spaces.clear();
        }
    }

    /// Words followed by the comment, which is where indentation rules look.
    pub fn rule_words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str).chain(std::iter::once(self.comment.as_str()))
    }
}

/// Leading spaces and tabs removed.
pub fn trim_leading_spaces(text: &str) -> &str {
    text.trim_start_matches([' ', '\t'])
}
