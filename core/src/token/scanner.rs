use std::iter::FusedIterator;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::text::Span;

// A keyword candidate only counts at the start of a line or after a `:` statement
// separator. The literal and comment branches exist so that keyword-looking text
// inside them is consumed without ever being reported.
static WORD_OR_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)(?P<before>(?:^|:)[ \t]*)(?P<name>[#*]?\w+\$?)|"(?:[^"\r\n\\]|\\.)*"?|'[^\r\n']*'?|;.*?$"#)
        .expect("scanner pattern")
});

static NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A(?P<before>[ \t]+)(?P<name>[#*]?\w+\$?)").expect("name pattern"));

static RETURN_TYPE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A(?P<before>(?:[ \t]*(?P<rtype>\.\w+))?[ \t]+)(?P<name>[#*]?\w+\$?)").expect("return type pattern")
});

static PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\A(?P<before>[ \t]+)(?P<name>"(?:[^"\r\n\\]|\\.)*"?)"#).expect("path pattern"));

/// Shape of the content token that has to follow an opening keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentPattern {
    /// `Structure Point`
    Name,
    /// `Procedure.i Sum`, the `.i` return type is optional
    ReturnTypeName,
    /// `ImportC "libc.so"`
    Path,
}

impl ContentPattern {
    fn regex(self) -> &'static Regex {
        match self {
            ContentPattern::Name => &NAME,
            ContentPattern::ReturnTypeName => &RETURN_TYPE_NAME,
            ContentPattern::Path => &PATH,
        }
    }
}

/// A keyword or name candidate found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Byte offset where the whole match starts, separator included.
    pub offset: usize,
    /// Length of the separator/whitespace consumed before `text`.
    pub lead: usize,
    pub text: &'a str,
    /// Declared return type such as `.s`, only set by [`ContentPattern::ReturnTypeName`].
    pub return_type: Option<&'a str>,
}

impl<'a> Token<'a> {
    /// `base` is the offset of the searched haystack within the document.
    fn from_captures(caps: &Captures<'a>, base: usize) -> Option<Self> {
        let whole = caps.get(0)?;
        let name = caps.name("name")?;
        let lead = caps.name("before").map(|m| m.len()).unwrap_or(0);
        Some(Self {
            offset: base + whole.start(),
            lead,
            text: name.as_str(),
            return_type: caps.name("rtype").map(|m| m.as_str()),
        })
    }

    pub fn start(&self) -> usize {
        self.offset + self.lead
    }

    pub fn span(&self) -> Span {
        Span::new(self.start(), self.start() + self.text.len())
    }
}

/// Lazy, forward-only token cursor over a document.
///
/// Literal and comment matches are swallowed internally; only keyword candidates are
/// yielded. Every match moves the cursor strictly forward, and there is no way to
/// rewind: scanning again means building a new `Scanner`.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::starting_at(text, 0)
    }

    pub fn starting_at(text: &'a str, offset: usize) -> Self {
        Self {
            text,
            cursor: offset.min(text.len()),
        }
    }

    /// Byte offset right after the last consumed match.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Consumes a content token only when it begins exactly at the cursor.
    pub fn adjacent(&mut self, pattern: ContentPattern) -> Option<Token<'a>> {
        let rest = &self.text[self.cursor..];
        let caps = pattern.regex().captures(rest)?;
        let whole = caps.get(0)?;
        let token = Token::from_captures(&caps, self.cursor)?;
        self.cursor += whole.end();
        Some(token)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            let caps = WORD_OR_LITERAL.captures_at(self.text, self.cursor)?;
            let whole = caps.get(0)?;
            self.cursor = whole.end();
            if let Some(token) = Token::from_captures(&caps, 0) {
                return Some(token);
            }
        }
    }
}

impl FusedIterator for Scanner<'_> {}
