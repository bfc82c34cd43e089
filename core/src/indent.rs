//! Indentation engine.
//!
//! Levels are tracked as a `(current, next)` pair that is walked forward line by line.
//! When formatting starts in the middle of a document, [`IndentContext::pick`] seeds the
//! pair from an earlier, already indented line instead of replaying the whole file.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::line::ParsedLine;

/// A pattern tested against each word of a line, with the level deltas it applies to
/// the line itself (`before`) and to the lines that follow (`after`).
#[derive(Debug, Clone)]
pub struct IndentRule {
    pub pattern: Regex,
    pub before: i32,
    pub after: i32,
}

impl IndentRule {
    /// Compiles a rule written with JavaScript-style flags. `g`, `u` and `y` have no
    /// meaning for a single test and are ignored.
    pub fn compile(source: &str, flags: &str, before: i32, after: i32) -> Result<Self> {
        let mut builder = RegexBuilder::new(source);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                'g' | 'u' | 'y' => &mut builder,
                other => {
                    return Err(Error::UnsupportedFlag {
                        pattern: source.to_string(),
                        flag: other,
                    });
                }
            };
        }
        let pattern = builder.build().map_err(|e| Error::InvalidPattern {
            pattern: source.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { pattern, before, after })
    }

    fn builtin(keywords: &str, before: i32, after: i32) -> Self {
        let pattern = Regex::new(&format!("(?i)^(?:{keywords})$")).expect("builtin indentation rule");
        Self { pattern, before, after }
    }
}

static BUILTIN_RULES: Lazy<Vec<IndentRule>> = Lazy::new(|| {
    vec![
        IndentRule::builtin(
            "While|Repeat|ForEach|For|With|Structure|StructureUnion|Macro|Import|ImportC|Interface|Procedure|ProcedureDLL|ProcedureCDLL|ProcedureC|If|CompilerIf|DataSection|DeclareModule|Module|Enumeration|EnumerationBinary",
            0,
            1,
        ),
        IndentRule::builtin(
            "Wend|Until|ForEver|Next|EndWith|EndStructure|EndStructureUnion|EndMacro|EndImport|EndInterface|EndProcedure|EndIf|CompilerEndIf|EndDataSection|EndDeclareModule|EndModule|EndEnumeration",
            -1,
            0,
        ),
        IndentRule::builtin(
            "Else|ElseIf|Case|Default|CompilerElse|CompilerElseIf|CompilerCase|CompilerDefault",
            -1,
            1,
        ),
        IndentRule::builtin("Select|CompilerSelect", 0, 2),
        IndentRule::builtin("EndSelect|CompilerEndSelect", -2, 0),
    ]
});

pub fn builtin_rules() -> &'static [IndentRule] {
    &BUILTIN_RULES
}

/// Editor formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingOptions {
    pub tab_size: u32,
    pub insert_spaces: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            insert_spaces: true,
        }
    }
}

impl FormattingOptions {
    pub fn indent_unit(&self) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size as usize)
        } else {
            "\t".to_string()
        }
    }
}

/// Indentation state for one formatting pass over one document.
#[derive(Debug, Clone)]
pub struct IndentContext<'r> {
    current: i32,
    next: i32,
    unit: String,
    tab_size: usize,
    user_rules: &'r [IndentRule],
}

impl<'r> IndentContext<'r> {
    pub fn new(options: &FormattingOptions, user_rules: &'r [IndentRule]) -> Self {
        Self {
            current: 0,
            next: 0,
            unit: options.indent_unit(),
            tab_size: options.tab_size.max(1) as usize,
            user_rules,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn next_level(&self) -> i32 {
        self.next
    }

    /// Computes the level of `line`, rewrites its indentation and returns the level.
    pub fn forward(&mut self, line: &mut ParsedLine) -> i32 {
        self.next = self.next.max(0);
        self.current = self.next;

        let mut indenting_current = true;
        for (before, after) in self.matches(line) {
            if indenting_current {
                if before != 0 {
                    self.current += before;
                    self.next = self.current;
                }
                if after != 0 {
                    self.next += after;
                    indenting_current = false;
                }
            } else {
                self.next += before + after;
            }
        }

        self.current = self.current.max(0);
        line.indents = self.unit.repeat(self.current as usize);
        self.current
    }

    /// Seeds `next` from an existing line's indentation and rules. Returns `false`
    /// when no rule matched, in which case the caller keeps looking further back.
    pub fn pick(&mut self, line: &ParsedLine) -> bool {
        let width: usize = line
            .indents
            .chars()
            .map(|c| if c == '\t' { self.tab_size } else { 1 })
            .sum();
        self.next = (width / self.tab_size) as i32;

        let matches = self.matches(line);
        let mut indenting_current = true;
        for &(before, after) in &matches {
            if indenting_current {
                if after != 0 {
                    self.next += after;
                    indenting_current = false;
                }
            } else {
                self.next += before + after;
            }
        }
        !matches.is_empty()
    }

    fn rules(&self) -> impl Iterator<Item = &IndentRule> + '_ {
        BUILTIN_RULES.iter().chain(self.user_rules)
    }

    fn matches(&self, line: &ParsedLine) -> Vec<(i32, i32)> {
        line.rule_words()
            .filter_map(|word| self.rules().find(|rule| rule.pattern.is_match(word)))
            .map(|rule| (rule.before, rule.after))
            .collect()
    }
}
