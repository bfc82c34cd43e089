use once_cell::sync::Lazy;
use regex::Regex;

/// A rewrite applied to placeholder content.
///
/// An optional `ahead` group must match after the rewritten part but is not consumed,
/// so the next search resumes where `ahead` starts.
struct BeautifyRule {
    pattern: Regex,
    replacement: &'static str,
}

impl BeautifyRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("beautify rule"),
            replacement,
        }
    }

    fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 8);
        let mut last = 0;
        while let Some(caps) = self.pattern.captures_at(text, last) {
            let Some(whole) = caps.get(0) else { break };
            let end = caps.name("ahead").map_or(whole.end(), |m| m.start());
            if end <= last {
                break;
            }
            out.push_str(&text[last..whole.start()]);
            caps.expand(self.replacement, &mut out);
            last = end;
        }
        out.push_str(&text[last..]);
        out
    }
}

static RULES: Lazy<Vec<BeautifyRule>> = Lazy::new(|| {
    const OPERATORS: &str = "<>|<=|>=|=>|=|<|>";
    const ARITHMETIC: &str = r"/|<<|>>|\+|\|";
    vec![
        BeautifyRule::new(r"\s+", " "),
        // commas
        BeautifyRule::new(r"\s+(,)", "${1}"),
        BeautifyRule::new(r"(,)(?P<ahead>\S)", "${1} "),
        // member access and module paths
        BeautifyRule::new(r"\s+(\.|\\)", "${1}"),
        BeautifyRule::new(r"(\.|\\)\s+", "${1}"),
        BeautifyRule::new(r"\s+(::)", "${1}"),
        BeautifyRule::new(r"(::)\s+", "${1}"),
        // brackets
        BeautifyRule::new(r"\s+([})\]])", "${1}"),
        BeautifyRule::new(r"([{(\[])\s+", "${1}"),
        // comparison and assignment
        BeautifyRule::new(&format!(r"([^\s><=])(?P<ahead>{OPERATORS})"), "${1} "),
        BeautifyRule::new(&format!(r"({OPERATORS})(?P<ahead>[^\s><=])"), "${1} "),
        BeautifyRule::new(&format!(r"(\S)(?P<ahead>{ARITHMETIC})"), "${1} "),
        BeautifyRule::new(&format!(r"({ARITHMETIC})(?P<ahead>\S)"), "${1} "),
        // statement separators, leaving `::` alone
        BeautifyRule::new(r"([^\s:])(?P<ahead>:[^:])", "${1} "),
        BeautifyRule::new(r"([^:]:)(?P<ahead>[^\s:])", "${1} "),
    ]
});

/// Normalises spacing in placeholder content.
pub fn beautify(content: &str) -> String {
    RULES
        .iter()
        .fold(content.to_string(), |text, rule| rule.apply(&text))
}
