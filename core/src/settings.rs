use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::indent::IndentRule;

/// Client configuration section these settings are read from.
pub const SECTION: &str = "purebasicLanguage";

pub const DEFAULT_MAX_PROBLEMS: usize = 1000;

/// Raw `purebasicLanguage` section as sent by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSection {
    #[serde(default)]
    pub diagnostics: Option<DiagnosticsSection>,
    #[serde(default)]
    pub indentation_rules: Option<Vec<IndentRuleSection>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsSection {
    #[serde(default)]
    pub max_number_of_problems: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndentRuleSection {
    pub regex: String,
    #[serde(default)]
    pub flags: String,
    #[serde(default)]
    pub before: i32,
    #[serde(default)]
    pub after: i32,
}

impl IndentRuleSection {
    fn compile(&self) -> Result<IndentRule> {
        IndentRule::compile(&self.regex, &self.flags, self.before, self.after)
    }
}

/// Effective per-document settings with compiled user indentation rules.
#[derive(Debug, Clone)]
pub struct Settings {
    pub max_number_of_problems: usize,
    /// Applied after the built-in keyword rules.
    pub indentation_rules: Vec<IndentRule>,
}

impl Default for Settings {
    fn default() -> Self {
        let indentation_rules = default_rule_sections()
            .iter()
            .filter_map(|rule| rule.compile().ok())
            .collect();
        Self {
            max_number_of_problems: DEFAULT_MAX_PROBLEMS,
            indentation_rules,
        }
    }
}

fn default_rule_sections() -> Vec<IndentRuleSection> {
    vec![
        IndentRuleSection {
            regex: r"^;>\s*".to_string(),
            flags: "i".to_string(),
            before: 0,
            after: 1,
        },
        IndentRuleSection {
            regex: r"^;<\s*".to_string(),
            flags: "i".to_string(),
            before: -1,
            after: 0,
        },
    ]
}

impl Settings {
    /// Missing keys fall back to the defaults; a rule that fails to compile is an error.
    pub fn from_section(section: &SettingsSection) -> Result<Self> {
        let max_number_of_problems = section
            .diagnostics
            .as_ref()
            .and_then(|d| d.max_number_of_problems)
            .unwrap_or(DEFAULT_MAX_PROBLEMS);
        let indentation_rules = match &section.indentation_rules {
            Some(rules) => rules.iter().map(IndentRuleSection::compile).collect::<Result<_>>()?,
            None => Settings::default().indentation_rules,
        };
        Ok(Self {
            max_number_of_problems,
            indentation_rules,
        })
    }

    /// Accepts the section value returned by the client; `null` means defaults.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let section: SettingsSection =
            serde_json::from_value(value).map_err(|e| Error::InvalidSettings(e.to_string()))?;
        Self::from_section(&section)
    }
}
