use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Opaque store key for a tool (e.g. `tool_3f9a0c12`).
pub type ToolId = String;

/// Observed value per input id, as produced by an input collector.
pub type InputValues = HashMap<String, Scalar>;

/// A user-authored decision-support tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(default = "ToolDefinition::default_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inputs: Vec<InputField>,
    #[serde(default)]
    pub scoring_rules: Vec<ScoringRule>,
    /// Priority is sequence order: the first fully matching rule wins.
    #[serde(default)]
    pub rules: Vec<RecommendationRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<OutcomeMessage>,
}

impl ToolDefinition {
    pub const DEFAULT_NAME: &'static str = "New Tool";

    fn default_name() -> String {
        Self::DEFAULT_NAME.to_string()
    }

    /// Empty tool with the placeholder name and nothing else.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            inputs: Vec::new(),
            scoring_rules: Vec::new(),
            rules: Vec::new(),
            fallback: None,
        }
    }

    /// Look up an input by id. With duplicate ids the last declaration wins,
    /// matching how collected values shadow each other.
    pub fn input(&self, id: &str) -> Option<&InputField> {
        self.inputs.iter().rev().find(|f| f.id == id)
    }
}

impl Default for ToolDefinition {
    fn default() -> Self {
        Self::named(Self::DEFAULT_NAME)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputField {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: InputKind,
    /// Only meaningful for `select` inputs.
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Select,
    Number,
    Text,
}

impl InputKind {
    pub const ALL: [InputKind; 3] = [InputKind::Select, InputKind::Number, InputKind::Text];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Select => "select",
            InputKind::Number => "number",
            InputKind::Text => "text",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown input type `{s}` (expected select, number or text)"))
    }
}

/// One contribution to the favor/against tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRule {
    /// Empty ids never score.
    #[serde(default)]
    pub input_id: String,
    #[serde(default)]
    pub favor_values: Vec<String>,
    #[serde(default)]
    pub against_values: Vec<String>,
    /// Swaps favor/against polarity.
    #[serde(default)]
    pub invert_favor: bool,
}

/// A candidate outcome, selected when every condition holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRule {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub message: String,
    /// Empty means the rule never matches.
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl RecommendationRule {
    pub fn outcome(&self) -> OutcomeMessage {
        OutcomeMessage {
            level: self.level,
            message: self.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub input_id: String,
    #[serde(default)]
    pub op: ConditionOp,
    #[serde(default)]
    pub value: String,
}

impl Condition {
    pub fn equals(input_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            input_id: input_id.into(),
            op: ConditionOp::Equals,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionOp {
    #[default]
    Equals,
}

/// Severity hint for display styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Success, Level::Info, Level::Warning, Level::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown level `{s}` (expected success, info, warning or error)")
            })
    }
}

/// `{level, message}` shared by fallbacks and rule outcomes. Missing fields
/// deserialize to the built-in no-match outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeMessage {
    #[serde(default = "OutcomeMessage::default_level")]
    pub level: Level,
    #[serde(default = "OutcomeMessage::default_message")]
    pub message: String,
}

impl OutcomeMessage {
    pub const NO_MATCH: &'static str = "No rules matched.";

    fn default_level() -> Level {
        Level::Warning
    }

    fn default_message() -> String {
        Self::NO_MATCH.to_string()
    }

    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Used when a tool has no fallback of its own.
    pub fn no_match() -> Self {
        Self::new(Level::Warning, Self::NO_MATCH)
    }
}

/// A single collected input value. Serialized untagged: a JSON string or number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(f64),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            Scalar::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(_) => None,
        }
    }

    /// Strict comparison against a literal from a rule: text only, no coercion.
    pub fn equals_literal(&self, literal: &str) -> bool {
        self.as_text() == Some(literal)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}
