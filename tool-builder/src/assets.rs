//! Seed content for new tools.
//!
//! The template doubles as the reference example of the schema shape: one
//! select input, one scoring rule keyed to it, one rule matching `Yes`, and a
//! `warning` fallback. Every call builds a fresh value so edits to one new
//! tool never leak into another.

use crate::types::{
    Condition, InputField, InputKind, Level, OutcomeMessage, RecommendationRule, ScoringRule,
    ToolDefinition,
};

pub const EXAMPLE_INPUT_ID: &str = "example_yes_no";

/// Build the template tool under the placeholder name.
pub fn template_tool() -> ToolDefinition {
    template_tool_named(ToolDefinition::DEFAULT_NAME)
}

/// Build the template tool under a caller-chosen name.
pub fn template_tool_named(name: impl Into<String>) -> ToolDefinition {
    ToolDefinition {
        name: name.into(),
        description: String::new(),
        inputs: vec![InputField {
            id: EXAMPLE_INPUT_ID.to_string(),
            label: "Example Yes/No?".to_string(),
            kind: InputKind::Select,
            options: vec!["Yes".into(), "No".into(), "Unknown".into()],
        }],
        scoring_rules: vec![ScoringRule {
            input_id: EXAMPLE_INPUT_ID.to_string(),
            favor_values: vec!["Yes".into()],
            against_values: vec!["No".into()],
            invert_favor: false,
        }],
        rules: vec![RecommendationRule {
            name: "Example Rule".to_string(),
            level: Level::Info,
            message: "Example: Rule matched".to_string(),
            conditions: vec![Condition::equals(EXAMPLE_INPUT_ID, "Yes")],
        }],
        fallback: Some(OutcomeMessage::no_match()),
    }
}
