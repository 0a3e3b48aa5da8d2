//! Flat row views of a tool for grid-style editors.
//!
//! Policy:
//! - Conversion is pure and order-preserving in both directions.
//! - Rows missing their key field (`id`, `input_id`, `name`) are dropped, not rejected.
//! - List-valued fields travel as comma-separated text: joined with `", "`,
//!   split on `,`, trimmed, empty tokens discarded.
//! - Recommendation rules flatten into three fixed condition slots. This is an
//!   editor limitation only; the model itself holds any number of conditions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{
    Condition, InputField, InputKind, Level, RecommendationRule, ScoringRule, ToolDefinition,
};

/// Number of condition slots an editor row carries.
pub const CONDITION_SLOTS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRow {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: InputKind,
    pub options_csv: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRow {
    pub input_id: String,
    pub favor_values_csv: String,
    pub against_values_csv: String,
    pub invert_favor: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleRow {
    pub name: String,
    pub level: Level,
    pub message: String,
    pub input_id_1: String,
    pub value_1: String,
    pub input_id_2: String,
    pub value_2: String,
    pub input_id_3: String,
    pub value_3: String,
}

impl RuleRow {
    fn slots(&self) -> [(&str, &str); CONDITION_SLOTS] {
        [
            (self.input_id_1.as_str(), self.value_1.as_str()),
            (self.input_id_2.as_str(), self.value_2.as_str()),
            (self.input_id_3.as_str(), self.value_3.as_str()),
        ]
    }

    fn set_slot(&mut self, idx: usize, cond: &Condition) {
        let (id, value) = match idx {
            0 => (&mut self.input_id_1, &mut self.value_1),
            1 => (&mut self.input_id_2, &mut self.value_2),
            2 => (&mut self.input_id_3, &mut self.value_3),
            _ => return,
        };
        *id = cond.input_id.clone();
        *value = cond.value.clone();
    }
}

/// All three editor grids for one tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolRows {
    pub inputs: Vec<InputRow>,
    pub scoring_rules: Vec<ScoringRow>,
    pub rules: Vec<RuleRow>,
}

impl ToolRows {
    pub fn from_tool(tool: &ToolDefinition) -> Self {
        Self {
            inputs: inputs_to_rows(&tool.inputs),
            scoring_rules: scoring_rules_to_rows(&tool.scoring_rules),
            rules: rules_to_rows(&tool.rules),
        }
    }

    /// Replace the row-backed collections of `tool`; name, description and
    /// fallback are left alone.
    pub fn apply_to(&self, tool: &mut ToolDefinition) {
        tool.inputs = rows_to_inputs(&self.inputs);
        tool.scoring_rules = rows_to_scoring_rules(&self.scoring_rules);
        tool.rules = rows_to_rules(&self.rules);
    }
}

// ----------------- CSV helpers -----------------

/// Split comma-separated text into trimmed, non-empty values.
pub fn split_csv(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_csv(values: &[String]) -> String {
    values.join(", ")
}

// ----------------- inputs -----------------

pub fn inputs_to_rows(inputs: &[InputField]) -> Vec<InputRow> {
    inputs
        .iter()
        .map(|f| InputRow {
            id: f.id.clone(),
            label: f.label.clone(),
            kind: f.kind,
            options_csv: join_csv(&f.options),
        })
        .collect()
}

pub fn rows_to_inputs(rows: &[InputRow]) -> Vec<InputField> {
    let out: Vec<InputField> = rows
        .iter()
        .filter_map(|row| {
            let id = row.id.trim();
            if id.is_empty() {
                return None;
            }
            Some(InputField {
                id: id.to_string(),
                label: row.label.trim().to_string(),
                kind: row.kind,
                options: split_csv(&row.options_csv),
            })
        })
        .collect();
    log_dropped("input", rows.len(), out.len());
    out
}

// ----------------- scoring rules -----------------

pub fn scoring_rules_to_rows(rules: &[ScoringRule]) -> Vec<ScoringRow> {
    rules
        .iter()
        .map(|r| ScoringRow {
            input_id: r.input_id.clone(),
            favor_values_csv: join_csv(&r.favor_values),
            against_values_csv: join_csv(&r.against_values),
            invert_favor: r.invert_favor,
        })
        .collect()
}

pub fn rows_to_scoring_rules(rows: &[ScoringRow]) -> Vec<ScoringRule> {
    let out: Vec<ScoringRule> = rows
        .iter()
        .filter_map(|row| {
            let input_id = row.input_id.trim();
            if input_id.is_empty() {
                return None;
            }
            Some(ScoringRule {
                input_id: input_id.to_string(),
                favor_values: split_csv(&row.favor_values_csv),
                against_values: split_csv(&row.against_values_csv),
                invert_favor: row.invert_favor,
            })
        })
        .collect();
    log_dropped("scoring", rows.len(), out.len());
    out
}

// ----------------- recommendation rules -----------------

/// Conditions past the third slot cannot be represented and are left out.
pub fn rules_to_rows(rules: &[RecommendationRule]) -> Vec<RuleRow> {
    rules
        .iter()
        .map(|rule| {
            if rule.conditions.len() > CONDITION_SLOTS {
                debug!(
                    rule = %rule.name,
                    conditions = rule.conditions.len(),
                    "rule has more conditions than editor slots; extra conditions not shown"
                );
            }
            let mut row = RuleRow {
                name: rule.name.clone(),
                level: rule.level,
                message: rule.message.clone(),
                ..RuleRow::default()
            };
            for (idx, cond) in rule.conditions.iter().take(CONDITION_SLOTS).enumerate() {
                row.set_slot(idx, cond);
            }
            row
        })
        .collect()
}

/// Rule names are display text, so they are trimmed only to test for blanks
/// and stored as typed; input ids are identifiers and are stored trimmed.
pub fn rows_to_rules(rows: &[RuleRow]) -> Vec<RecommendationRule> {
    let out: Vec<RecommendationRule> = rows
        .iter()
        .filter(|row| !row.name.trim().is_empty())
        .map(|row| RecommendationRule {
            name: row.name.clone(),
            level: row.level,
            message: row.message.clone(),
            conditions: row
                .slots()
                .into_iter()
                .filter_map(|(id, value)| {
                    let id = id.trim();
                    (!id.is_empty() && !value.is_empty()).then(|| Condition::equals(id, value))
                })
                .collect(),
        })
        .collect();
    log_dropped("rule", rows.len(), out.len());
    out
}

fn log_dropped(kind: &str, total: usize, kept: usize) {
    if kept < total {
        debug!(kind, dropped = total - kept, "dropped rows without a key field");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_discards_empty_tokens() {
        assert_eq!(split_csv("a,, b"), vec!["a", "b"]);
        assert_eq!(split_csv(" , ,"), Vec::<String>::new());
        assert_eq!(split_csv(""), Vec::<String>::new());
    }

    #[test]
    fn join_csv_uses_comma_space() {
        assert_eq!(join_csv(&["Yes".into(), "No".into()]), "Yes, No");
    }

    #[test]
    fn set_slot_ignores_out_of_range() {
        let mut row = RuleRow::default();
        row.set_slot(3, &Condition::equals("q", "Yes"));
        assert_eq!(row, RuleRow::default());
    }
}
