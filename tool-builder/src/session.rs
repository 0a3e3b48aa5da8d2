//! In-memory editing of one tool.
//!
//! The session owns a deep copy; the catalog entry is untouched until
//! [`EditSession::commit`], and nothing reaches disk until the caller saves
//! the catalog.

use crate::error::ToolResult;
use crate::rows::{
    rows_to_inputs, rows_to_rules, rows_to_scoring_rules, InputRow, RuleRow, ScoringRow, ToolRows,
};
use crate::store::ToolCatalog;
use crate::types::{OutcomeMessage, ToolDefinition, ToolId};

#[derive(Debug, Clone)]
pub struct EditSession {
    tool_id: ToolId,
    draft: ToolDefinition,
}

impl EditSession {
    pub fn open(catalog: &ToolCatalog, tool_id: &str) -> ToolResult<Self> {
        let draft = catalog.get(tool_id)?.clone();
        Ok(Self {
            tool_id: tool_id.to_string(),
            draft,
        })
    }

    pub fn tool_id(&self) -> &str {
        &self.tool_id
    }

    pub fn draft(&self) -> &ToolDefinition {
        &self.draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_fallback(&mut self, fallback: OutcomeMessage) {
        self.draft.fallback = Some(fallback);
    }

    pub fn rows(&self) -> ToolRows {
        ToolRows::from_tool(&self.draft)
    }

    pub fn apply_input_rows(&mut self, rows: &[InputRow]) {
        self.draft.inputs = rows_to_inputs(rows);
    }

    pub fn apply_scoring_rows(&mut self, rows: &[ScoringRow]) {
        self.draft.scoring_rules = rows_to_scoring_rules(rows);
    }

    pub fn apply_rule_rows(&mut self, rows: &[RuleRow]) {
        self.draft.rules = rows_to_rules(rows);
    }

    pub fn apply_rows(&mut self, rows: &ToolRows) {
        rows.apply_to(&mut self.draft);
    }

    /// Write the draft back into the catalog under the session's id.
    pub fn commit(self, catalog: &mut ToolCatalog) -> ToolId {
        catalog.upsert(self.tool_id.clone(), self.draft);
        self.tool_id
    }
}
