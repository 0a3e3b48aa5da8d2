// Public modules so front-ends can use them
pub mod assets;
pub mod collector;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod rows;
pub mod session;
pub mod store;
pub mod types;

pub use assets::{template_tool, template_tool_named};
pub use collector::{collect, default_values};
pub use config::BuilderConfig;
pub use error::{ToolError, ToolResult};
pub use evaluator::{compute_scores, evaluate, evaluate_rules, first_match, Evaluation, ScoreTally};
pub use rows::ToolRows;
pub use session::EditSession;
pub use store::{ToolCatalog, ToolStore};
pub use types::{
    Condition, ConditionOp, InputField, InputKind, InputValues, Level, OutcomeMessage,
    RecommendationRule, Scalar, ScoringRule, ToolDefinition, ToolId,
};

/// Evaluate a tool given as JSON against values given as JSON
/// (`{"input_id": "Yes", "n": 3}`).
pub fn evaluate_tool_json(
    json_tool: &str,
    json_values: &str,
) -> Result<Evaluation, serde_json::Error> {
    let tool: ToolDefinition = serde_json::from_str(json_tool)?;
    let values: InputValues = serde_json::from_str(json_values)?;
    Ok(evaluate(&tool, &values))
}
