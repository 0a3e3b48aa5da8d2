//! Default values and raw-text coercion for tool inputs.
//!
//! A front-end (form, CLI flags) hands over text; this turns it into the
//! [`InputValues`] mapping the evaluator reads, keyed exactly by input id.

use crate::error::{ToolError, ToolResult};
use crate::rows::join_csv;
use crate::types::{InputField, InputKind, InputValues, Scalar, ToolDefinition};

/// First option for selects (empty text when there are none), `0.0` for
/// numbers, empty text otherwise.
pub fn default_value(field: &InputField) -> Scalar {
    match field.kind {
        InputKind::Select => Scalar::Text(field.options.first().cloned().unwrap_or_default()),
        InputKind::Number => Scalar::Number(0.0),
        InputKind::Text => Scalar::Text(String::new()),
    }
}

/// Defaults for every input. A later duplicate id overwrites an earlier one.
pub fn default_values(tool: &ToolDefinition) -> InputValues {
    tool.inputs
        .iter()
        .map(|f| (f.id.clone(), default_value(f)))
        .collect()
}

/// Interpret `raw` according to the input's type.
pub fn coerce(field: &InputField, raw: &str) -> ToolResult<Scalar> {
    match field.kind {
        InputKind::Number => raw
            .trim()
            .parse::<f64>()
            .map(Scalar::Number)
            .map_err(|_| ToolError::InvalidNumber {
                input_id: field.id.clone(),
                raw: raw.to_string(),
            }),
        InputKind::Select if !field.options.is_empty() => {
            if field.options.iter().any(|o| o == raw) {
                Ok(Scalar::Text(raw.to_string()))
            } else {
                Err(ToolError::NotAnOption {
                    input_id: field.id.clone(),
                    raw: raw.to_string(),
                    options: join_csv(&field.options),
                })
            }
        }
        InputKind::Select | InputKind::Text => Ok(Scalar::Text(raw.to_string())),
    }
}

/// Defaults with `(input_id, raw)` overrides applied in order.
pub fn collect<'a, I>(tool: &ToolDefinition, overrides: I) -> ToolResult<InputValues>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut values = default_values(tool);
    for (id, raw) in overrides {
        let field = tool
            .input(id)
            .ok_or_else(|| ToolError::UnknownInput(id.to_string()))?;
        values.insert(field.id.clone(), coerce(field, raw)?);
    }
    Ok(values)
}
