use std::path::PathBuf;

use thiserror::Error;

/// Faults raised by the store, catalog and input collection. Rule evaluation
/// and row conversion never fail.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool `{0}` not found")]
    ToolNotFound(String),

    #[error("tool has no input `{0}`")]
    UnknownInput(String),

    #[error("input `{input_id}` expects a number, got `{raw}`")]
    InvalidNumber { input_id: String, raw: String },

    #[error("`{raw}` is not an option of input `{input_id}` (options: {options})")]
    NotAnOption {
        input_id: String,
        raw: String,
        options: String,
    },

    #[error("store I/O at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store document {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type ToolResult<T> = std::result::Result<T, ToolError>;
