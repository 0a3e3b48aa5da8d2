use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::assets::template_tool_named;
use crate::error::{ToolError, ToolResult};
use crate::types::{ToolDefinition, ToolId};

/// The persisted document: `{ "tools": { "<tool_id>": { ... } } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCatalog {
    #[serde(default)]
    pub tools: BTreeMap<ToolId, ToolDefinition>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fresh template under a newly generated id and return the id.
    pub fn create_tool(&mut self, name: &str) -> ToolId {
        let id = loop {
            let candidate = new_tool_id();
            if !self.tools.contains_key(&candidate) {
                break candidate;
            }
        };
        self.tools.insert(id.clone(), template_tool_named(name));
        info!(tool_id = %id, name, "created tool from template");
        id
    }

    pub fn get(&self, id: &str) -> ToolResult<&ToolDefinition> {
        self.tools
            .get(id)
            .ok_or_else(|| ToolError::ToolNotFound(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> ToolResult<&mut ToolDefinition> {
        self.tools
            .get_mut(id)
            .ok_or_else(|| ToolError::ToolNotFound(id.to_string()))
    }

    /// Replace (or add) the whole definition stored under `id`.
    pub fn upsert(&mut self, id: impl Into<ToolId>, tool: ToolDefinition) {
        self.tools.insert(id.into(), tool);
    }

    pub fn remove(&mut self, id: &str) -> ToolResult<ToolDefinition> {
        let removed = self
            .tools
            .remove(id)
            .ok_or_else(|| ToolError::ToolNotFound(id.to_string()))?;
        info!(tool_id = %id, "removed tool");
        Ok(removed)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ToolId> {
        self.tools.keys()
    }

    /// Tool selected when nothing else is: the first id in key order.
    pub fn first_id(&self) -> Option<&ToolId> {
        self.tools.keys().next()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Opaque id, independent of the tool name.
pub fn new_tool_id() -> ToolId {
    let hex = Uuid::new_v4().simple().to_string();
    format!("tool_{}", &hex[..8])
}

/// JSON-file backed keyed store. Each load/save moves the whole catalog.
#[derive(Debug, Clone)]
pub struct ToolStore {
    path: PathBuf,
}

impl ToolStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the catalog. A missing file is an empty catalog.
    pub fn load(&self) -> ToolResult<ToolCatalog> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no tool store yet; starting empty");
            return Ok(ToolCatalog::new());
        }
        let bytes = fs::read(&self.path).map_err(|source| self.io_err(source))?;
        let catalog: ToolCatalog =
            serde_json::from_slice(&bytes).map_err(|source| ToolError::Json {
                path: self.path.clone(),
                source,
            })?;
        info!(path = %self.path.display(), tools = catalog.len(), "loaded tool store");
        Ok(catalog)
    }

    /// Write the whole catalog, pretty-printed, replacing the file atomically.
    pub fn save(&self, catalog: &ToolCatalog) -> ToolResult<()> {
        let bytes = serde_json::to_vec_pretty(catalog).map_err(|source| ToolError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, &bytes).map_err(|source| self.io_err(source))?;
        info!(path = %self.path.display(), tools = catalog.len(), "saved tool store");
        Ok(())
    }

    fn io_err(&self, source: io::Error) -> ToolError {
        ToolError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

// -------------- helpers --------------

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.write_all(b"\n")?;
        f.sync_all()?;
    }
    fs::rename(&tmp, path)
}
