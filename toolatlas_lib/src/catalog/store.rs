use std::{fs, path::Path};

use crate::{
    catalog::{ToolPage, ToolSummary},
    error::ToolAtlasError,
    merge::OutputLayout,
};

/// Read the combined summary artifact produced by a merge run.
pub fn load_summaries(path: &Path) -> Result<Vec<ToolSummary>, ToolAtlasError> {
    let content = fs::read_to_string(path).map_err(|e| {
        ToolAtlasError::io(format!("reading combined metadata '{}'", path.display()), e)
    })?;

    serde_json::from_str(&content).map_err(|e| {
        ToolAtlasError::InvalidState(format!(
            "failed to parse combined metadata '{}': {e}",
            path.display()
        ))
    })
}

/// Read one tool's page record, addressed by its `tool_name`.
pub fn load_page(layout: &OutputLayout, tool_name: &str) -> Result<ToolPage, ToolAtlasError> {
    let path = layout.tool_page_path(tool_name);
    if !path.exists() {
        return Err(ToolAtlasError::UnknownTool(tool_name.to_string()));
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| ToolAtlasError::io(format!("reading tool page '{}'", path.display()), e))?;

    serde_json::from_str(&content).map_err(|e| {
        ToolAtlasError::InvalidState(format!(
            "failed to parse tool page '{}': {e}",
            path.display()
        ))
    })
}
