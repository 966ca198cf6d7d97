use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::ToolAtlasError;

pub const COMBINED_FILE: &str = "combined_metadata.json";
pub const TOOLS_DIR: &str = "tools";

/// Paths of the artifacts a merge run produces.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    output_root: PathBuf,
}

impl OutputLayout {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn combined_path(&self) -> PathBuf {
        self.output_root.join(COMBINED_FILE)
    }

    pub fn tools_path(&self) -> PathBuf {
        self.output_root.join(TOOLS_DIR)
    }

    pub fn tool_page_path(&self, tool_name: &str) -> PathBuf {
        self.tools_path().join(format!("{tool_name}.json"))
    }

    /// Artifacts are regenerated wholesale: any previous output tree is
    /// dropped before a run writes fresh files.
    pub fn reset(&self) -> Result<(), ToolAtlasError> {
        if self.output_root.exists() {
            fs::remove_dir_all(&self.output_root).map_err(|e| {
                ToolAtlasError::io(
                    format!("removing previous output '{}'", self.output_root.display()),
                    e,
                )
            })?;
        }
        self.ensure_structure()
    }

    pub fn ensure_structure(&self) -> Result<(), ToolAtlasError> {
        fs::create_dir_all(self.tools_path()).map_err(|e| {
            ToolAtlasError::io(
                format!("creating output structure '{}'", self.output_root.display()),
                e,
            )
        })
    }
}
