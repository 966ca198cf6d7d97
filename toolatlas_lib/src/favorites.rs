use std::{
    collections::BTreeSet,
    fs,
    path::PathBuf,
};

use crate::error::ToolAtlasError;

/// Client-local favorites set, injected into whatever needs a membership
/// test rather than reached as ambient global state.
pub trait FavoritesStore {
    fn has(&self, tool_name: &str) -> bool;
    fn add(&mut self, tool_name: &str) -> Result<(), ToolAtlasError>;
    fn remove(&mut self, tool_name: &str) -> Result<(), ToolAtlasError>;
    fn names(&self) -> Vec<String>;

    /// Flip membership; returns whether the tool is a favorite afterwards.
    fn toggle(&mut self, tool_name: &str) -> Result<bool, ToolAtlasError> {
        if self.has(tool_name) {
            self.remove(tool_name)?;
            Ok(false)
        } else {
            self.add(tool_name)?;
            Ok(true)
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryFavorites {
    names: BTreeSet<String>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoritesStore for MemoryFavorites {
    fn has(&self, tool_name: &str) -> bool {
        self.names.contains(tool_name)
    }

    fn add(&mut self, tool_name: &str) -> Result<(), ToolAtlasError> {
        self.names.insert(tool_name.to_string());
        Ok(())
    }

    fn remove(&mut self, tool_name: &str) -> Result<(), ToolAtlasError> {
        self.names.remove(tool_name);
        Ok(())
    }

    fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

/// JSON-file-backed favorites: read once at startup, written on every
/// mutation.
#[derive(Debug)]
pub struct FileFavorites {
    path: PathBuf,
    names: BTreeSet<String>,
}

impl FileFavorites {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ToolAtlasError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                names: BTreeSet::new(),
            });
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| ToolAtlasError::io(format!("reading favorites '{}'", path.display()), e))?;

        let names = serde_json::from_str(&content).map_err(|e| {
            ToolAtlasError::InvalidState(format!(
                "failed to parse favorites '{}': {e}",
                path.display()
            ))
        })?;

        Ok(Self { path, names })
    }

    fn save(&self) -> Result<(), ToolAtlasError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                ToolAtlasError::io(
                    format!("creating favorites directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let content = serde_json::to_string_pretty(&self.names)
            .map_err(|e| ToolAtlasError::InvalidState(format!("serializing favorites: {e}")))?;

        fs::write(&self.path, content)
            .map_err(|e| ToolAtlasError::io(format!("writing favorites '{}'", self.path.display()), e))
    }
}

impl FavoritesStore for FileFavorites {
    fn has(&self, tool_name: &str) -> bool {
        self.names.contains(tool_name)
    }

    fn add(&mut self, tool_name: &str) -> Result<(), ToolAtlasError> {
        if self.names.insert(tool_name.to_string()) {
            self.save()?;
        }
        Ok(())
    }

    fn remove(&mut self, tool_name: &str) -> Result<(), ToolAtlasError> {
        if self.names.remove(tool_name) {
            self.save()?;
        }
        Ok(())
    }

    fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}
