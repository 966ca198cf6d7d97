use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolAtlasError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {kind} document '{path}': {detail}")]
    ParseDocument {
        kind: String,
        path: PathBuf,
        detail: String,
    },

    #[error("no page record for tool '{0}'")]
    UnknownTool(String),

    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl ToolAtlasError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn parse(
        kind: impl Into<String>,
        path: impl Into<PathBuf>,
        detail: impl ToString,
    ) -> Self {
        Self::ParseDocument {
            kind: kind.into(),
            path: path.into(),
            detail: detail.to_string(),
        }
    }
}
