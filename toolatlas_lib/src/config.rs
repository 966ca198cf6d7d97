use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Root holding one subdirectory per tool.
    pub content_root: PathBuf,
    /// Where the combined summary and per-tool page artifacts are written.
    pub output_root: PathBuf,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("content/data"),
            output_root: PathBuf::from("public/metadata"),
        }
    }
}
