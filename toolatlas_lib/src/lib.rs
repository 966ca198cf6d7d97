use tracing_subscriber::EnvFilter;

pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod mappings;
pub mod merge;
pub mod query;
pub mod view;

pub use catalog::{Source, ToolPage, ToolSummary};
pub use config::MergeConfig;
pub use error::ToolAtlasError;
pub use merge::{MergeReport, OutputLayout};

pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .pretty()
        .init();
}
