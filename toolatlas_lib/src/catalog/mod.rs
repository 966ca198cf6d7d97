mod store;
mod types;

pub use store::{load_page, load_summaries};
pub use types::{Source, ToolPage, ToolSummary};
