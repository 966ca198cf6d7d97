mod layout;
mod run;

pub use layout::{COMBINED_FILE, OutputLayout, TOOLS_DIR};
pub use run::{MergeReport, run};
