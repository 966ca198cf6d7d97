use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    catalog::{Source, ToolPage, ToolSummary},
    config::MergeConfig,
    error::ToolAtlasError,
    mappings::{self, KeyMapping},
    merge::layout::OutputLayout,
};

const SOFTWARE_APPLICATION_TYPE: &str = "sc:SoftwareApplication";

/// Operator-facing counts for one merge run. The per-tool and per-file skip
/// policies are lenient, so the counts are the only completeness signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Tools present in the combined output.
    pub tools_merged: usize,
    /// Folders with no matching source file, excluded from both outputs.
    pub tools_skipped: usize,
    /// Source files that existed but could not be parsed.
    pub files_failed: usize,
}

/// Merge the per-tool metadata tree into the combined summary artifact and
/// one page document per tool.
pub fn run(config: &MergeConfig) -> Result<MergeReport, ToolAtlasError> {
    info!(
        content_root = %config.content_root.display(),
        output_root = %config.output_root.display(),
        "merge_start"
    );

    let layout = OutputLayout::new(&config.output_root);
    layout.reset()?;

    let folders = tool_folders(&config.content_root)?;
    let mut combined = Vec::with_capacity(folders.len());
    let mut report = MergeReport::default();

    for folder in &folders {
        match merge_tool_folder(folder, &mut report) {
            Some((summary, page)) => {
                write_json(&layout.tool_page_path(&page.tool_name), &page)?;
                combined.push(summary);
                report.tools_merged += 1;
            }
            None => report.tools_skipped += 1,
        }
    }

    write_json(&layout.combined_path(), &combined)?;

    info!(
        tools_merged = report.tools_merged,
        tools_skipped = report.tools_skipped,
        files_failed = report.files_failed,
        combined_path = %layout.combined_path().display(),
        "merge completed"
    );

    Ok(report)
}

/// Immediate subdirectories of the content root, sorted by name so output
/// order is stable across runs. An unreadable root is the one fatal error.
fn tool_folders(content_root: &Path) -> Result<Vec<PathBuf>, ToolAtlasError> {
    let entries = fs::read_dir(content_root).map_err(|e| {
        ToolAtlasError::io(
            format!("reading content root '{}'", content_root.display()),
            e,
        )
    })?;

    let mut folders = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            ToolAtlasError::io(
                format!("reading entry in content root '{}'", content_root.display()),
                e,
            )
        })?;
        let path = entry.path();
        if path.is_dir() {
            folders.push(path);
        }
    }

    folders.sort();
    Ok(folders)
}

/// Extract one tool's summary and page records. `None` means the folder had
/// no matching source file and is excluded from both outputs.
fn merge_tool_folder(
    folder: &Path,
    report: &mut MergeReport,
) -> Option<(ToolSummary, ToolPage)> {
    let Some(tool_name) = folder.file_name().and_then(|name| name.to_str()) else {
        warn!(folder = %folder.display(), "skipping folder with non-utf8 name");
        return None;
    };

    info!(tool = %tool_name, "merge_tool_folder");

    let mut contents: BTreeSet<Source> = BTreeSet::new();
    let mut fetched_metadata: BTreeMap<String, Value> = BTreeMap::new();
    let mut page_metadata: BTreeMap<String, Value> = BTreeMap::new();
    let mut any_file = false;

    for source in Source::ALL {
        let path = folder.join(source.file_name(tool_name));
        if !path.exists() {
            continue;
        }
        any_file = true;

        let doc = match parse_document(&path) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(
                    tool = %tool_name,
                    source = source.as_str(),
                    error = %err,
                    "skipping unparseable source file"
                );
                report.files_failed += 1;
                continue;
            }
        };

        contents.insert(source);

        let Some(doc) = source_document(source, &doc) else {
            continue;
        };

        extract_into(source, doc, mappings::summary_mappings(source), &mut fetched_metadata);
        extract_into(source, doc, mappings::page_mappings(source), &mut page_metadata);
    }

    if !any_file {
        return None;
    }

    let summary = ToolSummary {
        tool_name: tool_name.to_string(),
        contents: contents.clone(),
        fetched_metadata,
    };
    let page = ToolPage {
        tool_name: tool_name.to_string(),
        contents,
        page_metadata,
    };

    Some((summary, page))
}

/// The document a source's mappings resolve against. Bioschemas documents
/// carry a `@graph` array; the software-application entry inside it is the
/// real record, and a graph without one contributes nothing.
fn source_document<'a>(source: Source, doc: &'a Value) -> Option<&'a Value> {
    if source != Source::Bioschemas {
        return Some(doc);
    }

    doc.get("@graph")?.as_array()?.iter().find(|entry| {
        entry.get("@type").and_then(Value::as_str) == Some(SOFTWARE_APPLICATION_TYPE)
    })
}

fn extract_into(
    source: Source,
    doc: &Value,
    table: &[KeyMapping],
    out: &mut BTreeMap<String, Value>,
) {
    for (field, path) in table {
        if let Some(value) = mappings::resolve_path(doc, path) {
            out.insert(source.metadata_key(field), value.clone());
        }
    }
}

fn parse_document(path: &Path) -> Result<Value, ToolAtlasError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ToolAtlasError::io(format!("reading source file '{}'", path.display()), e))?;

    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match ext.as_str() {
        "yaml" | "yml" => {
            serde_yaml::from_str(&raw).map_err(|e| ToolAtlasError::parse("yaml", path, e))
        }
        "json" | "jsonld" => {
            serde_json::from_str(&raw).map_err(|e| ToolAtlasError::parse("json", path, e))
        }
        other => Err(ToolAtlasError::InvalidState(format!(
            "unsupported metadata extension '{other}' for '{}'",
            path.display()
        ))),
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ToolAtlasError> {
    let content = serde_json::to_string(value).map_err(|e| {
        ToolAtlasError::InvalidState(format!("serializing artifact '{}': {e}", path.display()))
    })?;

    fs::write(path, content)
        .map_err(|e| ToolAtlasError::io(format!("writing artifact '{}'", path.display()), e))
}
