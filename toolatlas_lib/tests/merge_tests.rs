//! Merge runs over real temporary directory trees: completeness, leniency,
//! idempotence and the bioschemas graph special case.

use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use toolatlas::{
    MergeConfig, OutputLayout, Source, ToolSummary,
    catalog::{load_page, load_summaries},
    merge,
};

struct Workspace {
    _dir: TempDir,
    config: MergeConfig,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = MergeConfig {
            content_root: dir.path().join("content"),
            output_root: dir.path().join("metadata"),
        };
        fs::create_dir_all(&config.content_root).unwrap();
        Self { _dir: dir, config }
    }

    fn add_file(&self, tool: &str, file_name: &str, content: &str) {
        let folder = self.config.content_root.join(tool);
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join(file_name), content).unwrap();
    }

    fn layout(&self) -> OutputLayout {
        OutputLayout::new(&self.config.output_root)
    }

    fn summaries(&self) -> Vec<ToolSummary> {
        load_summaries(&self.layout().combined_path()).unwrap()
    }
}

fn summary_for<'a>(summaries: &'a [ToolSummary], tool_name: &str) -> &'a ToolSummary {
    summaries
        .iter()
        .find(|s| s.tool_name == tool_name)
        .unwrap_or_else(|| panic!("no summary for '{tool_name}'"))
}

const BIOCONDA_YAML: &str = "\
package:
  name: samtools
  version: \"1.19\"
about:
  home: https://www.htslib.org
  license: MIT
  summary: Tools for manipulating alignments in SAM, BAM and CRAM formats
";

fn galaxy_json() -> String {
    json!({
        "Description": "Reads, writes and indexes alignments",
        "EDAM_topics": ["Genomics", "Sequence analysis"],
        "ToolShed_categories": ["SAM"],
        "Suite_users_on_main_servers": 12345
    })
    .to_string()
}

#[test]
fn combined_summary_and_page_artifacts_are_written() {
    let ws = Workspace::new();
    ws.add_file("samtools", "bioconda_samtools.yaml", BIOCONDA_YAML);
    ws.add_file("samtools", "samtools.galaxy.json", &galaxy_json());

    let report = merge::run(&ws.config).unwrap();
    assert_eq!(report.tools_merged, 1);
    assert_eq!(report.tools_skipped, 0);
    assert_eq!(report.files_failed, 0);

    let summaries = ws.summaries();
    assert_eq!(summaries.len(), 1);

    let summary = summary_for(&summaries, "samtools");
    assert!(summary.has_source(Source::Bioconda));
    assert!(summary.has_source(Source::Galaxy));
    assert_eq!(
        summary.fetched_metadata.get("bioconda__name"),
        Some(&json!("samtools"))
    );
    assert_eq!(
        summary.fetched_metadata.get("bioconda__license"),
        Some(&json!("MIT"))
    );
    assert_eq!(
        summary.fetched_metadata.get("galaxy__edam_topics"),
        Some(&json!(["Genomics", "Sequence analysis"]))
    );
    // Page-only fields stay out of the summary.
    assert!(!summary.fetched_metadata.contains_key("bioconda__home"));

    let page = load_page(&ws.layout(), "samtools").unwrap();
    assert_eq!(page.contents, summary.contents);
    assert_eq!(
        page.page_metadata.get("bioconda__home"),
        Some(&json!("https://www.htslib.org"))
    );
    assert_eq!(
        page.page_metadata.get("galaxy__users_all_time"),
        Some(&json!(12345))
    );
}

#[test]
fn biotools_only_folder_yields_minimal_summary() {
    let ws = Workspace::new();
    ws.add_file(
        "footool",
        "footool.biotools.json",
        &json!({"name": "fooTool"}).to_string(),
    );

    merge::run(&ws.config).unwrap();

    let summaries = ws.summaries();
    let summary = summary_for(&summaries, "footool");
    assert_eq!(
        summary.contents.iter().collect::<Vec<_>>(),
        vec![&Source::Biotools]
    );
    assert_eq!(
        summary.fetched_metadata.get("biotools__name"),
        Some(&json!("fooTool"))
    );
    // Unresolvable mappings are omitted, not null.
    assert!(!summary.fetched_metadata.contains_key("biotools__license"));
}

#[test]
fn folder_without_matching_files_is_excluded() {
    let ws = Workspace::new();
    ws.add_file("samtools", "bioconda_samtools.yaml", BIOCONDA_YAML);
    ws.add_file("stray", "notes.txt", "not a metadata file");

    let report = merge::run(&ws.config).unwrap();
    assert_eq!(report.tools_merged, 1);
    assert_eq!(report.tools_skipped, 1);

    let summaries = ws.summaries();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].tool_name, "samtools");
    assert!(!ws.layout().tool_page_path("stray").exists());
}

#[test]
fn every_matching_folder_appears_exactly_once() {
    let ws = Workspace::new();
    for tool in ["alpha", "beta", "gamma"] {
        ws.add_file(
            tool,
            &format!("{tool}.biotools.json"),
            &json!({"name": tool}).to_string(),
        );
    }

    merge::run(&ws.config).unwrap();

    let mut names: Vec<String> = ws.summaries().iter().map(|s| s.tool_name.clone()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names, vec!["alpha", "beta", "gamma"]);
}

#[test]
fn malformed_file_is_skipped_and_the_run_continues() {
    let ws = Workspace::new();
    ws.add_file("broken", "bioconda_broken.yaml", "[unterminated");
    ws.add_file("broken", "broken.galaxy.json", &galaxy_json());
    ws.add_file("healthy", "bioconda_healthy.yaml", BIOCONDA_YAML);

    let report = merge::run(&ws.config).unwrap();
    assert_eq!(report.tools_merged, 2);
    assert_eq!(report.files_failed, 1);

    let summaries = ws.summaries();
    let broken = summary_for(&summaries, "broken");
    // The unparseable source contributed nothing, the valid one did.
    assert!(!broken.has_source(Source::Bioconda));
    assert!(broken.has_source(Source::Galaxy));
    assert!(broken.fetched_metadata.contains_key("galaxy__summary"));
}

#[test]
fn bioschemas_software_application_entry_is_selected_from_the_graph() {
    let ws = Workspace::new();
    ws.add_file(
        "mapper",
        "mapper.bioschemas.jsonld",
        &json!({
            "@graph": [
                {"@type": "sc:Person", "sc:name": "The Author"},
                {
                    "@type": "sc:SoftwareApplication",
                    "@id": "https://example.org/mapper",
                    "sc:name": "mapper",
                    "sc:license": "Apache-2.0"
                }
            ]
        })
        .to_string(),
    );

    merge::run(&ws.config).unwrap();

    let summaries = ws.summaries();
    let summary = summary_for(&summaries, "mapper");
    assert!(summary.has_source(Source::Bioschemas));
    assert_eq!(
        summary.fetched_metadata.get("bioschemas__name"),
        Some(&json!("mapper"))
    );
    assert_eq!(
        summary.fetched_metadata.get("bioschemas__license"),
        Some(&json!("Apache-2.0"))
    );

    let page = load_page(&ws.layout(), "mapper").unwrap();
    assert_eq!(
        page.page_metadata.get("bioschemas__home"),
        Some(&json!("https://example.org/mapper"))
    );
}

#[test]
fn bioschemas_graph_without_software_entry_contributes_nothing() {
    let ws = Workspace::new();
    ws.add_file(
        "docs-only",
        "docs-only.bioschemas.jsonld",
        &json!({"@graph": [{"@type": "sc:CreativeWork", "sc:name": "manual"}]}).to_string(),
    );

    merge::run(&ws.config).unwrap();

    let summaries = ws.summaries();
    let summary = summary_for(&summaries, "docs-only");
    // The file exists and parses, so the source is recorded as present.
    assert!(summary.has_source(Source::Bioschemas));
    assert!(summary.fetched_metadata.is_empty());
}

#[test]
fn rerunning_on_an_unchanged_tree_reproduces_identical_artifacts() {
    let ws = Workspace::new();
    ws.add_file("samtools", "bioconda_samtools.yaml", BIOCONDA_YAML);
    ws.add_file("samtools", "samtools.galaxy.json", &galaxy_json());
    ws.add_file(
        "footool",
        "footool.biotools.json",
        &json!({"name": "fooTool", "description": "demo"}).to_string(),
    );

    merge::run(&ws.config).unwrap();
    let combined_first = fs::read(ws.layout().combined_path()).unwrap();
    let page_first = fs::read(ws.layout().tool_page_path("samtools")).unwrap();

    merge::run(&ws.config).unwrap();
    let combined_second = fs::read(ws.layout().combined_path()).unwrap();
    let page_second = fs::read(ws.layout().tool_page_path("samtools")).unwrap();

    assert_eq!(combined_first, combined_second);
    assert_eq!(page_first, page_second);
}

#[test]
fn stale_artifacts_are_dropped_by_a_new_run() {
    let ws = Workspace::new();
    ws.add_file("samtools", "bioconda_samtools.yaml", BIOCONDA_YAML);

    let stale_dir = ws.config.output_root.join("tools");
    fs::create_dir_all(&stale_dir).unwrap();
    fs::write(stale_dir.join("removed-tool.json"), "{}").unwrap();

    merge::run(&ws.config).unwrap();

    assert!(!ws.layout().tool_page_path("removed-tool").exists());
    assert!(ws.layout().tool_page_path("samtools").exists());
}

#[test]
fn unreadable_content_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = MergeConfig {
        content_root: dir.path().join("does-not-exist"),
        output_root: dir.path().join("metadata"),
    };

    assert!(merge::run(&config).is_err());
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn one_page_file_per_merged_tool() {
    let ws = Workspace::new();
    for tool in ["alpha", "beta"] {
        ws.add_file(
            tool,
            &format!("{tool}.biotools.json"),
            &json!({"name": tool}).to_string(),
        );
    }
    ws.add_file("empty", "readme.md", "nothing to merge");

    merge::run(&ws.config).unwrap();

    assert_eq!(
        file_names(&ws.layout().tools_path()),
        vec!["alpha.json", "beta.json"]
    );
}
