//! Declarative key mappings from raw source documents to catalog fields.
//!
//! One table per source kind, twice: a compact set for summaries and a
//! richer set for tool pages. These tables are the single point of change
//! when the content repository's schema evolves.

use serde_json::Value;

use crate::catalog::Source;

/// One step into a document tree.
#[derive(Debug, Clone, Copy)]
pub enum Seg {
    Key(&'static str),
    Index(usize),
}

/// Output field name paired with the path that produces it.
pub type KeyMapping = (&'static str, &'static [Seg]);

use Seg::Key;

const BIOCONDA_SUMMARY: &[KeyMapping] = &[
    ("name", &[Key("package"), Key("name")]),
    ("version", &[Key("package"), Key("version")]),
    ("license", &[Key("about"), Key("license")]),
    ("summary", &[Key("about"), Key("summary")]),
];

const BIOCONTAINERS_SUMMARY: &[KeyMapping] = &[
    ("name", &[Key("name")]),
    ("license", &[Key("license")]),
    ("summary", &[Key("description")]),
];

const BIOTOOLS_SUMMARY: &[KeyMapping] = &[
    ("name", &[Key("name")]),
    ("license", &[Key("license")]),
    ("summary", &[Key("description")]),
    ("addition_date", &[Key("additionDate")]),
    ("last_update_date", &[Key("lastUpdate")]),
    ("version", &[Key("version")]),
];

const BIOSCHEMAS_SUMMARY: &[KeyMapping] = &[
    ("name", &[Key("sc:name")]),
    ("license", &[Key("sc:license")]),
    ("version", &[Key("sc:softwareVersion")]),
];

const GALAXY_SUMMARY: &[KeyMapping] = &[
    ("summary", &[Key("Description")]),
    ("edam_topics", &[Key("EDAM_topics")]),
    ("toolshed_categories", &[Key("ToolShed_categories")]),
];

const BIOCONDA_PAGE: &[KeyMapping] = &[
    ("name", &[Key("package"), Key("name")]),
    ("version", &[Key("package"), Key("version")]),
    ("home", &[Key("about"), Key("home")]),
    ("documentation", &[Key("about"), Key("doc_url")]),
    ("license", &[Key("about"), Key("license")]),
    ("summary", &[Key("about"), Key("summary")]),
    ("identifiers", &[Key("extra"), Key("identifiers")]),
];

const BIOCONTAINERS_PAGE: &[KeyMapping] = &[
    ("name", &[Key("name")]),
    ("identifiers", &[Key("identifiers")]),
    ("license", &[Key("license")]),
    ("summary", &[Key("description")]),
];

const BIOTOOLS_PAGE: &[KeyMapping] = &[
    ("id", &[Key("biotoolsID")]),
    ("name", &[Key("name")]),
    ("home", &[Key("homepage")]),
    ("license", &[Key("license")]),
    ("summary", &[Key("description")]),
    ("addition_date", &[Key("additionDate")]),
    ("last_update_date", &[Key("lastUpdate")]),
    ("tool_type", &[Key("toolType")]),
    ("version", &[Key("version")]),
];

const BIOSCHEMAS_PAGE: &[KeyMapping] = &[
    ("name", &[Key("sc:name")]),
    ("home", &[Key("@id")]),
    ("license", &[Key("sc:license")]),
    ("version", &[Key("sc:softwareVersion")]),
    ("summary", &[Key("sc:description")]),
    ("tool_type", &[Key("@type")]),
];

const GALAXY_PAGE: &[KeyMapping] = &[
    ("first_commit", &[Key("Suite_first_commit_date")]),
    ("conda_name", &[Key("Suite_conda_package")]),
    ("conda_version", &[Key("Latest_suite_conda_package_version")]),
    ("summary", &[Key("Description")]),
    ("edam_operations", &[Key("EDAM_operations")]),
    ("edam_topics", &[Key("EDAM_topics")]),
    ("toolshed_categories", &[Key("ToolShed_categories")]),
    ("toolshed_id", &[Key("Suite_ID")]),
    ("users_5_years", &[Key("Suite_users_(last_5_years)_on_main_servers")]),
    ("users_all_time", &[Key("Suite_users_on_main_servers")]),
    ("usage_5_years", &[Key("Suite_runs_(last_5_years)_on_main_servers")]),
    ("usage_all_time", &[Key("Suite_runs_on_main_servers")]),
    ("bio_tools_summary", &[Key("bio.tool_description")]),
    ("bio_tools_ids", &[Key("bio.tool_ID")]),
    ("bio_tools_name", &[Key("bio.tool_name")]),
    ("related_tutorials", &[Key("Related_Tutorials")]),
    ("related_workflows", &[Key("Related_Workflows")]),
    ("tool_ids", &[Key("Tool_IDs")]),
    ("no_of_tools_eu", &[Key("Number_of_tools_on_UseGalaxy.eu")]),
    ("no_of_tools_org", &[Key("Number_of_tools_on_UseGalaxy.org_(Main)")]),
    ("no_of_tools_au", &[Key("Number_of_tools_on_UseGalaxy.org.au")]),
    ("no_of_tools_be", &[Key("Number_of_tools_on_UseGalaxy.be")]),
    ("no_of_tools_cz", &[Key("Number_of_tools_on_UseGalaxy.cz")]),
    ("no_of_tools_fr", &[Key("Number_of_tools_on_UseGalaxy.fr")]),
    ("no_of_tools_no", &[Key("Number_of_tools_on_UseGalaxy.no")]),
];

pub fn summary_mappings(source: Source) -> &'static [KeyMapping] {
    match source {
        Source::Bioconda => BIOCONDA_SUMMARY,
        Source::Biocontainers => BIOCONTAINERS_SUMMARY,
        Source::Biotools => BIOTOOLS_SUMMARY,
        Source::Bioschemas => BIOSCHEMAS_SUMMARY,
        Source::Galaxy => GALAXY_SUMMARY,
    }
}

pub fn page_mappings(source: Source) -> &'static [KeyMapping] {
    match source {
        Source::Bioconda => BIOCONDA_PAGE,
        Source::Biocontainers => BIOCONTAINERS_PAGE,
        Source::Biotools => BIOTOOLS_PAGE,
        Source::Bioschemas => BIOSCHEMAS_PAGE,
        Source::Galaxy => GALAXY_PAGE,
    }
}

/// Walk a path into a document; `None` as soon as a step has nowhere to go.
///
/// A `Key` segment applied to an array descends into the array's first
/// element before the lookup, so mappings written against a single record
/// keep working when the source wraps it in a one-element list.
pub fn resolve_path<'a>(doc: &'a Value, path: &[Seg]) -> Option<&'a Value> {
    let mut current = doc;
    for seg in path {
        match seg {
            Seg::Key(key) => {
                if let Value::Array(items) = current {
                    current = items.first()?;
                }
                current = current.as_object()?.get(*key)?;
            }
            Seg::Index(idx) => {
                current = current.as_array()?.get(*idx)?;
            }
        }
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn resolves_nested_keys() {
        let doc = json!({"package": {"name": "samtools", "version": "1.9"}});
        let value = resolve_path(&doc, &[Key("package"), Key("name")]);
        assert_eq!(value, Some(&json!("samtools")));
    }

    #[test]
    fn key_on_array_descends_into_first_element() {
        let doc = json!({"records": [{"license": "MIT"}, {"license": "GPL"}]});
        let value = resolve_path(&doc, &[Key("records"), Key("license")]);
        assert_eq!(value, Some(&json!("MIT")));
    }

    #[test]
    fn key_on_empty_array_resolves_to_nothing() {
        let doc = json!({"records": []});
        assert_eq!(resolve_path(&doc, &[Key("records"), Key("license")]), None);
    }

    #[test]
    fn index_addresses_array_elements_directly() {
        let doc = json!({"versions": ["1.0", "2.0"]});
        let value = resolve_path(&doc, &[Key("versions"), Seg::Index(1)]);
        assert_eq!(value, Some(&json!("2.0")));
    }

    #[test]
    fn missing_intermediate_key_resolves_to_nothing() {
        let doc = json!({"about": {"summary": "text"}});
        assert_eq!(resolve_path(&doc, &[Key("about"), Key("license")]), None);
        assert_eq!(resolve_path(&doc, &[Key("missing"), Key("license")]), None);
    }

    #[test]
    fn scalar_midway_resolves_to_nothing() {
        let doc = json!({"name": "plain"});
        assert_eq!(resolve_path(&doc, &[Key("name"), Key("inner")]), None);
    }

    #[test]
    fn explicit_null_is_a_resolved_value() {
        let doc = json!({"license": null});
        assert_eq!(resolve_path(&doc, &[Key("license")]), Some(&Value::Null));
    }

    #[test]
    fn every_source_has_both_tables() {
        for source in Source::ALL {
            assert!(!summary_mappings(source).is_empty());
            assert!(!page_mappings(source).is_empty());
        }
    }
}
