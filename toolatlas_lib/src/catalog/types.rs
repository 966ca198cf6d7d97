use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Origin of a metadata file inside a tool's folder. The variant order is
/// the fixed probe order during a merge run.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Bioconda,
    Biocontainers,
    Biotools,
    Bioschemas,
    Galaxy,
}

impl Source {
    pub const ALL: [Source; 5] = [
        Source::Bioconda,
        Source::Biocontainers,
        Source::Biotools,
        Source::Bioschemas,
        Source::Galaxy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Bioconda => "bioconda",
            Source::Biocontainers => "biocontainers",
            Source::Biotools => "biotools",
            Source::Bioschemas => "bioschemas",
            Source::Galaxy => "galaxy",
        }
    }

    /// Filename this source uses inside a tool's folder.
    pub fn file_name(&self, tool_name: &str) -> String {
        match self {
            Source::Bioconda => format!("bioconda_{tool_name}.yaml"),
            Source::Biocontainers => format!("{tool_name}.biocontainers.yaml"),
            Source::Biotools => format!("{tool_name}.biotools.json"),
            Source::Bioschemas => format!("{tool_name}.bioschemas.jsonld"),
            Source::Galaxy => format!("{tool_name}.galaxy.json"),
        }
    }

    /// Namespaced metadata key, `<source>__<field>`.
    pub fn metadata_key(&self, field: &str) -> String {
        format!("{}__{field}", self.as_str())
    }
}

/// Key order in `fetched_metadata` determines artifact byte layout, so the
/// map must stay ordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSummary {
    pub tool_name: String,
    #[serde(default)]
    pub contents: BTreeSet<Source>,
    #[serde(default)]
    pub fetched_metadata: BTreeMap<String, Value>,
}

/// Full per-tool record backing the detail view, keyed like the summary but
/// over the richer page mapping table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolPage {
    pub tool_name: String,
    #[serde(default)]
    pub contents: BTreeSet<Source>,
    #[serde(default)]
    pub page_metadata: BTreeMap<String, Value>,
}

const DESCRIPTION_KEYS: [&str; 4] = [
    "bioconda__summary",
    "biotools__summary",
    "biocontainers__summary",
    "galaxy__summary",
];

const LICENSE_KEYS: [&str; 4] = [
    "bioconda__license",
    "biotools__license",
    "biocontainers__license",
    "bioschemas__license",
];

const TAG_KEYS: [&str; 2] = ["galaxy__edam_topics", "galaxy__toolshed_categories"];

impl ToolSummary {
    pub fn has_source(&self, source: Source) -> bool {
        self.contents.contains(&source)
    }

    /// First summary text across sources, bioconda before biotools before
    /// biocontainers before galaxy.
    pub fn description(&self) -> Option<&str> {
        self.first_str(&DESCRIPTION_KEYS)
    }

    pub fn license(&self) -> Option<&str> {
        self.first_str(&LICENSE_KEYS)
    }

    /// EDAM topics plus curator collection identifiers.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags = Vec::new();
        for key in TAG_KEYS {
            match self.fetched_metadata.get(key) {
                Some(Value::Array(items)) => {
                    tags.extend(items.iter().filter_map(Value::as_str));
                }
                Some(Value::String(tag)) => tags.push(tag.as_str()),
                _ => {}
            }
        }
        tags
    }

    pub fn created(&self) -> Option<&str> {
        self.str_field("biotools__addition_date")
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.str_field("biotools__last_update_date")
    }

    pub fn first_str(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| self.fetched_metadata.get(*key).and_then(Value::as_str))
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fetched_metadata.get(key).and_then(Value::as_str)
    }
}

impl ToolPage {
    pub fn first_str(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| self.page_metadata.get(*key).and_then(Value::as_str))
    }
}
