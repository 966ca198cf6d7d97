use std::cmp::Ordering;

use crate::{
    catalog::{Source, ToolSummary},
    favorites::FavoritesStore,
};

/// Active filter toggles. Categories AND together; `license` is
/// single-select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub bioconda: bool,
    pub biocontainers: bool,
    pub galaxy: bool,
    pub license: Option<String>,
    pub favorites_only: bool,
}

impl Filters {
    pub fn matches(&self, tool: &ToolSummary, favorites: &dyn FavoritesStore) -> bool {
        if self.bioconda && !tool.has_source(Source::Bioconda) {
            return false;
        }
        if self.biocontainers && !tool.has_source(Source::Biocontainers) {
            return false;
        }
        if self.galaxy && !tool.has_source(Source::Galaxy) {
            return false;
        }
        if let Some(license) = &self.license
            && !tool
                .license()
                .is_some_and(|value| value.eq_ignore_ascii_case(license))
        {
            return false;
        }
        if self.favorites_only && !favorites.has(&tool.tool_name) {
            return false;
        }
        true
    }
}

/// Keep the tools satisfying every active toggle, preserving input order.
pub fn apply<'a>(
    tools: &[&'a ToolSummary],
    filters: &Filters,
    favorites: &dyn FavoritesStore,
) -> Vec<&'a ToolSummary> {
    tools
        .iter()
        .copied()
        .filter(|tool| filters.matches(tool, favorites))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    Created,
    Updated,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Created => "created",
            SortKey::Updated => "updated",
        }
    }

    pub fn parse(raw: &str) -> Option<SortKey> {
        match raw.to_ascii_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "created" => Some(SortKey::Created),
            "updated" => Some(SortKey::Updated),
            _ => None,
        }
    }
}

/// Total order under the given key: ascending, missing dates last, name as
/// the final tie-break.
pub fn compare(a: &ToolSummary, b: &ToolSummary, key: SortKey) -> Ordering {
    let by_key = match key {
        SortKey::Name => Ordering::Equal,
        SortKey::Created => compare_dates(a.created(), b.created()),
        SortKey::Updated => compare_dates(a.last_updated(), b.last_updated()),
    };
    by_key.then_with(|| a.tool_name.cmp(&b.tool_name))
}

pub fn sort(tools: &mut [&ToolSummary], key: SortKey) {
    tools.sort_by(|a, b| compare(a, b, key));
}

/// The date strings are ISO-8601, so lexicographic order is chronological.
fn compare_dates(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
