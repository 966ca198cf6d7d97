use url::form_urlencoded;

use crate::filter::{Filters, SortKey};

/// The shareable-address parameters: the search string plus the discrete
/// filter and sort selections. Encoding and decoding round-trip, so
/// reloading an address reproduces the same view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub query: String,
    pub filters: Filters,
    pub sort: SortKey,
}

impl ViewState {
    /// Only non-default selections are emitted, keeping addresses short.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if !self.query.is_empty() {
            serializer.append_pair("q", &self.query);
        }
        if self.filters.bioconda {
            serializer.append_pair("bioconda", "1");
        }
        if self.filters.biocontainers {
            serializer.append_pair("biocontainers", "1");
        }
        if self.filters.galaxy {
            serializer.append_pair("galaxy", "1");
        }
        if let Some(license) = &self.filters.license {
            serializer.append_pair("license", license);
        }
        if self.filters.favorites_only {
            serializer.append_pair("favorites", "1");
        }
        if self.sort != SortKey::default() {
            serializer.append_pair("sort", self.sort.as_str());
        }

        serializer.finish()
    }

    /// Unknown parameters are ignored; absent ones fall back to defaults.
    pub fn from_query_string(raw: &str) -> Self {
        let mut state = Self::default();

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "q" => state.query = value.into_owned(),
                "bioconda" => state.filters.bioconda = flag(&value),
                "biocontainers" => state.filters.biocontainers = flag(&value),
                "galaxy" => state.filters.galaxy = flag(&value),
                "license" => state.filters.license = Some(value.into_owned()),
                "favorites" => state.filters.favorites_only = flag(&value),
                "sort" => {
                    if let Some(sort) = SortKey::parse(&value) {
                        state.sort = sort;
                    }
                }
                _ => {}
            }
        }

        state
    }
}

fn flag(value: &str) -> bool {
    matches!(value, "1" | "true")
}
