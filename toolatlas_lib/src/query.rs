//! Search-string evaluation over the in-memory tool collection.
//!
//! A query is a whitespace-separated list of terms, all of which a tool must
//! satisfy. `tag:'<value>'` matches the tag set exactly, `tag:*` requires a
//! non-empty tag set, and anything else is a case-insensitive substring
//! probe against name, tags, then description.

use crate::{
    catalog::ToolSummary,
    filter::{self, SortKey},
};

const TAG_PREFIX: &str = "tag:'";
const TAG_WILDCARD: &str = "tag:*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Exact (case-insensitive) tag membership.
    Tag(String),
    /// At least one tag present.
    AnyTag,
    /// Substring match against name, tags, description.
    Text(String),
}

/// Split a raw search string into terms. Tag values may contain spaces, so a
/// `tag:'` token keeps consuming tokens until the closing quote; a quote
/// that never closes degrades the whole run into a literal free-text term.
pub fn parse(raw: &str) -> Vec<Term> {
    let mut terms = Vec::new();
    let mut tokens = raw.split_whitespace();

    while let Some(token) = tokens.next() {
        if token == TAG_WILDCARD {
            terms.push(Term::AnyTag);
            continue;
        }

        if let Some(rest) = token.strip_prefix(TAG_PREFIX) {
            let mut value = rest.to_string();
            let mut closed = value.ends_with('\'');
            while !closed {
                let Some(next) = tokens.next() else { break };
                value.push(' ');
                value.push_str(next);
                closed = next.ends_with('\'');
            }

            if closed {
                value.pop();
                terms.push(Term::Tag(value));
            } else {
                terms.push(Term::Text(format!("{TAG_PREFIX}{value}")));
            }
            continue;
        }

        terms.push(Term::Text(token.to_string()));
    }

    terms
}

/// Evaluate a raw query and return matching tools ranked by relevance:
/// ascending match tier (name before tag before description), ties broken by
/// the active sort criterion.
pub fn search<'a>(tools: &'a [ToolSummary], raw: &str, sort: SortKey) -> Vec<&'a ToolSummary> {
    let terms = parse(raw);

    let mut matched: Vec<(u8, &ToolSummary)> = tools
        .iter()
        .filter_map(|tool| evaluate(tool, &terms).map(|tier| (tier, tool)))
        .collect();

    matched.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| filter::compare(a.1, b.1, sort)));
    matched.into_iter().map(|(_, tool)| tool).collect()
}

const TIER_NAME: u8 = 0;
const TIER_TAG: u8 = 1;
const TIER_DESCRIPTION: u8 = 2;

/// Best (lowest) tier across the query's free-text terms, or `None` when the
/// tool fails any term. A query without free-text terms leaves every matched
/// tool on one shared tier.
fn evaluate(tool: &ToolSummary, terms: &[Term]) -> Option<u8> {
    let mut best_tier = u8::MAX;

    for term in terms {
        match term {
            Term::AnyTag => {
                if tool.tags().is_empty() {
                    return None;
                }
            }
            Term::Tag(value) => {
                let value = value.to_lowercase();
                if !tool.tags().iter().any(|tag| tag.to_lowercase() == value) {
                    return None;
                }
            }
            Term::Text(text) => {
                let tier = text_match_tier(tool, &text.to_lowercase())?;
                best_tier = best_tier.min(tier);
            }
        }
    }

    Some(best_tier)
}

fn text_match_tier(tool: &ToolSummary, needle: &str) -> Option<u8> {
    if tool.tool_name.to_lowercase().contains(needle) {
        return Some(TIER_NAME);
    }
    if tool
        .tags()
        .iter()
        .any(|tag| tag.to_lowercase().contains(needle))
    {
        return Some(TIER_TAG);
    }
    if tool
        .description()
        .is_some_and(|description| description.to_lowercase().contains(needle))
    {
        return Some(TIER_DESCRIPTION);
    }
    None
}
