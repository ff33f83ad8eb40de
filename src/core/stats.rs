//! Aggregation - grouped counts and derived metrics over the raw hit sequence

use crate::core::hit::Hit;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Grouped analytics computed on demand from the full hit list.
///
/// The count maps are kept as ordered pairs so the JSON output renders
/// highest-count-first, ties in first-occurrence order.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    #[serde(serialize_with = "pairs_as_map")]
    pub top_urls: Vec<(String, u64)>,
    #[serde(serialize_with = "pairs_as_map")]
    pub top_referrers: Vec<(String, u64)>,
    #[serde(serialize_with = "pairs_as_map")]
    pub browser_distribution: Vec<(String, u64)>,
    pub unique_urls: usize,
    pub unique_referrers: usize,
    pub direct_traffic: usize,
}

fn pairs_as_map<S: Serializer>(pairs: &[(String, u64)], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (key, count) in pairs {
        map.serialize_entry(key, count)?;
    }
    map.end()
}

/// Count occurrences per key, sorted descending by count.
///
/// The sort is stable over first-occurrence order, which defines the
/// tie-break for equal counts.
fn count_by<I>(keys: I) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for key in keys {
        match counts.entry(key) {
            Entry::Vacant(e) => {
                order.push(e.key().clone());
                e.insert(1);
            }
            Entry::Occupied(mut e) => *e.get_mut() += 1,
        }
    }

    let mut pairs: Vec<(String, u64)> = order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            (key, count)
        })
        .collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs
}

/// Classify a raw user-agent string into a browser family.
///
/// Case-insensitive substring matching. The `edg` token disqualifies both
/// Chrome and Safari, since Edge user agents carry all three tokens.
pub fn classify_browser(user_agent: &str) -> &'static str {
    let ua = user_agent.to_lowercase();

    if ua.contains("chrome") && !ua.contains("edg") {
        "Chrome"
    } else if ua.contains("firefox") {
        "Firefox"
    } else if ua.contains("safari") && !ua.contains("chrome") && !ua.contains("edg") {
        "Safari"
    } else if ua.contains("edg") {
        "Edge"
    } else if ua.contains("opera") || ua.contains("opr") {
        "Opera"
    } else {
        "Unknown"
    }
}

fn is_direct(hit: &Hit) -> bool {
    hit.referrer.trim().is_empty()
}

/// Single pass over the stored hits: grouped counts plus derived metrics.
pub fn compute(hits: &[Hit]) -> Analytics {
    let top_urls = count_by(hits.iter().map(|h| h.url.clone()));
    let top_referrers = count_by(
        hits.iter()
            .filter(|h| !is_direct(h))
            .map(|h| h.referrer.clone()),
    );
    let browser_distribution =
        count_by(hits.iter().map(|h| classify_browser(&h.user_agent).to_string()));

    Analytics {
        unique_urls: top_urls.len(),
        unique_referrers: top_referrers.len(),
        direct_traffic: hits.iter().filter(|h| is_direct(h)).count(),
        top_urls,
        top_referrers,
        browser_distribution,
    }
}
