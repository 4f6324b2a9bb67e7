//! Venue metadata fetching: query, filter, validate, cache.

use std::sync::Arc;

use serde_json::Value;

use crate::source::MetadataSource;
use crate::store::{CacheStore, StoreError};
use crate::venue::Venue;
use crate::{CoreError, Paper};

/// Substrings marking non-matching tracks (workshop companions, ESEM, page
/// breakers); records whose container title contains one are dropped.
const EXCLUDED_MARKERS: [&str; 3] = ["companion", "measurement", "breaker page"];

pub struct MetadataFetcher {
    store: Arc<dyn CacheStore>,
    source: Arc<dyn MetadataSource>,
    client: reqwest::Client,
}

impl MetadataFetcher {
    pub fn new(
        store: Arc<dyn CacheStore>,
        source: Arc<dyn MetadataSource>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            store,
            source,
            client,
        }
    }

    /// Cache key for one (venue, year) unit of work.
    fn cache_key(container_title: &str, year: i32) -> String {
        format!("{}_{}", container_title, year)
    }

    /// Fetch the paper stubs for `venue` in `year`.
    ///
    /// A cached non-empty list is returned as-is, without re-validation. An
    /// empty result is cached too but does not count as a hit, so the query
    /// is retried on a later run.
    pub async fn fetch_papers(&self, venue: Venue, year: i32) -> Result<Vec<Paper>, CoreError> {
        let container_title = venue.container_title(year);
        let key = Self::cache_key(container_title, year);

        if let Some(doc) = self.store.get(&key)? {
            let cached: Vec<Paper> = serde_json::from_value(doc).map_err(StoreError::from)?;
            if !cached.is_empty() {
                tracing::trace!(venue = container_title, year, "metadata cache hit");
                return Ok(cached);
            }
        }

        let items = self
            .source
            .query(container_title, year, &self.client)
            .await
            .map_err(|message| CoreError::Source {
                source_name: self.source.name().to_string(),
                message,
            })?;

        let papers = select_venue_papers(&items, container_title, year)?;

        self.store.put(
            &key,
            &serde_json::to_value(&papers).map_err(StoreError::from)?,
        )?;
        tracing::info!(
            venue = container_title,
            year,
            papers = papers.len(),
            "metadata fetched"
        );
        Ok(papers)
    }
}

/// Strip a trailing parenthetical qualifier and surrounding whitespace.
fn normalize_container_title(raw: &str) -> &str {
    raw.split('(').next().unwrap_or("").trim()
}

/// Venue filter for a single record. Returns the normalized container title
/// when the record belongs to a venue matching `container_title`.
fn accept_record<'a>(item: &'a Value, container_title: &str) -> Option<&'a str> {
    if item.get("title").is_none() || item.get("DOI").is_none() {
        return None;
    }
    let raw = item["container-title"]
        .as_array()
        .and_then(|a| a.first())
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let normalized = normalize_container_title(raw);
    let lower = normalized.to_lowercase();

    // Suffix match is deliberately permissive to venue-name prefixes
    // ("IEEE Transactions on ...").
    if !lower.ends_with(&container_title.to_lowercase()) {
        return None;
    }
    // The bare phrase with no venue qualifier matches nothing real.
    if lower == "software engineering" {
        return None;
    }
    if EXCLUDED_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return None;
    }
    Some(normalized)
}

/// Year-consistency check. A record whose declared year contradicts the
/// requested year is fatal for the run, never silently accepted.
fn validate_year(item: &Value, container_title: &str, year: i32) -> Result<(), CoreError> {
    let declared = |field: &str| item[field]["date-parts"][0][0].as_i64().map(|y| y as i32);
    let found = match item["type"].as_str() {
        Some("proceedings-article") => declared("published"),
        Some("journal-article") => declared("issued"),
        _ => None,
    };
    if let Some(found) = found
        && found != year
    {
        return Err(CoreError::YearMismatch {
            venue: container_title.to_string(),
            year,
            doi: item["DOI"].as_str().unwrap_or("").to_string(),
            found,
        });
    }
    Ok(())
}

fn build_stub(item: &Value, venue: &str, year: i32) -> Paper {
    let authors = item["author"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .map(|a| {
                    let given = a["given"].as_str().unwrap_or("");
                    let family = a["family"].as_str().unwrap_or("");
                    format!("{} {}", given, family).trim().to_string()
                })
                .collect()
        })
        .unwrap_or_default();

    Paper {
        title: item["title"]
            .as_array()
            .and_then(|a| a.first())
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
        authors,
        doi: item["DOI"].as_str().unwrap_or("").to_string(),
        venue: venue.to_string(),
        citations: None,
        year,
    }
}

/// Select the records belonging to the target venue.
///
/// Accepted records are grouped by normalized container title in first-seen
/// order and the first group is taken; later groups belong to a different
/// sub-publication of the same query. Year validation runs on every accepted
/// record, selected group or not.
fn select_venue_papers(
    items: &[Value],
    container_title: &str,
    year: i32,
) -> Result<Vec<Paper>, CoreError> {
    let mut groups: Vec<(String, Vec<Paper>)> = Vec::new();
    for item in items {
        let Some(normalized) = accept_record(item, container_title) else {
            continue;
        };
        validate_year(item, container_title, year)?;
        let paper = build_stub(item, normalized, year);
        match groups.iter_mut().find(|(title, _)| title.as_str() == normalized) {
            Some((_, papers)) => papers.push(paper),
            None => groups.push((normalized.to_string(), vec![paper])),
        }
    }
    Ok(groups
        .into_iter()
        .next()
        .map(|(_, papers)| papers)
        .unwrap_or_default())
}
