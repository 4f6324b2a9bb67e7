use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod citations;
pub mod config_file;
pub mod metadata;
pub mod orchestrator;
pub mod rank;
pub mod source;
pub mod store;
pub mod venue;

// Re-export for convenience
pub use citations::{CitationFetcher, paper_id};
pub use metadata::MetadataFetcher;
pub use orchestrator::{Orchestrator, UnitSummary};
pub use rank::{artifact_name, rank};
pub use store::{CacheStore, JsonDirStore, MemoryStore, StoreError};
pub use venue::Venue;

/// One paper as assembled from the metadata source.
///
/// `citations` is `None` on a freshly fetched stub and is populated by the
/// citation fetcher before ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    pub authors: Vec<String>,
    pub doi: String,
    /// The literal container title the record carried (normalized).
    pub venue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<Citation>,
    pub year: i32,
}

/// Citation record embedded into a [`Paper`].
///
/// Provider extras (embeddings) never reach this type; they are stripped from
/// the cached document before the projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(rename = "citationCount")]
    pub citation_count: u64,
    pub source: String,
}

/// A ranked paper inside a persisted ranking artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    pub rank: usize,
    pub paper: Paper,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{source_name} query failed: {message}")]
    Source { source_name: String, message: String },
    #[error("{venue} {year}: record {doi} is dated {found}, expected {year}")]
    YearMismatch {
        venue: String,
        year: i32,
        doi: String,
        found: i32,
    },
    #[error("no papers found for {venue} {year}")]
    EmptyVenue { venue: String, year: i32 },
}

/// Pipeline configuration, resolved by the caller
/// (CLI flags > environment > config file > defaults).
#[derive(Clone)]
pub struct Config {
    pub s2_api_key: Option<String>,
    pub crossref_mailto: Option<String>,
    /// Root of the durable cache; the three namespaces live below it.
    pub cache_dir: PathBuf,
    pub from_year: i32,
    pub until_year: i32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("s2_api_key", &self.s2_api_key.as_ref().map(|_| "***"))
            .field(
                "crossref_mailto",
                &self.crossref_mailto.as_ref().map(|_| "***"),
            )
            .field("cache_dir", &self.cache_dir)
            .field("from_year", &self.from_year)
            .field("until_year", &self.until_year)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            s2_api_key: None,
            crossref_mailto: None,
            cache_dir: PathBuf::from("cache"),
            from_year: 2013,
            until_year: 2023,
        }
    }
}

/// Build the full pipeline against the on-disk cache layout
/// (`crossref/`, `citations/`, `ranks/` under `cache_dir`).
pub fn build_pipeline(config: &Config) -> Result<Orchestrator, CoreError> {
    let client = reqwest::Client::new();
    let metadata_store = Arc::new(JsonDirStore::open(config.cache_dir.join("crossref"))?);
    let citation_store = Arc::new(JsonDirStore::open(config.cache_dir.join("citations"))?);
    let rank_store = Arc::new(JsonDirStore::open(config.cache_dir.join("ranks"))?);

    let metadata = MetadataFetcher::new(
        metadata_store,
        Arc::new(source::crossref::CrossRef {
            mailto: config.crossref_mailto.clone(),
        }),
        client.clone(),
    );
    let citations = CitationFetcher::new(
        citation_store,
        Arc::new(source::semantic_scholar::SemanticScholar {
            api_key: config.s2_api_key.clone(),
        }),
        client,
    );
    Ok(Orchestrator::new(metadata, citations, rank_store))
}

#[cfg(test)]
mod build_pipeline_tests {
    use super::*;

    #[test]
    fn creates_cache_namespaces() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            cache_dir: dir.path().join("cache"),
            ..Config::default()
        };
        build_pipeline(&config).unwrap();
        assert!(config.cache_dir.join("crossref").is_dir());
        assert!(config.cache_dir.join("citations").is_dir());
        assert!(config.cache_dir.join("ranks").is_dir());
    }

    #[test]
    fn debug_masks_credentials() {
        let config = Config {
            s2_api_key: Some("secret".into()),
            crossref_mailto: Some("me@example.org".into()),
            ..Config::default()
        };
        let repr = format!("{:?}", config);
        assert!(!repr.contains("secret"));
        assert!(!repr.contains("me@example.org"));
    }
}
