//! Upstream source traits and implementations for metadata and citations.

pub mod crossref;
pub mod mock;
pub mod semantic_scholar;

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

/// Queries the metadata provider for one bounded venue-year page of records.
pub trait MetadataSource: Send + Sync {
    /// The canonical name of this source (e.g., "CrossRef").
    fn name(&self) -> &str;

    /// Fetch the raw record list for `container_title` restricted to `year`.
    fn query<'a>(
        &'a self,
        container_title: &'a str,
        year: i32,
        client: &'a reqwest::Client,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Value>, String>> + Send + 'a>>;
}

/// Looks up the citation document for a single paper identifier.
pub trait CitationSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the raw citation document for `paper_id` (e.g. `doi:10.1145/...`).
    /// Provider-level error markers are returned as documents, not as `Err`;
    /// `Err` is reserved for transport failures.
    fn lookup<'a>(
        &'a self,
        paper_id: &'a str,
        client: &'a reqwest::Client,
    ) -> Pin<Box<dyn Future<Output = Result<Value, String>> + Send + 'a>>;
}
