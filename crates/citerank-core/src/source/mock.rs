//! Mock sources for testing the fetch pipeline without HTTP.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use super::{CitationSource, MetadataSource};

/// A canned metadata source returning a fixed record list, counting calls.
///
/// The records are returned for every query; venue filtering happens in the
/// fetcher, so one record set can serve several venue queries in a test.
pub struct MockMetadata {
    records: Vec<Value>,
    calls: AtomicUsize,
}

impl MockMetadata {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `query()` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MetadataSource for MockMetadata {
    fn name(&self) -> &str {
        "MockMetadata"
    }

    fn query<'a>(
        &'a self,
        _container_title: &'a str,
        _year: i32,
        _client: &'a reqwest::Client,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Value>, String>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let records = self.records.clone();
        Box::pin(async move { Ok(records) })
    }
}

/// A canned citation source with per-id responses and a default,
/// counting calls.
pub struct MockCitations {
    by_id: HashMap<String, Value>,
    /// `Err` simulates a transport failure for every unmatched id.
    default: Result<Value, String>,
    calls: AtomicUsize,
}

impl MockCitations {
    /// Every lookup answers with `default` unless overridden per id.
    pub fn new(default: Value) -> Self {
        Self {
            by_id: HashMap::new(),
            default: Ok(default),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every unmatched lookup fails at the transport level.
    pub fn failing(message: &str) -> Self {
        Self {
            by_id: HashMap::new(),
            default: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_response(mut self, paper_id: &str, document: Value) -> Self {
        self.by_id.insert(paper_id.to_string(), document);
        self
    }

    /// How many times `lookup()` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CitationSource for MockCitations {
    fn name(&self) -> &str {
        "MockCitations"
    }

    fn lookup<'a>(
        &'a self,
        paper_id: &'a str,
        _client: &'a reqwest::Client,
    ) -> Pin<Box<dyn Future<Output = Result<Value, String>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = match self.by_id.get(paper_id) {
            Some(doc) => Ok(doc.clone()),
            None => self.default.clone(),
        };
        Box::pin(async move { response })
    }
}
