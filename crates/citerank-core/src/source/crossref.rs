use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use super::MetadataSource;

/// Bounded result-set size; records beyond this are silently dropped,
/// no further pages are requested.
pub const MAX_ROWS: usize = 1000;

pub struct CrossRef {
    /// Contact email for the Crossref polite pool.
    pub mailto: Option<String>,
}

impl MetadataSource for CrossRef {
    fn name(&self) -> &str {
        "CrossRef"
    }

    fn query<'a>(
        &'a self,
        container_title: &'a str,
        year: i32,
        client: &'a reqwest::Client,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Value>, String>> + Send + 'a>> {
        Box::pin(async move {
            let mut url = format!(
                "https://api.crossref.org/works?query.container-title={}&filter=from-issued-date:{},until-issued-date:{}&rows={}",
                urlencoding::encode(container_title),
                year,
                year,
                MAX_ROWS
            );

            let user_agent = if let Some(ref email) = self.mailto {
                url.push_str(&format!("&mailto={}", urlencoding::encode(email)));
                format!("citerank/0.1 (mailto:{})", email)
            } else {
                "citerank/0.1".to_string()
            };

            let resp = client
                .get(&url)
                .header("User-Agent", user_agent)
                .send()
                .await
                .map_err(|e| e.to_string())?;

            let status = resp.status();
            if !status.is_success() {
                return Err(format!("HTTP {}", status));
            }

            let data: Value = resp.json().await.map_err(|e| e.to_string())?;
            Ok(data["message"]["items"]
                .as_array()
                .cloned()
                .unwrap_or_default())
        })
    }
}
