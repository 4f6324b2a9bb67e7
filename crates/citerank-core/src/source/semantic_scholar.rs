use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use super::CitationSource;

pub struct SemanticScholar {
    pub api_key: Option<String>,
}

impl CitationSource for SemanticScholar {
    fn name(&self) -> &str {
        "Semantic Scholar"
    }

    fn lookup<'a>(
        &'a self,
        paper_id: &'a str,
        client: &'a reqwest::Client,
    ) -> Pin<Box<dyn Future<Output = Result<Value, String>> + Send + 'a>> {
        Box::pin(async move {
            // The id keeps its raw form ("doi:" prefix, slashes) in the path.
            let url = format!(
                "https://api.semanticscholar.org/graph/v1/paper/{}?fields=citationCount,embedding,embedding.specter_v2",
                paper_id
            );

            let mut req = client.get(&url).header("User-Agent", "citerank/0.1");
            if let Some(ref key) = self.api_key {
                req = req.header("x-api-key", key);
            }

            let resp = req.send().await.map_err(|e| e.to_string())?;

            // Status is deliberately not checked: error responses still carry
            // a JSON body with an `error` field, which the fetcher maps to a
            // zero count. Only transport failures surface as `Err`.
            resp.json::<Value>().await.map_err(|e| e.to_string())
        })
    }
}
