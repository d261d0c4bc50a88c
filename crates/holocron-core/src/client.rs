use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::search::SearchResult;

/// Path used when the host does not configure an endpoint.
pub const DEFAULT_ENDPOINT: &str = "/chatbot/search/";

#[derive(Clone, Debug)]
pub struct SearchClient {
    client: Client,
    base_url: Url,
}

impl SearchClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    /// Resolves an endpoint against the base URL. Absolute endpoints win.
    pub fn resolve(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint)?)
    }

    /// `GET {endpoint}?q={query}`.
    ///
    /// The status is checked before the body is read, so a non-success
    /// response is `Rejected` even when its body is not JSON. Transport
    /// failures and unparseable 2xx bodies are errors.
    pub async fn search(&self, endpoint: &Url, query: &str) -> Result<SearchResult> {
        let response = self
            .client
            .get(endpoint.clone())
            .query(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "search endpoint rejected query");
            return Ok(SearchResult::Rejected);
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        Ok(SearchResult::classify(true, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_endpoint() {
        let client = SearchClient::new("http://127.0.0.1:8000").unwrap();
        assert_eq!(
            client.resolve(DEFAULT_ENDPOINT).unwrap().as_str(),
            "http://127.0.0.1:8000/chatbot/search/"
        );
    }

    #[test]
    fn test_resolve_absolute_endpoint() {
        let client = SearchClient::new("http://127.0.0.1:8000").unwrap();
        assert_eq!(
            client.resolve("https://holocron.example/api/search").unwrap().as_str(),
            "https://holocron.example/api/search"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(SearchClient::new("not a url").is_err());
    }
}
