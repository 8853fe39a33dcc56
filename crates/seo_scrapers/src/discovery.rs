use std::fmt;
use std::time::Duration;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;
use seo_core::{Error, LinkDiscovery, Result};

pub const SERPER_ENDPOINT: &str = "https://google.serper.dev/search";
pub const DEFAULT_SITE: &str = "https://conteudos.xpi.com.br";

#[derive(Clone)]
pub struct DiscoveryConfig {
    pub api_key: String,
    /// Search query; defaults to `site:<host of site_prefix>`
    pub query: Option<String>,
    /// Only links starting with this prefix are kept
    pub site_prefix: String,
    pub limit: usize,
    pub endpoint: String,
    pub timeout: Duration,
}

impl fmt::Debug for DiscoveryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryConfig")
            .field("api_key", &"<redacted>")
            .field("query", &self.query)
            .field("site_prefix", &self.site_prefix)
            .field("limit", &self.limit)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl DiscoveryConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            query: None,
            site_prefix: DEFAULT_SITE.to_string(),
            limit: 10,
            endpoint: SERPER_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn effective_query(&self) -> String {
        if let Some(query) = &self.query {
            return query.clone();
        }
        let host = Url::parse(&self.site_prefix)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()))
            .unwrap_or_else(|| self.site_prefix.clone());
        format!("site:{}", host)
    }
}

#[derive(Debug, Serialize)]
struct SerperRequest {
    q: String,
    num: usize,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperResult>,
}

#[derive(Debug, Deserialize)]
struct SerperResult {
    link: String,
}

/// Finds article links through the Serper Google search API.
pub struct SerperSearch {
    client: reqwest::Client,
    config: DiscoveryConfig,
}

impl SerperSearch {
    pub fn new(config: DiscoveryConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::Config("Serper API key is required for discovery".to_string()));
        }
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl LinkDiscovery for SerperSearch {
    async fn discover(&self) -> Result<Vec<String>> {
        let query = self.config.effective_query();
        info!("🔎 Searching for articles: {}", query);

        let request = SerperRequest {
            q: query,
            // Ask for extra results since some are filtered out.
            num: (self.config.limit * 2).max(10),
        };
        let response = self.client
            .post(&self.config.endpoint)
            .header("X-API-KEY", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Discovery(format!("search API error {}: {}", status, body)));
        }

        let results: SerperResponse = response.json().await?;
        debug!("Search returned {} organic results", results.organic.len());
        Ok(filter_links(
            results.organic.into_iter().map(|r| r.link),
            &self.config.site_prefix,
            self.config.limit,
        ))
    }
}

/// Keeps article links under `site_prefix`, without query or fragment,
/// deduplicated in first-seen order and capped at `limit`.
pub fn filter_links<I>(links: I, site_prefix: &str, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = Vec::new();
    for link in links {
        let Ok(mut url) = Url::parse(link.trim()) else {
            continue;
        };
        url.set_query(None);
        url.set_fragment(None);
        let link = url.to_string();

        let is_article = link.starts_with(site_prefix) && url.path().trim_matches('/').len() > 0;
        if is_article && !seen.contains(&link) {
            seen.push(link);
        }
        if seen.len() == limit {
            break;
        }
    }
    seen
}
