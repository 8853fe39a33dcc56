use std::fmt;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};
use seo_core::{PageSpeed, PerformanceProvider, Result};

pub mod metrics;

pub use metrics::metrics_from_response;

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// Lighthouse categories requested on every audit.
pub const CATEGORIES: [&str; 4] = ["performance", "accessibility", "best-practices", "seo"];

#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub strategy: String,
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("strategy", &self.strategy)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            strategy: "desktop".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// PageSpeed Insights client.
pub struct PageSpeedClient {
    client: Client,
    config: Config,
}

impl PageSpeedClient {
    pub fn new(config: Config) -> Result<Self> {
        if config.api_key.is_none() {
            warn!("No PageSpeed API key configured; requests share the anonymous quota");
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn query(&self, url: &str) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("url", url.to_string()),
            ("strategy", self.config.strategy.clone()),
        ];
        if let Some(key) = &self.config.api_key {
            query.push(("key", key.clone()));
        }
        query.extend(CATEGORIES.iter().map(|c| ("category", c.to_string())));
        query
    }
}

#[async_trait]
impl PerformanceProvider for PageSpeedClient {
    async fn measure(&self, url: &str) -> Result<PageSpeed> {
        info!("⏱️ Querying PageSpeed metrics for {}", url);
        // Error bodies still carry JSON; without `lighthouseResult` they map to no data.
        let response: serde_json::Value = self.client
            .get(&self.config.endpoint)
            .query(&self.query(url))
            .send()
            .await?
            .json()
            .await?;

        let page_speed = metrics_from_response(&response);
        if page_speed.metrics().is_none() {
            warn!("⚠️ No PageSpeed data returned for {}", url);
        }
        Ok(page_speed)
    }
}
