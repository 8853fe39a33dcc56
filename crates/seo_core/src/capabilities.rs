use async_trait::async_trait;
use crate::types::PageSpeed;
use crate::Result;

/// Headless browser capability: render a page and hand back its final DOM as HTML.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    fn name(&self) -> &str;

    /// Navigates to `url`, waits for article content to appear and returns the rendered HTML
    async fn render(&self, url: &str) -> Result<String>;
}

#[async_trait]
pub trait PerformanceProvider: Send + Sync {
    /// Audits `url`. A provider answer without audit data is `PageSpeed::NoData`, not an error
    async fn measure(&self, url: &str) -> Result<PageSpeed>;
}

/// Search capability used by batch runs to find article links.
#[async_trait]
pub trait LinkDiscovery: Send + Sync {
    async fn discover(&self) -> Result<Vec<String>>;
}
