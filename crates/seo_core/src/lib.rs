pub mod capabilities;
pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use capabilities::{LinkDiscovery, PageRenderer, PerformanceProvider};
pub use error::{Error, Result};
pub use models::CompletionModel;
pub use storage::ReportStore;
pub use types::{
    Artifact, ArticleContent, CategoryScore, CoreWebVitals, PageSpeed, PerformanceMetrics,
    PerformanceTimings, Report, SeoEvaluation, ANALYSIS_FAILED, NOT_AVAILABLE,
};

/// Validates that `raw` is an absolute http(s) URL.
pub fn parse_http_url(raw: &str) -> Result<url::Url> {
    let url = url::Url::parse(raw.trim()).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::InvalidUrl(format!("unsupported scheme '{}' in {}", scheme, raw))),
    }
}
