use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use seo_core::{parse_http_url, Error, LinkDiscovery, Result};

pub const DEFAULT_HANDOFF_FILE: &str = "input_url.txt";

/// Where a run gets its article URLs from.
#[derive(Clone)]
pub enum UrlSource {
    Single(String),
    /// File holding exactly one URL, written by whoever triggered the run
    HandoffFile(PathBuf),
    /// One URL per line; blank lines and `#` comments are skipped
    ListFile(PathBuf),
    Discovered(Arc<dyn LinkDiscovery>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedUrls {
    Single(String),
    Batch(Vec<String>),
}

impl UrlSource {
    pub async fn resolve(&self) -> Result<ResolvedUrls> {
        match self {
            UrlSource::Single(url) => {
                parse_http_url(url)?;
                Ok(ResolvedUrls::Single(url.trim().to_string()))
            }
            UrlSource::HandoffFile(path) => Ok(ResolvedUrls::Single(read_handoff(path).await?)),
            UrlSource::ListFile(path) => {
                let urls = read_url_list(path).await?;
                if urls.is_empty() {
                    return Err(Error::MissingInput(format!("no URLs listed in {}", path.display())));
                }
                Ok(ResolvedUrls::Batch(urls))
            }
            UrlSource::Discovered(discovery) => {
                let urls = discovery.discover().await?;
                if urls.is_empty() {
                    return Err(Error::Discovery("search returned no article links".to_string()));
                }
                info!("🔎 Found {} article links", urls.len());
                Ok(ResolvedUrls::Batch(urls))
            }
        }
    }
}

async fn read_input(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::MissingInput(format!("{} not found", path.display())))
        }
        Err(e) => Err(e.into()),
    }
}

/// Reads and validates the URL in the handoff file.
pub async fn read_handoff(path: &Path) -> Result<String> {
    let contents = read_input(path).await?;
    let url = contents.trim();
    if url.is_empty() {
        return Err(Error::MissingInput(format!("no URL found in {}", path.display())));
    }
    parse_http_url(url)?;
    Ok(url.to_string())
}

pub async fn write_handoff(path: &Path, url: &str) -> Result<()> {
    parse_http_url(url)?;
    tokio::fs::write(path, url.trim()).await?;
    Ok(())
}

pub async fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let contents = read_input(path).await?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
