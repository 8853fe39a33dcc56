use std::sync::Arc;
use scraper::Html;
use tracing::info;
use seo_core::{parse_http_url, ArticleContent, Error, PageRenderer, Result};
use crate::browser::CONTENT_SELECTOR;

/// Pulls title, subheadings and body text out of rendered article pages.
pub struct PageExtractor {
    renderer: Arc<dyn PageRenderer>,
}

impl PageExtractor {
    pub fn new(renderer: Arc<dyn PageRenderer>) -> Self {
        Self { renderer }
    }

    pub async fn extract(&self, url: &str) -> Result<ArticleContent> {
        let url = url.trim();
        parse_http_url(url)?;

        info!("🌐 Rendering {} with {}", url, self.renderer.name());
        let html = self.renderer.render(url).await?;
        let content = parse_article(url, &html)?;
        info!(
            "📰 Extracted \"{}\" ({} subheadings, {} chars of text)",
            content.title,
            content.subheadings.len(),
            content.body.chars().count()
        );
        Ok(content)
    }
}

/// Reads article text from a rendered document.
///
/// The title is the first `h1` (empty when there is none), subheadings are the
/// non-empty `h2`/`h3` texts in document order and the body is every non-empty
/// `p` joined by a blank line. A document with no `article`, `h1` or `p` at all
/// is not an article page and yields [`Error::Extraction`].
pub fn parse_article(url: &str, html: &str) -> Result<ArticleContent> {
    let document = Html::parse_document(html);

    if utils::extract_texts(&document, CONTENT_SELECTOR)?.is_empty() {
        return Err(Error::Extraction(format!("no article, h1 or p element found at {}", url)));
    }

    let title = utils::extract_text(&document, "h1")?.unwrap_or_default();
    let subheadings = utils::extract_texts(&document, "h2, h3")?
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    let body = utils::extract_texts(&document, "p")?
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(ArticleContent {
        url: url.to_string(),
        title,
        subheadings,
        body,
    })
}

pub(crate) mod utils {
    use super::*;
    use scraper::Selector;

    fn selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector).map_err(|e| Error::Extraction(format!("Invalid selector {}: {}", selector, e)))
    }

    /// Trimmed text of the first element matching `selector`.
    pub fn extract_text(document: &Html, selector: &str) -> Result<Option<String>> {
        let selector = self::selector(selector)?;
        Ok(document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string()))
    }

    /// Trimmed texts of every element matching `selector`, in document order.
    pub fn extract_texts(document: &Html, selector: &str) -> Result<Vec<String>> {
        let selector = self::selector(selector)?;
        Ok(document
            .select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .collect())
    }
}
