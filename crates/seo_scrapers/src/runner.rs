use std::path::PathBuf;
use std::sync::Arc;
use seo_core::{PageSpeed, PerformanceProvider, Report, ReportStore, Result};
use seo_inference::SeoEvaluator;
use crate::extractor::PageExtractor;
use crate::logging::Logger;
use crate::source::{ResolvedUrls, UrlSource};

/// A batch URL that produced no report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUrl {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub artifact: PathBuf,
    pub reports: usize,
    /// Reports whose evaluation or performance audit fell back to defaults
    pub degraded: usize,
    pub skipped: Vec<SkippedUrl>,
}

/// Drives extraction, evaluation, enrichment and persistence for each URL.
pub struct PipelineRunner {
    extractor: PageExtractor,
    evaluator: SeoEvaluator,
    enricher: Arc<dyn PerformanceProvider>,
    store: Arc<dyn ReportStore>,
}

impl PipelineRunner {
    pub fn new(
        extractor: PageExtractor,
        evaluator: SeoEvaluator,
        enricher: Arc<dyn PerformanceProvider>,
        store: Arc<dyn ReportStore>,
    ) -> Self {
        Self {
            extractor,
            evaluator,
            enricher,
            store,
        }
    }

    pub fn store(&self) -> Arc<dyn ReportStore> {
        self.store.clone()
    }

    /// Builds the report for one URL. Only extraction errors propagate.
    pub async fn analyze(&self, url: &str, logger: &Logger) -> Result<Report> {
        let content = self.extractor.extract(url).await?;

        let evaluation = self.evaluator.evaluate_or_degraded(&content).await;
        match evaluation.score {
            Some(score) => logger.info(&format!("✨ SEO score: {:.1}", score)),
            None => logger.warn("⚠️ SEO evaluation degraded"),
        }

        logger.debug("📊 Requesting PageSpeed audit");
        let page_speed = match self.enricher.measure(&content.url).await {
            Ok(page_speed) => page_speed,
            Err(e) => {
                logger.warn(&format!("⚠️ PageSpeed audit failed: {}", e));
                PageSpeed::no_data()
            }
        };

        Ok(Report::assemble(content, evaluation, page_speed))
    }

    pub async fn run(&self, source: UrlSource) -> Result<RunOutcome> {
        match source.resolve().await? {
            ResolvedUrls::Single(url) => {
                let logger = Logger::new().with_prefix(url.clone());
                let report = self.analyze(&url, &logger).await?;
                let artifact = self.store.save_report(&report).await?;
                Ok(RunOutcome {
                    artifact,
                    reports: 1,
                    degraded: usize::from(report.is_degraded()),
                    skipped: Vec::new(),
                })
            }
            ResolvedUrls::Batch(urls) => self.run_batch(urls).await,
        }
    }

    async fn run_batch(&self, urls: Vec<String>) -> Result<RunOutcome> {
        let total = urls.len();
        let mut reports = Vec::with_capacity(total);
        let mut skipped = Vec::new();

        for (i, url) in urls.into_iter().enumerate() {
            let logger = Logger::new()
                .with_prefix(format!("[{}/{}]", i + 1, total))
                .with_prefix(url.clone());
            logger.info("🔍 Analyzing");
            match self.analyze(&url, &logger).await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    logger.error(&format!("❌ Skipped: {}", e));
                    skipped.push(SkippedUrl {
                        url,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let artifact = self.store.save_batch(&reports).await?;
        Ok(RunOutcome {
            artifact,
            reports: reports.len(),
            degraded: reports.iter().filter(|r| r.is_degraded()).count(),
            skipped,
        })
    }
}
