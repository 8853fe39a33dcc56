use std::path::PathBuf;
use std::sync::Arc;
use clap::Subcommand;
use tracing::{info, warn};
use seo_core::{Artifact, CategoryScore, Error, Report, ReportStore, Result};
use crate::discovery::{DiscoveryConfig, SerperSearch, DEFAULT_SITE};
use crate::runner::{PipelineRunner, RunOutcome};
use crate::source::{write_handoff, UrlSource, DEFAULT_HANDOFF_FILE};

/// Characters of body text printed by `show`.
const EXCERPT_CHARS: usize = 1000;

#[derive(Subcommand, Debug)]
pub enum PipelineCommands {
    /// Analyze the article whose URL is in the handoff file
    Analyze {
        /// Write this URL to the handoff file before running
        #[arg(long)]
        url: Option<String>,
        /// Handoff file holding the URL to analyze
        #[arg(long, default_value = DEFAULT_HANDOFF_FILE)]
        input: PathBuf,
    },
    /// Analyze a batch of articles found by web search or listed in a file
    Batch {
        /// Search query (defaults to site:<host of --site>)
        #[arg(long)]
        query: Option<String>,
        /// Only links under this prefix are analyzed
        #[arg(long, default_value = DEFAULT_SITE)]
        site: String,
        /// Maximum number of articles to analyze
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Read URLs from this file (one per line) instead of searching
        #[arg(long)]
        urls_file: Option<PathBuf>,
        #[arg(long, env = "SERPER_API_KEY", hide_env_values = true)]
        serper_api_key: Option<String>,
    },
    /// Print the most recent result
    Show,
}

pub async fn handle_command(command: PipelineCommands, runner: &PipelineRunner) -> Result<()> {
    match command {
        PipelineCommands::Analyze { url, input } => {
            if let Some(url) = url {
                write_handoff(&input, &url).await?;
                info!("📝 Wrote {} to {}", url.trim(), input.display());
            }
            let outcome = runner.run(UrlSource::HandoffFile(input)).await?;
            summarize(&outcome);
        }
        PipelineCommands::Batch {
            query,
            site,
            limit,
            urls_file,
            serper_api_key,
        } => {
            let source = match urls_file {
                Some(path) => UrlSource::ListFile(path),
                None => {
                    let api_key = serper_api_key.ok_or_else(|| {
                        Error::Config("SERPER_API_KEY is required unless --urls-file is given".to_string())
                    })?;
                    let mut config = DiscoveryConfig::new(api_key);
                    config.query = query;
                    config.site_prefix = site;
                    config.limit = limit;
                    UrlSource::Discovered(Arc::new(SerperSearch::new(config)?))
                }
            };
            let outcome = runner.run(source).await?;
            summarize(&outcome);
        }
        PipelineCommands::Show => show_latest(runner.store().as_ref()).await?,
    }
    Ok(())
}

/// Prints the artifact the latest-result pointer refers to.
pub async fn show_latest(store: &dyn ReportStore) -> Result<()> {
    let (Some(path), Some(artifact)) = (store.latest_path().await?, store.load_latest().await?) else {
        println!("No result yet. Run `seo analyze` first.");
        return Ok(());
    };
    println!("📄 {}", path.display());
    print_artifact(&artifact);
    Ok(())
}

fn summarize(outcome: &RunOutcome) {
    info!(
        "✅ {} report(s) written to {} ({} degraded)",
        outcome.reports,
        outcome.artifact.display(),
        outcome.degraded
    );
    for skipped in &outcome.skipped {
        warn!("⏭️ Skipped {}: {}", skipped.url, skipped.reason);
    }
}

fn print_artifact(artifact: &Artifact) {
    for report in artifact.reports() {
        print_report(report);
    }
}

fn print_report(report: &Report) {
    println!();
    println!("🔗 {}", report.link);
    println!("# {}", report.title);
    if !report.subheadings.is_empty() {
        println!("\nSubtítulos:");
        for subheading in &report.subheadings {
            println!("  - {}", subheading);
        }
    }
    println!("\n{}", excerpt(&report.body, EXCERPT_CHARS));

    match report.evaluation.score {
        Some(score) => println!("\nNota SEO: {:.1}/10", score),
        None => println!("\nNota SEO: N/A"),
    }
    println!("{}", report.evaluation.explanation);
    for suggestion in &report.evaluation.suggestions {
        println!("  • {}", suggestion);
    }

    if let Some(metrics) = report.page_speed.metrics() {
        let vitals = &metrics.core_web_vitals;
        println!(
            "\nCore Web Vitals: LCP {} | INP {} | CLS {} | FCP {} | TTFB {}",
            vitals.lcp, vitals.inp, vitals.cls, vitals.fcp, vitals.ttfb
        );
        println!(
            "Acessibilidade: {} | Boas práticas: {} | SEO: {}",
            score_label(metrics.accessibility),
            score_label(metrics.best_practices),
            score_label(metrics.seo)
        );
    } else {
        println!("\nPageSpeed: sem dados");
    }
}

fn score_label(score: CategoryScore) -> String {
    match score.value() {
        Some(value) => value.to_string(),
        None => seo_core::NOT_AVAILABLE.to_string(),
    }
}

fn excerpt(body: &str, limit: usize) -> String {
    let mut text: String = body.chars().take(limit).collect();
    if body.chars().count() > limit {
        text.push_str("...");
    }
    text
}
