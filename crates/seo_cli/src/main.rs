use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use clap::Parser;
use tracing::{error, info};
use seo_core::Result;
use seo_inference::{create_model, SeoEvaluator};
use seo_pagespeed::PageSpeedClient;
use seo_scrapers::{
    handle_command, init_logging, show_latest, BrowserSettings, ChromiumRenderer, PageExtractor,
    PipelineCommands, PipelineRunner,
};
use seo_storage::{create_store, StorageConfig};

/// Durations such as `60s`, `2m` or `1m30s`; a bare number is seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Duration must include a number".to_string());
        }

        let mut total = 0u64;
        let mut digits = String::new();
        for c in s.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            let value: u64 = digits
                .parse()
                .map_err(|_| format!("Expected a number before '{}'", c))?;
            total += match c {
                's' => value,
                'm' => value * 60,
                'h' => value * 3600,
                _ => return Err(format!("Invalid duration unit: {}", c)),
            };
            digits.clear();
        }
        if !digits.is_empty() {
            total += digits.parse::<u64>().map_err(|e| e.to_string())?;
        }

        Ok(HumanDuration(Duration::from_secs(total)))
    }
}

#[derive(Parser, Debug)]
#[command(name = "seo", author, version, about = "SEO analysis of blog articles", long_about = None)]
struct Cli {
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,
    #[arg(long, env = "OPENAI_BASE_URL", default_value = seo_inference::DEFAULT_BASE_URL)]
    openai_base_url: String,
    /// Completion model; `dummy` runs offline
    #[arg(long, env = "SEO_MODEL", default_value = seo_inference::DEFAULT_MODEL)]
    model: String,
    #[arg(long, env = "GOOGLE_PAGESPEED_API_KEY", hide_env_values = true)]
    pagespeed_api_key: Option<String>,
    #[arg(long, default_value = "output_files")]
    output_dir: PathBuf,
    #[arg(long, default_value = "last_result.txt")]
    pointer_file: PathBuf,
    /// Storage backend: file (default) or memory
    #[arg(long, default_value = "file")]
    storage: String,
    /// Show the browser window instead of running headless
    #[arg(long)]
    headed: bool,
    #[arg(long, default_value = "erro_debug.png")]
    screenshot: PathBuf,
    #[arg(long)]
    no_screenshot: bool,
    #[arg(long, env = "CHROME_EXECUTABLE")]
    chrome_executable: Option<PathBuf>,
    #[arg(long, default_value = "60s")]
    navigation_timeout: HumanDuration,
    #[arg(long, default_value = "15s")]
    content_timeout: HumanDuration,
    /// Timeout for completion and PageSpeed requests
    #[arg(long, default_value = "60s")]
    request_timeout: HumanDuration,
    #[command(subcommand)]
    command: PipelineCommands,
}

impl Cli {
    fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            output_dir: self.output_dir.clone(),
            pointer_file: self.pointer_file.clone(),
        }
    }

    fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            headless: !self.headed,
            navigation_timeout: self.navigation_timeout.0,
            content_timeout: self.content_timeout.0,
            screenshot_path: (!self.no_screenshot).then(|| self.screenshot.clone()),
            chrome_executable: self.chrome_executable.clone(),
            ..BrowserSettings::default()
        }
    }

    fn build_runner(&self) -> Result<PipelineRunner> {
        let model = create_model(seo_inference::Config {
            api_key: self.openai_api_key.clone(),
            model_name: self.model.clone(),
            base_url: self.openai_base_url.clone(),
            timeout: self.request_timeout.0,
            ..seo_inference::Config::default()
        })?;
        info!("🤖 Using {} model", model.name());

        let enricher = PageSpeedClient::new(seo_pagespeed::Config {
            api_key: self.pagespeed_api_key.clone(),
            timeout: self.request_timeout.0,
            ..seo_pagespeed::Config::default()
        })?;
        let store = create_store(&self.storage, self.storage_config())?;
        info!("🏦 Storing results with the {} backend", self.storage);

        Ok(PipelineRunner::new(
            PageExtractor::new(Arc::new(ChromiumRenderer::new(self.browser_settings()))),
            SeoEvaluator::new(model),
            Arc::new(enricher),
            store,
        ))
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let PipelineCommands::Show = cli.command {
        let store = create_store(&cli.storage, cli.storage_config())?;
        return show_latest(store.as_ref()).await;
    }
    let runner = cli.build_runner()?;
    handle_command(cli.command, &runner).await
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ Run failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
