use std::path::PathBuf;
use std::time::Duration;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::{SetLocaleOverrideParams, SetTimezoneOverrideParams};
use chromiumoxide::error::CdpError;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use seo_core::{Error, PageRenderer, Result};

/// Elements whose presence means the article has painted.
pub const CONTENT_SELECTOR: &str = "article, h1, p";

const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub headless: bool,
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub timezone: String,
    pub locale: String,
    pub navigation_timeout: Duration,
    pub content_timeout: Duration,
    /// Full-page capture overwritten on every render, for post-mortem debugging
    pub screenshot_path: Option<PathBuf>,
    pub chrome_executable: Option<PathBuf>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: DESKTOP_USER_AGENT.to_string(),
            viewport_width: 1280,
            viewport_height: 800,
            timezone: "America/Sao_Paulo".to_string(),
            locale: "pt-BR".to_string(),
            navigation_timeout: Duration::from_secs(60),
            content_timeout: Duration::from_secs(15),
            screenshot_path: Some(PathBuf::from("erro_debug.png")),
            chrome_executable: None,
        }
    }
}

/// Renders pages in a Chromium instance launched for each call.
pub struct ChromiumRenderer {
    settings: BrowserSettings,
}

fn cdp_error(action: &'static str) -> impl FnOnce(CdpError) -> Error {
    move |e| Error::Extraction(format!("failed to {}: {}", action, e))
}

impl ChromiumRenderer {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let s = &self.settings;
        let mut builder = BrowserConfig::builder()
            .viewport(Some(Viewport {
                width: s.viewport_width,
                height: s.viewport_height,
                device_scale_factor: Some(1.0),
                ..Default::default()
            }))
            .window_size(s.viewport_width, s.viewport_height)
            .request_timeout(s.navigation_timeout)
            .arg(format!("--lang={}", s.locale))
            .arg("--disable-blink-features=AutomationControlled");
        if !s.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &s.chrome_executable {
            builder = builder.chrome_executable(executable);
        }
        builder
            .build()
            .map_err(|e| Error::Extraction(format!("invalid browser configuration: {}", e)))
    }

    async fn launch(&self) -> Result<(Browser, JoinHandle<()>)> {
        let (browser, mut handler) = Browser::launch(self.browser_config()?)
            .await
            .map_err(cdp_error("launch browser"))?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });
        Ok((browser, handle))
    }

    async fn open_page(&self, browser: &Browser) -> Result<Page> {
        let page = browser.new_page("about:blank").await.map_err(cdp_error("open page"))?;
        page.set_user_agent(self.settings.user_agent.as_str())
            .await
            .map_err(cdp_error("set user agent"))?;
        page.execute(SetTimezoneOverrideParams::new(self.settings.timezone.clone()))
            .await
            .map_err(cdp_error("set timezone"))?;
        page.execute(SetLocaleOverrideParams {
            locale: Some(self.settings.locale.clone()),
        })
        .await
        .map_err(cdp_error("set locale"))?;
        Ok(page)
    }

    async fn wait_for_content(&self, page: &Page) -> Result<()> {
        let poll = async {
            while page.find_element(CONTENT_SELECTOR).await.is_err() {
                tokio::time::sleep(Duration::from_millis(250)).await;
            }
        };
        tokio::time::timeout(self.settings.content_timeout, poll)
            .await
            .map_err(|_| {
                Error::Extraction(format!(
                    "no article, h1 or p element appeared within {}s",
                    self.settings.content_timeout.as_secs()
                ))
            })
    }

    async fn capture_screenshot(&self, page: &Page) {
        let Some(path) = &self.settings.screenshot_path else {
            return;
        };
        let params = ScreenshotParams::builder().full_page(true).build();
        match page.save_screenshot(params, path).await {
            Ok(_) => debug!("📸 Screenshot saved to {}", path.display()),
            Err(e) => warn!("Failed to save screenshot to {}: {}", path.display(), e),
        }
    }

    async fn render_in(&self, browser: &Browser, url: &str) -> Result<String> {
        let page = self.open_page(browser).await?;

        debug!("Navigating to {}", url);
        let navigation = tokio::time::timeout(self.settings.navigation_timeout, page.goto(url)).await;
        let loaded = match navigation {
            Ok(Ok(_)) => self.wait_for_content(&page).await,
            Ok(Err(e)) => Err(cdp_error("navigate")(e)),
            Err(_) => Err(Error::Extraction(format!(
                "navigation to {} timed out after {}s",
                url,
                self.settings.navigation_timeout.as_secs()
            ))),
        };

        self.capture_screenshot(&page).await;
        loaded?;

        page.content().await.map_err(cdp_error("read page content"))
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    fn name(&self) -> &str {
        "chromium"
    }

    async fn render(&self, url: &str) -> Result<String> {
        let (mut browser, handle) = self.launch().await?;
        let rendered = self.render_in(&browser, url).await;

        // Torn down on every path, whatever `rendered` holds.
        if let Err(e) = browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        handle.abort();

        rendered
    }
}
