pub mod browser;
pub mod cli;
pub mod discovery;
pub mod extractor;
pub mod logging;
pub mod runner;
pub mod source;

pub use browser::{BrowserSettings, ChromiumRenderer};
pub use cli::{handle_command, show_latest, PipelineCommands};
pub use discovery::{DiscoveryConfig, SerperSearch};
pub use extractor::{parse_article, PageExtractor};
pub use logging::{init_logging, Logger};
pub use runner::{PipelineRunner, RunOutcome, SkippedUrl};
pub use source::{ResolvedUrls, UrlSource};

pub mod prelude {
    pub use super::{PageExtractor, PipelineRunner, RunOutcome, UrlSource};
    pub use seo_core::{Error, PageRenderer, Report, Result};
}
