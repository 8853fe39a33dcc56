use std::time::Duration;

pub mod evaluator;
pub mod models;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: String,
    pub base_url: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.4,
            timeout: Duration::from_secs(60),
        }
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::evaluator::{EvalError, SeoEvaluator};
    pub use super::models::create_model;
    pub use seo_core::{CompletionModel, Error, Result, SeoEvaluation};
}

pub use evaluator::{EvalError, SeoEvaluator};
pub use models::create_model;
