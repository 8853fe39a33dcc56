use std::sync::Arc;
use seo_core::{CompletionModel, Result};
use crate::Config;

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use openai::OpenAiModel;

/// Builds the completion model named by `config.model_name`.
///
/// `dummy` gives an offline model; any other name is sent to the
/// OpenAI-compatible endpoint at `config.base_url`.
pub fn create_model(config: Config) -> Result<Arc<dyn CompletionModel>> {
    match config.model_name.as_str() {
        "dummy" => Ok(Arc::new(DummyModel::new())),
        _ => Ok(Arc::new(OpenAiModel::new(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dummy_model() {
        let config = Config {
            model_name: "dummy".to_string(),
            ..Config::default()
        };
        let model = create_model(config).unwrap();
        assert_eq!(model.name(), "dummy");
    }

    #[test]
    fn test_create_openai_model_requires_key() {
        assert!(create_model(Config::default()).is_err());

        let config = Config {
            api_key: Some("test-key".to_string()),
            ..Config::default()
        };
        let model = create_model(config).unwrap();
        assert_eq!(model.name(), "gpt-4o");
    }
}
