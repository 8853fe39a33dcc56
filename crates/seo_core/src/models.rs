use async_trait::async_trait;
use std::fmt;
use crate::Result;

#[async_trait]
pub trait CompletionModel: Send + Sync + fmt::Debug {
    /// Returns the name of the model
    fn name(&self) -> &str;

    /// Sends a single user message and returns the raw reply text
    async fn complete(&self, prompt: &str) -> Result<String>;
}
