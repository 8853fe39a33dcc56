use std::fmt;
use async_trait::async_trait;
use seo_core::{CompletionModel, Result};

/// Offline model answering every prompt with a fixed, fenced evaluation.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionModel for DummyModel {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let words = prompt.split_whitespace().count();
        let reply = serde_json::json!({
            "nota_seo": 5.0,
            "explicacao": format!("Avaliação offline de um prompt com {} palavras; nenhum provedor configurado.", words),
            "sugestoes": [
                "Configure um provedor de completions para uma avaliação real",
                "Revise o uso de palavras-chave no título",
                "Adicione links internos relevantes"
            ]
        });
        Ok(format!("```json\n{}\n```", reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_model() {
        let model = DummyModel::new();
        let reply = model.complete("Título: Teste").await.unwrap();
        assert!(reply.starts_with("```json"));
        assert!(reply.contains("\"nota_seo\""));
        assert!(reply.contains("2 palavras"));
    }
}
