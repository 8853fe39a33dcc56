//! SEO scoring of extracted article content through a completion model.
//!
//! The model is asked for a JSON object with the keys `nota_seo`, `explicacao`
//! and `sugestoes`. Replies are normalized (code fences removed) and checked
//! against that schema before they become a [`SeoEvaluation`].

use std::sync::Arc;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use seo_core::{ArticleContent, CompletionModel, SeoEvaluation};

/// Characters of body text embedded in the prompt.
pub const DEFAULT_BODY_LIMIT: usize = 3000;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("completion provider failed: {0}")]
    Provider(#[from] seo_core::Error),

    #[error("completion reply was empty")]
    EmptyReply,

    #[error("completion reply is not JSON: {0}")]
    Malformed(serde_json::Error),

    #[error("completion reply does not match the expected schema: {0}")]
    Schema(String),
}

#[derive(Deserialize)]
struct SeoReply {
    nota_seo: f64,
    explicacao: String,
    sugestoes: Vec<String>,
}

pub struct SeoEvaluator {
    model: Arc<dyn CompletionModel>,
    body_limit: usize,
}

impl SeoEvaluator {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self {
            model,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn build_prompt(&self, content: &ArticleContent) -> String {
        let mut excerpt: String = content.body.chars().take(self.body_limit).collect();
        if content.body.chars().count() > self.body_limit {
            excerpt.push_str("...");
        }
        let subheadings = serde_json::to_string(&content.subheadings).unwrap_or_else(|_| "[]".to_string());

        format!(
            "Você é um especialista em SEO. Avalie o artigo de blog abaixo segundo boas práticas de SEO: \
palavras-chave no título, estrutura de headings, meta description, links internos e externos, \
tamanho e legibilidade do texto.\n\
Responda somente com um objeto JSON contendo:\n\
- \"nota_seo\": número entre 0 e 10 (float, não use porcentagem)\n\
- \"explicacao\": um parágrafo com pontos fortes e fracos\n\
- \"sugestoes\": lista com 3 sugestões curtas e práticas de melhoria\n\n\
Conteúdo:\n\
Título: {}\n\
Subtítulos: {}\n\
Texto: {}\n",
            content.title, subheadings, excerpt
        )
    }

    /// Scores `content`, reporting why when no usable evaluation came back.
    pub async fn evaluate(&self, content: &ArticleContent) -> Result<SeoEvaluation, EvalError> {
        let prompt = self.build_prompt(content);
        info!("🤖 Evaluating SEO with {}", self.model.name());
        let raw = self.model.complete(&prompt).await?;
        debug!("Completion reply for {}: {}", content.url, raw);
        parse_reply(&raw)
    }

    /// Like [`evaluate`](Self::evaluate) but falls back to [`SeoEvaluation::degraded`].
    pub async fn evaluate_or_degraded(&self, content: &ArticleContent) -> SeoEvaluation {
        match self.evaluate(content).await {
            Ok(evaluation) => evaluation,
            Err(e) => {
                warn!("⚠️ SEO analysis failed for {}: {}", content.url, e);
                SeoEvaluation::degraded()
            }
        }
    }
}

/// Removes markdown code fences the provider may wrap around its JSON.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening fence line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Validates a completion reply against the evaluation schema.
pub fn parse_reply(raw: &str) -> Result<SeoEvaluation, EvalError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(EvalError::EmptyReply);
    }

    let reply = match serde_json::from_str::<SeoReply>(cleaned) {
        Ok(reply) => reply,
        Err(first_err) => match embedded_object(cleaned) {
            Some(object) => serde_json::from_str::<SeoReply>(object).map_err(classify)?,
            None => return Err(classify(first_err)),
        },
    };

    if !reply.nota_seo.is_finite() || !(0.0..=10.0).contains(&reply.nota_seo) {
        return Err(EvalError::Schema(format!("nota_seo {} outside [0, 10]", reply.nota_seo)));
    }

    Ok(SeoEvaluation {
        score: Some(reply.nota_seo),
        explanation: reply.explicacao.trim().to_string(),
        suggestions: reply
            .sugestoes
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    })
}

/// The outermost `{ ... }` span, for replies that wrap the object in prose.
fn embedded_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn classify(err: serde_json::Error) -> EvalError {
    match err.classify() {
        serde_json::error::Category::Data => EvalError::Schema(err.to_string()),
        _ => EvalError::Malformed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use seo_core::{Error, Result, ANALYSIS_FAILED};

    #[derive(Debug)]
    struct FixedModel(String);

    #[async_trait]
    impl CompletionModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    #[derive(Debug)]
    struct UnreachableModel;

    #[async_trait]
    impl CompletionModel for UnreachableModel {
        fn name(&self) -> &str {
            "unreachable"
        }

        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(Error::Inference("connection refused".to_string()))
        }
    }

    fn content(body: &str) -> ArticleContent {
        ArticleContent {
            url: "https://example.com/article".to_string(),
            title: "Como economizar em 2024".to_string(),
            subheadings: vec!["Dicas práticas".to_string(), "Erros comuns".to_string()],
            body: body.to_string(),
        }
    }

    #[test]
    fn test_fenced_reply() {
        let raw = "```json\n{\"nota_seo\":7.5,\"explicacao\":\"ok\",\"sugestoes\":[\"a\",\"b\",\"c\"]}\n```";
        let evaluation = parse_reply(raw).unwrap();
        assert_eq!(evaluation.score, Some(7.5));
        assert_eq!(evaluation.explanation, "ok");
        assert_eq!(evaluation.suggestions, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_bare_and_embedded_reply() {
        let bare = r#"{"nota_seo": 6, "explicacao": "bom", "sugestoes": []}"#;
        assert_eq!(parse_reply(bare).unwrap().score, Some(6.0));

        let prose = "Aqui está a avaliação: {\"nota_seo\": 8.0, \"explicacao\": \"ótimo\", \"sugestoes\": [\"x\"]} Espero ter ajudado.";
        let evaluation = parse_reply(prose).unwrap();
        assert_eq!(evaluation.score, Some(8.0));
        assert_eq!(evaluation.suggestions, vec!["x"]);
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  {}  "), "{}");
        assert_eq!(strip_code_fences("```json{}```"), "{}");
    }

    #[test]
    fn test_unusable_replies() {
        assert!(matches!(parse_reply(""), Err(EvalError::EmptyReply)));
        assert!(matches!(parse_reply("```json\n```"), Err(EvalError::EmptyReply)));
        assert!(matches!(parse_reply("Desculpe, não posso ajudar."), Err(EvalError::Malformed(_))));
        assert!(matches!(
            parse_reply(r#"{"nota_seo": 7.0, "explicacao": "sem sugestões"}"#),
            Err(EvalError::Schema(_))
        ));
        assert!(matches!(
            parse_reply(r#"{"nota_seo": "7", "explicacao": "x", "sugestoes": []}"#),
            Err(EvalError::Schema(_))
        ));
        assert!(matches!(
            parse_reply(r#"{"nota_seo": 75, "explicacao": "x", "sugestoes": []}"#),
            Err(EvalError::Schema(_))
        ));
    }

    #[test]
    fn test_prompt_truncates_body() {
        let evaluator = SeoEvaluator::new(Arc::new(FixedModel(String::new())));
        let long_body = "ç".repeat(DEFAULT_BODY_LIMIT + 500);
        let prompt = evaluator.build_prompt(&content(&long_body));

        assert!(prompt.contains("Título: Como economizar em 2024"));
        assert!(prompt.contains(r#"["Dicas práticas","Erros comuns"]"#));
        let excerpt = prompt.split("Texto: ").nth(1).unwrap().trim_end();
        assert_eq!(excerpt.chars().filter(|c| *c == 'ç').count(), DEFAULT_BODY_LIMIT);
        assert!(excerpt.ends_with("..."));

        let short_prompt = evaluator.build_prompt(&content("Curto."));
        assert!(short_prompt.trim_end().ends_with("Texto: Curto."));
    }

    #[tokio::test]
    async fn test_evaluate_with_model() {
        let reply = "```json\n{\"nota_seo\":7.5,\"explicacao\":\"ok\",\"sugestoes\":[\"a\",\"b\",\"c\"]}\n```";
        let evaluator = SeoEvaluator::new(Arc::new(FixedModel(reply.to_string())));
        let evaluation = evaluator.evaluate(&content("Texto.")).await.unwrap();
        assert_eq!(evaluation.score, Some(7.5));
        assert_eq!(evaluator.model_name(), "fixed");
    }

    #[tokio::test]
    async fn test_degraded_on_failure() {
        let evaluator = SeoEvaluator::new(Arc::new(UnreachableModel));
        assert!(matches!(
            evaluator.evaluate(&content("Texto.")).await,
            Err(EvalError::Provider(_))
        ));

        let evaluation = evaluator.evaluate_or_degraded(&content("Texto.")).await;
        assert_eq!(evaluation.score, None);
        assert_eq!(evaluation.explanation, ANALYSIS_FAILED);
        assert!(evaluation.suggestions.is_empty());

        let evaluator = SeoEvaluator::new(Arc::new(FixedModel("not json".to_string())));
        assert_eq!(evaluator.evaluate_or_degraded(&content("Texto.")).await, SeoEvaluation::degraded());
    }
}
