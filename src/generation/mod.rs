//! Article generation: prompt building, provider dispatch through
//! `llm_client`, and normalization of the raw model output into a
//! title/content pair.

pub mod metadata;
pub mod prompt;

use async_trait::async_trait;
use llm_client::{LlmClient, ModelParams, ProviderConfig};

use crate::db::entities::ai_configs;
use crate::db::types::Provider;
use crate::error::AppResult;
use crate::scheduler::Generator;
use prompt::GenerationPrompt;

/// Normalized generation result, independent of provider response shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArticle {
    pub title: String,
    pub content: String,
}

/// Split raw model output at the first newline: the first line (minus any
/// Markdown heading markers) is the title, the trimmed remainder is the
/// content. Output without a newline yields an empty content, which is
/// degenerate but not fatal.
pub fn split_title_content(raw: &str) -> GeneratedArticle {
    let trimmed = raw.trim();

    let (first_line, rest) = match trimmed.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (trimmed, ""),
    };

    GeneratedArticle {
        title: first_line.trim().trim_start_matches('#').trim().to_string(),
        content: rest.trim().to_string(),
    }
}

fn provider_config(ai: &ai_configs::Model) -> ProviderConfig {
    let params = ModelParams {
        api_key: ai.api_key.clone(),
        model: ai.model.clone(),
        temperature: ai.temperature,
        max_tokens: ai.max_tokens.max(0) as u32,
    };

    match ai.provider {
        Provider::OpenAi => ProviderConfig::OpenAi(params),
        Provider::Gemini => ProviderConfig::Gemini(params),
        Provider::Claude => ProviderConfig::Claude(params),
    }
}

/// Production [`Generator`]: builds the prompt, dispatches to the configured
/// provider and splits the response.
pub struct LlmGenerator {
    llm: LlmClient,
}

impl LlmGenerator {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            llm: LlmClient::new(http),
        }
    }
}

#[async_trait]
impl Generator for LlmGenerator {
    async fn generate(&self, ai: &ai_configs::Model, keyword: &str) -> AppResult<GeneratedArticle> {
        let prompt = prompt::build_prompt(&GenerationPrompt::for_keyword(keyword));
        let config = provider_config(ai);

        tracing::info!(
            provider = config.provider_name(),
            model = %ai.model,
            keyword,
            "generating article"
        );

        let raw = self.llm.generate(&config, &prompt).await?;
        Ok(split_title_content(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_strips_heading_marker() {
        let article = split_title_content("# My Title\nBody line 1\nBody line 2");
        assert_eq!(article.title, "My Title");
        assert_eq!(article.content, "Body line 1\nBody line 2");
    }

    #[test]
    fn test_split_without_heading_marker() {
        let article = split_title_content("Plain Title\n\nBody paragraph.");
        assert_eq!(article.title, "Plain Title");
        assert_eq!(article.content, "Body paragraph.");
    }

    #[test]
    fn test_split_multiple_heading_markers() {
        let article = split_title_content("##   Deep Heading\nBody");
        assert_eq!(article.title, "Deep Heading");
        assert_eq!(article.content, "Body");
    }

    #[test]
    fn test_split_without_newline_is_degenerate() {
        let article = split_title_content("# Only a title");
        assert_eq!(article.title, "Only a title");
        assert_eq!(article.content, "");
    }

    #[test]
    fn test_split_trims_surrounding_whitespace() {
        let article = split_title_content("\n\n# Title\r\nBody\n\n");
        assert_eq!(article.title, "Title");
        assert_eq!(article.content, "Body");
    }

    #[test]
    fn test_provider_config_dispatch() {
        use chrono::Utc;

        let ai = |provider| ai_configs::Model {
            id: 1,
            provider,
            api_key: "key".to_string(),
            model: "model".to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            created_at: Utc::now(),
        };

        assert!(matches!(
            provider_config(&ai(Provider::OpenAi)),
            ProviderConfig::OpenAi(_)
        ));
        assert!(matches!(
            provider_config(&ai(Provider::Gemini)),
            ProviderConfig::Gemini(_)
        ));
        assert!(matches!(
            provider_config(&ai(Provider::Claude)),
            ProviderConfig::Claude(_)
        ));
    }
}
