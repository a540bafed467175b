use crate::error::{Error, Result};
use crate::models::*;
use async_trait::async_trait;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// System instruction fixing the writing persona for chat-style providers.
pub const SYSTEM_PERSONA: &str = "You are a professional Japanese SEO writer. \
Write well-structured, engaging blog articles in natural Japanese, \
optimized for search without keyword stuffing.";

/// Model parameters shared by every provider.
#[derive(Debug, Clone)]
pub struct ModelParams {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Provider-tagged generation config. Matching on this is exhaustive, so
/// adding a provider forces every dispatch site to handle it.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    OpenAi(ModelParams),
    Gemini(ModelParams),
    Claude(ModelParams),
}

impl ProviderConfig {
    pub fn params(&self) -> &ModelParams {
        match self {
            ProviderConfig::OpenAi(p) | ProviderConfig::Gemini(p) | ProviderConfig::Claude(p) => p,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        match self {
            ProviderConfig::OpenAi(_) => "openai",
            ProviderConfig::Gemini(_) => "gemini",
            ProviderConfig::Claude(_) => "claude",
        }
    }
}

/// One implementation per LLM backend. Takes the built instruction block and
/// returns the provider's raw article text.
#[async_trait]
pub trait ArticleProvider: Send + Sync {
    async fn generate(&self, prompt: &str, params: &ModelParams) -> Result<String>;
}

async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

// ==================== OpenAI ====================

pub struct OpenAiProvider {
    http: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ArticleProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str, params: &ModelParams) -> Result<String> {
        let request = OpenAiRequest {
            model: &params.model,
            messages: vec![
                OpenAiMessage {
                    role: "system",
                    content: SYSTEM_PERSONA,
                },
                OpenAiMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        tracing::debug!(model = %params.model, "requesting chat completion");

        let response = self
            .http
            .post(OPENAI_API_URL)
            .bearer_auth(&params.api_key)
            .json(&request)
            .send()
            .await?;

        let response: OpenAiResponse = error_for_status(response).await?.json().await?;
        response.into_text()
    }
}

// ==================== Gemini ====================

/// Send a generateContent request and return the provider's JSON verbatim.
///
/// Shared by [`GeminiProvider`] and the same-origin relay endpoint, which
/// forwards browser requests unchanged (the Generative Language API rejects
/// cross-origin calls).
pub async fn gemini_generate_raw(
    http: &reqwest::Client,
    api_key: &str,
    model: &str,
    prompt: &str,
    temperature: f32,
    max_tokens: u32,
) -> Result<serde_json::Value> {
    let request = GeminiRequest {
        contents: vec![GeminiContent {
            parts: vec![GeminiPart {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GeminiGenerationConfig {
            temperature,
            max_output_tokens: max_tokens,
        },
    };

    let url = format!("{}/{}:generateContent", GEMINI_API_BASE, model);

    tracing::debug!(model = %model, "requesting content generation");

    let response = http
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&request)
        .send()
        .await?;

    let value = error_for_status(response).await?.json().await?;
    Ok(value)
}

pub struct GeminiProvider {
    http: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ArticleProvider for GeminiProvider {
    async fn generate(&self, prompt: &str, params: &ModelParams) -> Result<String> {
        let value = gemini_generate_raw(
            &self.http,
            &params.api_key,
            &params.model,
            prompt,
            params.temperature,
            params.max_tokens,
        )
        .await?;

        let response: GeminiResponse = serde_json::from_value(value)?;
        response.into_text()
    }
}

// ==================== Claude ====================

pub struct ClaudeProvider {
    http: reqwest::Client,
}

impl ClaudeProvider {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ArticleProvider for ClaudeProvider {
    async fn generate(&self, prompt: &str, params: &ModelParams) -> Result<String> {
        let request = ClaudeRequest {
            model: &params.model,
            system: SYSTEM_PERSONA,
            messages: vec![ClaudeMessage {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        tracing::debug!(model = %params.model, "requesting message completion");

        let response = self
            .http
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &params.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let response: ClaudeResponse = error_for_status(response).await?.json().await?;
        response.into_text()
    }
}

// ==================== Facade ====================

/// Provider-agnostic entry point. Validates credentials, then dispatches to
/// the backend selected by the config's tag.
pub struct LlmClient {
    http: reqwest::Client,
}

impl LlmClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub async fn generate(&self, config: &ProviderConfig, prompt: &str) -> Result<String> {
        if config.params().api_key.trim().is_empty() {
            return Err(Error::MissingCredential);
        }

        match config {
            ProviderConfig::OpenAi(params) => {
                OpenAiProvider::new(self.http.clone())
                    .generate(prompt, params)
                    .await
            }
            ProviderConfig::Gemini(params) => {
                GeminiProvider::new(self.http.clone())
                    .generate(prompt, params)
                    .await
            }
            ProviderConfig::Claude(params) => {
                ClaudeProvider::new(self.http.clone())
                    .generate(prompt, params)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(api_key: &str) -> ModelParams {
        ModelParams {
            api_key: api_key.to_string(),
            model: "test-model".to_string(),
            temperature: 0.7,
            max_tokens: 256,
        }
    }

    #[tokio::test]
    async fn test_empty_api_key_fails_before_network() {
        let client = LlmClient::new(reqwest::Client::new());

        for config in [
            ProviderConfig::OpenAi(params("")),
            ProviderConfig::Gemini(params("   ")),
            ProviderConfig::Claude(params("")),
        ] {
            let err = client.generate(&config, "prompt").await.unwrap_err();
            assert!(matches!(err, Error::MissingCredential), "{:?}", err);
        }
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(ProviderConfig::OpenAi(params("k")).provider_name(), "openai");
        assert_eq!(ProviderConfig::Gemini(params("k")).provider_name(), "gemini");
        assert_eq!(ProviderConfig::Claude(params("k")).provider_name(), "claude");
    }
}
