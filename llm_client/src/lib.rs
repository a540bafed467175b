//! Minimal clients for the LLM provider APIs used for article generation.
//!
//! Supports OpenAI chat completions, the Google Generative Language API
//! (Gemini) and the Anthropic Messages API (Claude). Each provider is one
//! [`ArticleProvider`] implementation; dispatch happens over the
//! [`ProviderConfig`] sum type so a new provider cannot be forgotten at a
//! call site.

mod error;
mod models;
mod provider;

pub use error::{Error, Result};
pub use provider::{
    gemini_generate_raw, ArticleProvider, ClaudeProvider, GeminiProvider, LlmClient, ModelParams,
    OpenAiProvider, ProviderConfig, SYSTEM_PERSONA,
};
