//! Request and response shapes for the three provider APIs.
//!
//! Only the fields this crate reads or writes are modeled; everything else in
//! the provider responses is ignored during deserialization.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

// ==================== OpenAI (chat completions) ====================

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<OpenAiMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiResponse {
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiChoice {
    pub message: OpenAiChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiChoiceMessage {
    pub content: String,
}

impl OpenAiResponse {
    /// First choice's message content.
    pub(crate) fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::MalformedResponse("no choices in completion".to_string()))
    }
}

// ==================== Gemini (generateContent) ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GeminiPart {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiGenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiCandidate {
    pub content: GeminiContent,
}

impl GeminiResponse {
    /// First candidate's first text part.
    pub(crate) fn into_text(self) -> Result<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| Error::MalformedResponse("no candidates in response".to_string()))
    }
}

// ==================== Claude (messages) ====================

#[derive(Debug, Serialize)]
pub(crate) struct ClaudeRequest<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub messages: Vec<ClaudeMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClaudeMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClaudeResponse {
    #[serde(default)]
    pub content: Vec<ClaudeContentBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClaudeContentBlock {
    #[serde(default)]
    pub text: String,
}

impl ClaudeResponse {
    /// First content block's text.
    pub(crate) fn into_text(self) -> Result<String> {
        self.content
            .into_iter()
            .next()
            .map(|b| b.text)
            .ok_or_else(|| Error::MalformedResponse("no content blocks in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_openai_request_shape() {
        let req = OpenAiRequest {
            model: "gpt-4o-mini",
            messages: vec![
                OpenAiMessage {
                    role: "system",
                    content: "persona",
                },
                OpenAiMessage {
                    role: "user",
                    content: "prompt",
                },
            ],
            temperature: 0.7,
            max_tokens: 2048,
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "prompt");
        assert_eq!(value["max_tokens"], 2048);
    }

    #[test]
    fn test_openai_response_text() {
        let resp: OpenAiResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "# Title\nBody"}}]
        }))
        .unwrap();
        assert_eq!(resp.into_text().unwrap(), "# Title\nBody");
    }

    #[test]
    fn test_openai_response_empty_choices() {
        let resp: OpenAiResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            resp.into_text(),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_gemini_request_uses_camel_case() {
        let req = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: "prompt".to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: 0.5,
                max_output_tokens: 1024,
            },
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[test]
    fn test_gemini_response_text() {
        let resp: GeminiResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}], "role": "model"}}
            ]
        }))
        .unwrap();
        assert_eq!(resp.into_text().unwrap(), "first");
    }

    #[test]
    fn test_claude_request_shape() {
        let req = ClaudeRequest {
            model: "claude-sonnet-4-5",
            system: "persona",
            messages: vec![ClaudeMessage {
                role: "user",
                content: "prompt",
            }],
            temperature: 0.7,
            max_tokens: 2048,
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["system"], "persona");
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[test]
    fn test_claude_response_text() {
        let resp: ClaudeResponse = serde_json::from_value(json!({
            "content": [{"type": "text", "text": "# Title\nBody"}]
        }))
        .unwrap();
        assert_eq!(resp.into_text().unwrap(), "# Title\nBody");
    }
}
