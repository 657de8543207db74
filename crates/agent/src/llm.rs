use async_trait::async_trait;
use dealscout_core::config::LlmConfig;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Seam to the model provider.
///
/// One method: send a fixed system prompt, a serialized user payload, and
/// the JSON Schema the reply must conform to; get back the parsed JSON
/// object or an error. Agents are thin configurations over this trait, and
/// tests substitute scripted fakes.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete_structured(
        &self,
        system_prompt: &str,
        user_payload: &str,
        target_schema: &Value,
    ) -> Result<Value, LlmError>;
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("model provider API key is not configured")]
    MissingApiKey,
    #[error("model transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("model provider returned HTTP {status}: {body}")]
    Provider { status: reqwest::StatusCode, body: String },
    #[error("model response carried no content")]
    EmptyResponse,
    #[error("model output was not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),
    #[error("model output failed schema validation: {0}")]
    SchemaViolation(String),
}

/// OpenAI-compatible chat-completions client (DeepSeek by default).
///
/// The target schema is embedded into the system message and the provider
/// is asked for a JSON object response; the reply content is fence-stripped
/// and parsed before it is handed back to the caller.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl ChatClient {
    pub fn new(http: reqwest::Client, config: LlmConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmClient for ChatClient {
    async fn complete_structured(
        &self,
        system_prompt: &str,
        user_payload: &str,
        target_schema: &Value,
    ) -> Result<Value, LlmError> {
        let key = self.config.api_key.as_ref().ok_or(LlmError::MissingApiKey)?;

        let system = format!(
            "{system_prompt}\n\n\
             Respond with a single JSON object conforming to this JSON Schema, \
             with no surrounding prose:\n{target_schema}"
        );
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user_payload.to_string() },
            ],
            temperature: self.config.temperature,
            response_format: ResponseFormat { kind: "json_object" },
        };

        debug!(model = %self.config.model, "sending structured completion request");
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(LlmError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Provider { status, body });
        }

        let body = response.text().await.map_err(LlmError::Transport)?;
        let content = extract_content(&body)?;

        let stripped = strip_code_fences(&content);
        serde_json::from_str(stripped).map_err(LlmError::MalformedJson)
    }
}

/// Decode the completion envelope and pull out the assistant reply.
///
/// A body that is not a valid envelope is a malformed model response, not a
/// transport failure; an envelope without usable content is an empty one.
fn extract_content(body: &str) -> Result<String, LlmError> {
    let completion: ChatResponse =
        serde_json::from_str(body).map_err(LlmError::MalformedJson)?;
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(LlmError::EmptyResponse)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// Some models wrap JSON replies in markdown fences despite the response
/// format hint.
fn strip_code_fences(content: &str) -> &str {
    content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[cfg(test)]
mod tests {
    use super::{extract_content, strip_code_fences, LlmError};

    #[test]
    fn plain_json_passes_through() {
        assert_eq!(strip_code_fences(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn json_fence_markers_are_removed() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn envelope_content_is_extracted() {
        let body = r#"{"choices":[{"message":{"content":"{\"a\": 1}"}}]}"#;
        assert_eq!(extract_content(body).expect("content should extract"), r#"{"a": 1}"#);
    }

    #[test]
    fn non_json_body_is_malformed_not_a_transport_failure() {
        let error = extract_content("upstream proxy error").expect_err("should fail");
        assert!(matches!(error, LlmError::MalformedJson(_)));
    }

    #[test]
    fn envelope_without_choices_or_content_is_empty() {
        for body in [r#"{"choices":[]}"#, r#"{"choices":[{"message":{"content":"  "}}]}"#] {
            let error = extract_content(body).expect_err("should fail");
            assert!(matches!(error, LlmError::EmptyResponse));
        }
    }
}
