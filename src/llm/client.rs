//! OpenAI-compatible chat-completions client
//!
//! Single-shot, non-streaming requests. No retries.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::{NudgeError, NudgeResult};

const CONNECT_TIMEOUT_SECS: u64 = 30;
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// One chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat client bound to one endpoint and model
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Build a client; fails with `NotConfigured` when no API key is set
    pub fn new(config: &LlmConfig) -> NudgeResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| NudgeError::NotConfigured("NUTRINUDGE_API_KEY is not set".to_string()))?;

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        tracing::info!("Chat client ready: base_url={}, model={}", config.base_url, config.model);

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Send messages and return the first choice's text
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> NudgeResult<String> {
        let body = CompletionRequest {
            model: &self.model,
            messages,
            temperature,
            max_tokens,
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!("Chat completion failed: {} {}", status, text);
            return Err(status_error(status, text));
        }

        let parsed: CompletionResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(NudgeError::EmptyResponse)
    }
}

fn status_error(status: StatusCode, body: String) -> NudgeError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => NudgeError::RateLimited,
        StatusCode::PAYMENT_REQUIRED => NudgeError::CreditsDepleted,
        _ => NudgeError::UpstreamStatus { status: status.as_u16(), body },
    }
}

/// Remove markdown code fences around a JSON payload
pub fn strip_code_fences(content: &str) -> &str {
    let mut text = content.trim();
    if let Some(rest) = text.strip_prefix("```") {
        let rest = rest.strip_prefix("json").or_else(|| rest.strip_prefix("JSON")).unwrap_or(rest);
        text = rest.trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n[1, 2]\n```\n"), "[1, 2]");
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, String::new()),
            NudgeError::RateLimited
        ));
        assert!(matches!(
            status_error(StatusCode::PAYMENT_REQUIRED, String::new()),
            NudgeError::CreditsDepleted
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "down".to_string()),
            NudgeError::UpstreamStatus { status: 502, .. }
        ));
    }

    #[test]
    fn test_client_requires_api_key() {
        let result = ChatClient::new(&LlmConfig::default());
        assert!(matches!(result, Err(NudgeError::NotConfigured(_))));
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![ChatMessage::system("rules"), ChatMessage::user("plan please")];
        let body = CompletionRequest {
            model: "m",
            messages: &messages,
            temperature: 0.3,
            max_tokens: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][1]["role"], "user");
        assert!(json.get("max_tokens").is_none());
    }
}
