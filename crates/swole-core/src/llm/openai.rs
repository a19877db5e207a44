use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::Config;
use crate::core_types::{Role, Turn};
use crate::errors::ChatError;
use crate::llm::Completion;

const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    api_base: String,
    temperature: f32,
    max_tokens: Option<u32>,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: crate::config::DEFAULT_API_BASE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            timeout: Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.clone())
            .with_api_base(config.api_base.clone())
            .with_max_tokens(config.max_tokens)
            .with_timeout(config.timeout)
    }

    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request_body(&self, turns: &[Turn], model: &str) -> Value {
        let mut body = json!({
            "model": model,
            "messages": self.format_turns(turns),
            "temperature": self.temperature,
        });

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = max_tokens.into();
        }

        body
    }

    fn format_turns(&self, turns: &[Turn]) -> Vec<Value> {
        turns
            .iter()
            .map(|turn| {
                json!({
                    "role": self.format_role(&turn.role),
                    "content": turn.text,
                })
            })
            .collect()
    }

    fn format_role(&self, role: &Role) -> &'static str {
        match role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    fn parse_response(&self, response: Value) -> Result<String, ChatError> {
        let choices = response["choices"]
            .as_array()
            .ok_or_else(|| ChatError::Parsing("No choices in response".to_string()))?;

        if choices.is_empty() {
            return Err(ChatError::Parsing("Empty choices array".to_string()));
        }

        choices[0]["message"]["content"]
            .as_str()
            .map(|content| content.to_string())
            .ok_or_else(|| ChatError::Parsing("Response message has no content".to_string()))
    }
}

/// Pulls the human-readable message out of a service error body, falling
/// back to the raw body when it is not the usual JSON shape.
fn api_error(code: u16, body: &str) -> ChatError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value["error"]["message"]
                .as_str()
                .map(|message| message.to_string())
        })
        .unwrap_or_else(|| body.trim().to_string());

    ChatError::Api { code, message }
}

#[async_trait]
impl Completion for OpenAiClient {
    async fn complete(&self, turns: Vec<Turn>, model: &str) -> Result<String, ChatError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = self.build_request_body(&turns, model);

        log::debug!(
            "Completion request to {} with {} messages (model {})",
            url,
            turns.len(),
            model
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|err| ChatError::Network(format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| ChatError::Network(format!("Failed to read response: {err}")))?;

        if !status.is_success() {
            log::error!("Completion request failed with status {status}");
            return Err(api_error(status.as_u16(), &response_text));
        }

        let response_json: Value = serde_json::from_str(&response_text)
            .map_err(|err| ChatError::Parsing(format!("Invalid JSON response: {err}")))?;

        self.parse_response(response_json)
    }
}
