//! Anthropic Cloud Backend
//!
//! Vendor message-creation transport authenticated by `ANTHROPIC_API_KEY`.
//! The HTTP client is constructed once with the provider and reused for
//! every call. Blocking mode extracts the first text content block;
//! streaming mode consumes the native event stream and yields only
//! text-delta payloads, ignoring tool-use and metadata events.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::stream::{FragmentStream, LineEvent, fragment_stream};
use super::TextProvider;
use crate::types::{Result, ScoutError};

const API_BASE: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

const KEY_HINT: &str =
    "Use a free provider (ollama, pollinations, groq) or add your key to the environment";

pub struct AnthropicProvider {
    api_key: SecretString,
    model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for AnthropicProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicProvider")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl AnthropicProvider {
    pub fn from_env(model: &str) -> Result<Self> {
        let key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| ScoutError::MissingCredential {
            name: "ANTHROPIC_API_KEY",
            hint: KEY_HINT,
        })?;
        Ok(Self::with_key(key, model))
    }

    pub fn with_key(api_key: impl Into<String>, model: &str) -> Self {
        let model = if model.trim().is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            model.trim().to_string()
        };
        Self {
            api_key: SecretString::from(api_key.into()),
            model,
            client: reqwest::Client::new(),
        }
    }

    async fn post(&self, prompt: &str, stream: bool) -> Result<reqwest::Response> {
        let url = format!("{API_BASE}/messages");
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: 4096,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            stream,
        };

        debug!("Sending request to Anthropic API");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| ScoutError::Api(format!("Anthropic request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ScoutError::Api(format!(
                "Anthropic API failed ({status}). {body}"
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl TextProvider for AnthropicProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        info!("Generating with Anthropic (model: {})", self.model);
        let response = self.post(prompt, false).await?;
        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ScoutError::Api(format!("Failed to parse Anthropic response: {e}")))?;

        Ok(body
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
            .unwrap_or_default())
    }

    async fn generate_stream(&self, prompt: &str) -> Result<FragmentStream> {
        info!("Streaming with Anthropic (model: {})", self.model);
        let response = self.post(prompt, true).await?;
        Ok(fragment_stream(
            response.bytes_stream(),
            "anthropic",
            parse_line,
        ))
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Only `content_block_delta` events with a `text_delta` payload yield
/// fragments; every other event kind is ignored.
fn parse_line(line: &str) -> LineEvent {
    let Some(data) = line.strip_prefix("data: ") else {
        return LineEvent::Skip;
    };
    match serde_json::from_str::<StreamEvent>(data) {
        Ok(event) => match event.event_type.as_str() {
            "content_block_delta" => event
                .delta
                .filter(|d| d.delta_type == "text_delta")
                .and_then(|d| d.text)
                .filter(|t| !t.is_empty())
                .map_or(LineEvent::Skip, LineEvent::Fragment),
            "message_stop" => LineEvent::Done,
            _ => LineEvent::Skip,
        },
        Err(_) => LineEvent::Skip,
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamEvent {
    #[serde(rename = "type")]
    event_type: String,
    delta: Option<EventDelta>,
}

#[derive(Debug, Deserialize)]
struct EventDelta {
    #[serde(rename = "type", default)]
    delta_type: String,
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_delta_events_yield_fragments() {
        let line =
            r#"data: {"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hi"}}"#;
        assert!(matches!(parse_line(line), LineEvent::Fragment(f) if f == "Hi"));
    }

    #[test]
    fn non_text_events_are_ignored() {
        let ping = r#"data: {"type":"ping"}"#;
        assert!(matches!(parse_line(ping), LineEvent::Skip));
        let tool =
            r#"data: {"type":"content_block_delta","delta":{"type":"input_json_delta","partial_json":"{"}}"#;
        assert!(matches!(parse_line(tool), LineEvent::Skip));
        assert!(matches!(parse_line("event: message_delta"), LineEvent::Skip));
    }

    #[test]
    fn message_stop_terminates() {
        let line = r#"data: {"type":"message_stop"}"#;
        assert!(matches!(parse_line(line), LineEvent::Done));
    }

    #[test]
    fn first_text_block_is_extracted() {
        let body = r#"{"content":[{"type":"tool_use","id":"x"},{"type":"text","text":"answer"}]}"#;
        let parsed: MessagesResponse = serde_json::from_str(body).unwrap();
        let text = parsed
            .content
            .into_iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text);
        assert_eq!(text.as_deref(), Some("answer"));
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let provider = AnthropicProvider::with_key("sk-ant-secret", "");
        assert_eq!(provider.model(), DEFAULT_MODEL);
        let debug = format!("{provider:?}");
        assert!(!debug.contains("sk-ant-secret"));
    }
}
