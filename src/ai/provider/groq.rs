//! Groq Cloud Backend
//!
//! OpenAI-compatible gateway with a free tier. Requires a bearer token
//! from `GROQ_API_KEY`; its absence is detected before any network call.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use super::openai_compat::{ChatRequest, ChatResponse, parse_sse_line};
use super::stream::{FragmentStream, fragment_stream};
use super::TextProvider;
use crate::types::{Result, ScoutError};

const API_BASE: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

const KEY_HINT: &str = "Get a free key at https://console.groq.com and add it to your environment";

pub struct GroqProvider {
    api_key: SecretString,
    model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GroqProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqProvider")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl GroqProvider {
    pub fn from_env(model: &str) -> Result<Self> {
        let key = std::env::var("GROQ_API_KEY").map_err(|_| ScoutError::MissingCredential {
            name: "GROQ_API_KEY",
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
        let url = format!("{API_BASE}/chat/completions");
        let request = ChatRequest::user_turn(&self.model, prompt, stream);

        debug!("Sending request to Groq API");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| ScoutError::Api(format!("Groq request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ScoutError::Api(format!(
                "Groq API failed ({status}). {KEY_HINT} — {body}"
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl TextProvider for GroqProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        info!("Generating with Groq (model: {})", self.model);
        let response = self.post(prompt, false).await?;
        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ScoutError::Api(format!("Failed to parse Groq response: {e}")))?;
        Ok(body.into_content())
    }

    async fn generate_stream(&self, prompt: &str) -> Result<FragmentStream> {
        info!("Streaming with Groq (model: {})", self.model);
        let response = self.post(prompt, true).await?;
        Ok(fragment_stream(
            response.bytes_stream(),
            "groq",
            parse_sse_line,
        ))
    }

    fn name(&self) -> &'static str {
        "groq"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_model_falls_back_to_default() {
        let provider = GroqProvider::with_key("k", " ");
        assert_eq!(provider.model(), DEFAULT_MODEL);
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let provider = GroqProvider::with_key("super-secret", "m");
        let debug = format!("{provider:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }
}
