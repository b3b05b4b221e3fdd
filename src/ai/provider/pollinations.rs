//! Pollinations Cloud Backend
//!
//! OpenAI-compatible gateway that requires no credential at all. Anonymous
//! tier rate limits apply.

use async_trait::async_trait;
use tracing::{debug, info};

use super::openai_compat::{ChatRequest, ChatResponse, parse_sse_line};
use super::stream::{FragmentStream, fragment_stream};
use super::TextProvider;
use crate::types::{Result, ScoutError};

const API_URL: &str = "https://text.pollinations.ai/openai";
const DEFAULT_MODEL: &str = "openai";

pub struct PollinationsProvider {
    model: String,
    client: reqwest::Client,
}

impl PollinationsProvider {
    pub fn new(model: &str) -> Self {
        let model = if model.trim().is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            model.trim().to_string()
        };
        Self {
            model,
            client: reqwest::Client::new(),
        }
    }

    async fn post(&self, prompt: &str, stream: bool) -> Result<reqwest::Response> {
        let request = ChatRequest::user_turn(&self.model, prompt, stream);

        debug!("Sending request to Pollinations API");

        let response = self
            .client
            .post(API_URL)
            .json(&request)
            .send()
            .await
            .map_err(|e| ScoutError::Api(format!("Pollinations request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ScoutError::Api(format!(
                "Pollinations API failed ({status}). {body}"
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl TextProvider for PollinationsProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        info!("Generating with Pollinations (model: {})", self.model);
        let response = self.post(prompt, false).await?;
        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ScoutError::Api(format!("Failed to parse Pollinations response: {e}")))?;
        Ok(body.into_content())
    }

    async fn generate_stream(&self, prompt: &str) -> Result<FragmentStream> {
        info!("Streaming with Pollinations (model: {})", self.model);
        let response = self.post(prompt, true).await?;
        Ok(fragment_stream(
            response.bytes_stream(),
            "pollinations",
            parse_sse_line,
        ))
    }

    fn name(&self) -> &'static str {
        "pollinations"
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
        assert_eq!(PollinationsProvider::new("").model(), DEFAULT_MODEL);
        assert_eq!(PollinationsProvider::new("mistral").model(), "mistral");
    }
}
