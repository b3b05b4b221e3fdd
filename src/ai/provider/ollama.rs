//! Ollama Local Daemon Backend
//!
//! Free, local, no API key. Blocking mode requests a complete response;
//! streaming mode reads newline-delimited JSON objects, one fragment each.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::stream::{FragmentStream, LineEvent, fragment_stream};
use super::TextProvider;
use crate::types::{Result, ScoutError};

const DEFAULT_API_BASE: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.2";

pub struct OllamaProvider {
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    /// Endpoint comes from `OLLAMA_HOST` when set, localhost otherwise.
    /// A blank model falls back to the backend default.
    pub fn new(model: &str) -> Result<Self> {
        let api_base =
            std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let api_base = validate_endpoint(&api_base)?;
        let model = if model.trim().is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            model.trim().to_string()
        };

        Ok(Self {
            api_base,
            model,
            client: reqwest::Client::new(),
        })
    }

    async fn post(&self, prompt: &str, stream: bool) -> Result<reqwest::Response> {
        let url = format!("{}/api/generate", self.api_base);
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream,
        };

        debug!("Sending request to Ollama at {}", url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ScoutError::Api(format!(
                        "Failed to connect to Ollama at {}. Is Ollama running? \
                         Run `ollama serve` and `ollama pull {}`.",
                        self.api_base, self.model
                    ))
                } else {
                    ScoutError::Api(format!("Ollama request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ScoutError::Api(format!(
                "Ollama request failed ({status}). Is Ollama running? \
                 Run `ollama serve` and `ollama pull {}`. {body}",
                self.model
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl TextProvider for OllamaProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        info!("Generating with Ollama (model: {})", self.model);
        let response = self.post(prompt, false).await?;
        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ScoutError::Api(format!("Failed to parse Ollama response: {e}")))?;
        Ok(body.response.unwrap_or_default().trim().to_string())
    }

    async fn generate_stream(&self, prompt: &str) -> Result<FragmentStream> {
        info!("Streaming with Ollama (model: {})", self.model);
        let response = self.post(prompt, true).await?;
        Ok(fragment_stream(
            response.bytes_stream(),
            "ollama",
            parse_line,
        ))
    }

    fn name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Only http/https endpoints are accepted; non-localhost hosts get a
/// warning since the daemon is expected to run locally.
fn validate_endpoint(endpoint: &str) -> Result<String> {
    let url = url::Url::parse(endpoint)
        .map_err(|e| ScoutError::Config(format!("Invalid Ollama endpoint '{endpoint}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ScoutError::Config(format!(
            "Ollama endpoint must use http or https scheme, got: {}",
            url.scheme()
        )));
    }

    if let Some(host) = url.host_str()
        && !matches!(host, "localhost" | "127.0.0.1" | "::1")
    {
        warn!(
            "Ollama endpoint is not localhost: {}. Ensure this is intentional.",
            host
        );
    }

    let mut result = url.to_string();
    if result.ends_with('/') {
        result.pop();
    }
    Ok(result)
}

fn parse_line(line: &str) -> LineEvent {
    if line.trim().is_empty() {
        return LineEvent::Skip;
    }
    match serde_json::from_str::<StreamChunk>(line) {
        Ok(chunk) => {
            if let Some(fragment) = chunk.response.filter(|r| !r.is_empty()) {
                LineEvent::Fragment(fragment)
            } else if chunk.done.unwrap_or(false) {
                LineEvent::Done
            } else {
                LineEvent::Skip
            }
        }
        Err(_) => LineEvent::Skip,
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    response: Option<String>,
    #[serde(default)]
    done: Option<bool>,
}
