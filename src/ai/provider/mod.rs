//! LLM Provider Abstraction
//!
//! One contract over four interchangeable backends: a local daemon
//! (Ollama), two OpenAI-compatible cloud gateways (Groq, Pollinations),
//! and the Anthropic vendor transport. Every backend offers a blocking
//! call and an incrementally-streamed call; all are fail-fast with no
//! retries.

mod anthropic;
mod groq;
mod ollama;
mod openai_compat;
mod pollinations;
mod stream;

pub use anthropic::AnthropicProvider;
pub use groq::GroqProvider;
pub use ollama::OllamaProvider;
pub use pollinations::PollinationsProvider;
pub use stream::FragmentStream;

use async_trait::async_trait;

use crate::config::ScoutConfig;
use crate::types::Result;

/// Text generation contract shared by all backends.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send the full prompt and wait for the complete response.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Send the full prompt and return fragments as they arrive. The
    /// fragments' concatenation matches the blocking-path result for the
    /// same request, modulo provider non-determinism. A non-2xx status
    /// errors here, before any fragment is yielded.
    async fn generate_stream(&self, prompt: &str) -> Result<FragmentStream>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Model identifier in use (after default fallback).
    fn model(&self) -> &str;
}

/// The enumerated provider identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Ollama,
    Groq,
    Pollinations,
    Anthropic,
}

impl ProviderKind {
    /// Case-insensitive lookup. Unrecognized or empty names fall back to
    /// the local daemon.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "groq" => Self::Groq,
            "pollinations" => Self::Pollinations,
            "anthropic" => Self::Anthropic,
            _ => Self::Ollama,
        }
    }
}

/// Construct the configured backend. Credential checks happen here, before
/// any network call. The returned provider owns its HTTP client and is
/// reused for every call within the task invocation.
pub fn create_provider(config: &ScoutConfig) -> Result<Box<dyn TextProvider>> {
    match ProviderKind::from_name(&config.provider) {
        ProviderKind::Ollama => Ok(Box::new(OllamaProvider::new(&config.model)?)),
        ProviderKind::Groq => Ok(Box::new(GroqProvider::from_env(&config.model)?)),
        ProviderKind::Pollinations => Ok(Box::new(PollinationsProvider::new(&config.model))),
        ProviderKind::Anthropic => Ok(Box::new(AnthropicProvider::from_env(&config.model)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_is_case_insensitive() {
        assert_eq!(ProviderKind::from_name("GROQ"), ProviderKind::Groq);
        assert_eq!(ProviderKind::from_name("Anthropic"), ProviderKind::Anthropic);
        assert_eq!(
            ProviderKind::from_name(" pollinations "),
            ProviderKind::Pollinations
        );
        assert_eq!(ProviderKind::from_name("ollama"), ProviderKind::Ollama);
    }

    #[test]
    fn unrecognized_or_absent_name_falls_back_to_ollama() {
        assert_eq!(ProviderKind::from_name(""), ProviderKind::Ollama);
        assert_eq!(ProviderKind::from_name("openai"), ProviderKind::Ollama);
    }
}
