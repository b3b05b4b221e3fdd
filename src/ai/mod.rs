//! Task Orchestration
//!
//! Composes a task-specific system instruction with the built context and
//! dispatches it through the provider abstraction. The provider instance
//! is constructed once per task invocation and owned by the caller; there
//! is no global client state. Only the ask task offers a streaming mode.

pub mod prompts;
pub mod provider;

pub use provider::{
    AnthropicProvider, FragmentStream, GroqProvider, OllamaProvider, PollinationsProvider,
    ProviderKind, TextProvider, create_provider,
};

use crate::types::Result;

/// Generate a three-section Markdown documentation body.
pub async fn generate_docs(provider: &dyn TextProvider, context: &str) -> Result<String> {
    provider
        .generate(&prompts::with_context(prompts::DOCS_SYSTEM, context))
        .await
}

/// Generate a Markdown bug report.
pub async fn generate_bugs(provider: &dyn TextProvider, context: &str) -> Result<String> {
    provider
        .generate(&prompts::with_context(prompts::BUGS_SYSTEM, context))
        .await
}

/// Answer a question about the codebase; full response at once.
pub async fn answer_question(
    provider: &dyn TextProvider,
    context: &str,
    question: &str,
) -> Result<String> {
    provider
        .generate(&prompts::ask_prompt(context, question))
        .await
}

/// Answer a question about the codebase, fragment by fragment.
pub async fn answer_question_stream(
    provider: &dyn TextProvider,
    context: &str,
    question: &str,
) -> Result<FragmentStream> {
    provider
        .generate_stream(&prompts::ask_prompt(context, question))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::stream;

    /// Test double that records the prompt it was handed.
    struct EchoProvider;

    #[async_trait]
    impl TextProvider for EchoProvider {
        async fn generate(&self, prompt: &str) -> Result<String> {
            Ok(prompt.to_string())
        }

        async fn generate_stream(&self, prompt: &str) -> Result<FragmentStream> {
            let fragments: Vec<Result<String>> =
                prompt.split(' ').take(3).map(|w| Ok(w.to_string())).collect();
            Ok(Box::pin(stream::iter(fragments)))
        }

        fn name(&self) -> &'static str {
            "echo"
        }

        fn model(&self) -> &str {
            "test"
        }
    }

    #[tokio::test]
    async fn docs_prompt_is_instruction_then_context() {
        let prompt = generate_docs(&EchoProvider, "CONTEXT").await.unwrap();
        assert!(prompt.starts_with("You are a technical writer."));
        assert!(prompt.ends_with("CONTEXT"));
    }

    #[tokio::test]
    async fn bugs_prompt_uses_the_report_instruction() {
        let prompt = generate_bugs(&EchoProvider, "CONTEXT").await.unwrap();
        assert!(prompt.starts_with("You are a static analysis assistant."));
    }

    #[tokio::test]
    async fn ask_stream_goes_through_the_streaming_path() {
        use futures::TryStreamExt;
        let s = answer_question_stream(&EchoProvider, "ctx", "why?")
            .await
            .unwrap();
        let fragments: Vec<String> = s.try_collect().await.unwrap();
        assert_eq!(fragments.len(), 3);
    }
}
