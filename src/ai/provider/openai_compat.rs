//! OpenAI-Compatible Chat Wire Format
//!
//! Request/response shapes shared by the gateway-style cloud backends
//! (Groq and Pollinations): a single-user-turn `messages` array in, either
//! `choices[0].message.content` (blocking) or SSE `data:` lines carrying
//! `choices[0].delta.content` terminated by `data: [DONE]` (streaming).

use serde::{Deserialize, Serialize};

use super::stream::LineEvent;

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatRequest {
    pub fn user_turn(model: &str, prompt: &str, stream: bool) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            max_tokens: 4096,
            stream,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// First choice's message content, trimmed. Missing content is an
    /// empty response, not an error.
    pub fn into_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

/// Parse one SSE line. Non-`data:` lines and malformed payloads are
/// skipped, never fatal.
pub(crate) fn parse_sse_line(line: &str) -> LineEvent {
    let Some(data) = line.strip_prefix("data: ") else {
        return LineEvent::Skip;
    };
    if data == "[DONE]" {
        return LineEvent::Done;
    }
    match serde_json::from_str::<StreamChunk>(data) {
        Ok(chunk) => chunk
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.delta.content)
            .filter(|c| !c.is_empty())
            .map_or(LineEvent::Skip, LineEvent::Fragment),
        Err(_) => LineEvent::Skip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(line: &str) -> Option<String> {
        match parse_sse_line(line) {
            LineEvent::Fragment(f) => Some(f),
            _ => None,
        }
    }

    #[test]
    fn delta_content_becomes_fragment() {
        let line = r#"data: {"choices":[{"delta":{"content":"Hel"}}]}"#;
        assert_eq!(fragment(line).as_deref(), Some("Hel"));
    }

    #[test]
    fn done_sentinel_terminates() {
        assert!(matches!(parse_sse_line("data: [DONE]"), LineEvent::Done));
    }

    #[test]
    fn non_data_and_malformed_lines_are_skipped() {
        assert!(matches!(parse_sse_line(""), LineEvent::Skip));
        assert!(matches!(parse_sse_line(": keep-alive"), LineEvent::Skip));
        assert!(matches!(parse_sse_line("data: {broken"), LineEvent::Skip));
        assert!(matches!(
            parse_sse_line(r#"data: {"choices":[{"delta":{}}]}"#),
            LineEvent::Skip
        ));
    }

    #[test]
    fn blocking_response_extracts_first_choice() {
        let body = r#"{"choices":[{"message":{"content":"  answer  "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_content(), "answer");
    }

    #[test]
    fn request_shape_is_single_user_turn() {
        let req = ChatRequest::user_turn("m", "hi", true);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
        assert_eq!(json["max_tokens"], 4096);
        assert_eq!(json["stream"], true);
    }
}
