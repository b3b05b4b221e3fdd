//! Unified Error Type System
//!
//! Single error type for the whole application. Failures split into two
//! families: indexing and config problems are absorbed where they occur
//! (degrade to defaults or skip the file), while provider failures abort
//! the current task and surface to the caller. Only the abort family is
//! represented here; skip-and-continue paths use `Option` at the call site.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoutError>;

#[derive(Debug, Error)]
pub enum ScoutError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    /// Required credential missing from the environment. Raised before any
    /// network call is attempted.
    #[error("{name} is not set. {hint}")]
    MissingCredential {
        name: &'static str,
        hint: &'static str,
    },

    // -------------------------------------------------------------------------
    // Provider Errors
    // -------------------------------------------------------------------------
    /// Transport failure or non-2xx status from an LLM backend. Fatal for
    /// the current task; never retried.
    #[error("LLM API error: {0}")]
    Api(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Parse error in {path}: {message}")]
    Parse { message: String, path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_message_names_variable_and_remedy() {
        let err = ScoutError::MissingCredential {
            name: "GROQ_API_KEY",
            hint: "Get a free key at https://console.groq.com",
        };
        let msg = err.to_string();
        assert!(msg.contains("GROQ_API_KEY"));
        assert!(msg.contains("console.groq.com"));
    }

    #[test]
    fn api_error_carries_detail() {
        let err = ScoutError::Api("Groq API failed (500). boom".to_string());
        assert!(err.to_string().contains("500"));
    }
}
