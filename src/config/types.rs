//! Configuration Types
//!
//! Per-repository settings read from `.codescoutrc` at the analyzed root.
//! Every field is optional in the file; missing or malformed values fall
//! back to the built-in defaults, so loading never fails the caller.

use serde::{Deserialize, Serialize};

/// The four recognized provider identifiers.
pub const VALID_PROVIDERS: &[&str] = &["groq", "anthropic", "ollama", "pollinations"];

pub const DEFAULT_PROVIDER: &str = "groq";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_EXCLUDE: &[&str] = &["node_modules", "dist", ".git"];

/// Resolved configuration for one analyzed repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoutConfig {
    pub provider: String,
    pub model: String,
    pub exclude: Vec<String>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Persist generated bug reports to BUGS.md.
    #[serde(default)]
    pub save_reports: bool,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            output: OutputConfig::default(),
        }
    }
}

/// Raw shape of `.codescoutrc` before normalization.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub output: RawOutput,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawOutput {
    pub save_reports: Option<bool>,
}

/// Normalize a provider name against the recognized identifiers.
/// Unknown values fall back to the default provider.
pub fn normalize_provider(value: &str) -> String {
    let p = value.trim().to_lowercase();
    if VALID_PROVIDERS.contains(&p.as_str()) {
        p
    } else {
        DEFAULT_PROVIDER.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_case_insensitive() {
        assert_eq!(normalize_provider("Anthropic"), "anthropic");
        assert_eq!(normalize_provider("OLLAMA"), "ollama");
        assert_eq!(normalize_provider(" groq "), "groq");
    }

    #[test]
    fn unknown_provider_falls_back_to_default() {
        assert_eq!(normalize_provider("openai"), DEFAULT_PROVIDER);
        assert_eq!(normalize_provider(""), DEFAULT_PROVIDER);
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = ScoutConfig::default();
        assert_eq!(config.provider, "groq");
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.exclude, vec!["node_modules", "dist", ".git"]);
        assert!(!config.output.save_reports);
    }
}
