//! Configuration Loader
//!
//! Reads `.codescoutrc` (JSON) from the analyzed repository's root. The
//! loader never fails: a missing file, unreadable file, or parse error all
//! yield the built-in defaults, and individual fields fall back
//! independently.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::types::{RawConfig, ScoutConfig, normalize_provider};

pub const CONFIG_FILENAME: &str = ".codescoutrc";

/// Load configuration for the repository at `root`.
pub fn load_config(root: &Path) -> ScoutConfig {
    let path = root.join(CONFIG_FILENAME);

    let Ok(content) = fs::read_to_string(&path) else {
        debug!("No config at {}, using defaults", path.display());
        return ScoutConfig::default();
    };

    match serde_json::from_str::<RawConfig>(&content) {
        Ok(raw) => {
            debug!("Loaded config from {}", path.display());
            merge(raw)
        }
        Err(e) => {
            debug!("Invalid config at {} ({}), using defaults", path.display(), e);
            ScoutConfig::default()
        }
    }
}

fn merge(raw: RawConfig) -> ScoutConfig {
    let defaults = ScoutConfig::default();

    let model = raw
        .model
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or(defaults.model);

    ScoutConfig {
        provider: normalize_provider(raw.provider.as_deref().unwrap_or(&defaults.provider)),
        model,
        exclude: raw.exclude.unwrap_or(defaults.exclude),
        output: super::types::OutputConfig {
            save_reports: raw.output.save_reports.unwrap_or(false),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn absent_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path());
        assert_eq!(config, ScoutConfig::default());
    }

    #[test]
    fn malformed_json_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{not json").unwrap();
        let config = load_config(dir.path());
        assert_eq!(config, ScoutConfig::default());
    }

    #[test]
    fn partial_file_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"provider": "Anthropic", "output": {"save_reports": true}}"#,
        )
        .unwrap();
        let config = load_config(dir.path());
        assert_eq!(config.provider, "anthropic");
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.exclude, vec!["node_modules", "dist", ".git"]);
        assert!(config.output.save_reports);
    }

    #[test]
    fn unrecognized_provider_normalizes_to_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"provider": "gpt-5", "model": "  "}"#,
        )
        .unwrap();
        let config = load_config(dir.path());
        assert_eq!(config.provider, "groq");
        // Blank model also falls back
        assert_eq!(config.model, "llama-3.1-8b-instant");
    }
}
