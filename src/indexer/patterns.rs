//! Ignore Pattern Handling
//!
//! Combines built-in defaults, the repository's `.gitignore`, and
//! caller-supplied excludes into one case-sensitive glob set. A pattern
//! without a slash also matches the final path segment, so `node_modules`
//! prunes the directory anywhere in the tree.

use std::fs;
use std::path::Path;

use glob::Pattern;
use tracing::debug;

/// Always excluded: dependency/build output, version control, logs, env files.
const DEFAULT_IGNORE: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".git",
    "*.log",
    ".env",
    ".env.*",
];

#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    patterns: Vec<Pattern>,
}

impl IgnorePatterns {
    /// Build the pattern set for a scan root: defaults ∪ `.gitignore` lines
    /// ∪ `extra`. Unparseable globs are dropped rather than failing the scan.
    pub fn for_root(root: &Path, extra: &[String]) -> Self {
        let mut raw: Vec<String> = DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect();
        raw.extend(load_ignore_file(root));
        raw.extend(extra.iter().cloned());

        let patterns = raw
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    debug!("Skipping invalid ignore pattern '{}': {}", p, e);
                    None
                }
            })
            .collect();

        Self { patterns }
    }

    #[cfg(test)]
    pub fn from_globs(globs: &[&str]) -> Self {
        Self {
            patterns: globs.iter().filter_map(|p| Pattern::new(p).ok()).collect(),
        }
    }

    /// Check whether a root-relative path is excluded.
    pub fn matches(&self, relative: &str) -> bool {
        let normalized = relative.replace('\\', "/");
        let base = normalized.rsplit('/').next().unwrap_or(&normalized);

        self.patterns.iter().any(|p| {
            p.matches(&normalized) || (!p.as_str().contains('/') && p.matches(base))
        })
    }
}

/// Parse `.gitignore`-style lines from the scan root. Comments and blank
/// lines are dropped; a missing or unreadable file contributes nothing.
fn load_ignore_file(root: &Path) -> Vec<String> {
    let Ok(content) = fs::read_to_string(root.join(".gitignore")) else {
        return Vec::new();
    };
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
