//! Git Change-Frequency Collaborator
//!
//! Shells out to `git log` to count how many commits touched each file.
//! Any failure (no repository, git missing, bad exit) yields an empty map.

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Commit count per repository-relative path.
pub fn change_stats(root: &Path) -> HashMap<String, usize> {
    if !root.join(".git").exists() {
        return HashMap::new();
    }

    let output = Command::new("git")
        .args(["log", "--name-only", "--pretty=format:", "--", "."])
        .current_dir(root)
        .output();

    let output = match output {
        Ok(out) if out.status.success() => out,
        Ok(out) => {
            debug!("git log exited with {}", out.status);
            return HashMap::new();
        }
        Err(e) => {
            debug!("git log failed to spawn: {}", e);
            return HashMap::new();
        }
    };

    let mut counts = HashMap::new();
    for line in String::from_utf8_lossy(&output.stdout).lines() {
        let file = line.trim();
        if file.is_empty() {
            continue;
        }
        *counts.entry(file.replace('\\', "/")).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_repository_yields_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        assert!(change_stats(dir.path()).is_empty());
    }
}
