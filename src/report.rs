//! Output Artifacts
//!
//! Fixed-name Markdown files written to the analyzed repository's root.

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::Result;

pub const DOCS_FILENAME: &str = "DOCS.md";
pub const BUGS_FILENAME: &str = "BUGS.md";

/// Write generated documentation to DOCS.md; returns the path written.
pub fn save_docs(root: &Path, content: &str) -> Result<PathBuf> {
    let path = root.join(DOCS_FILENAME);
    fs::write(&path, content)?;
    Ok(path)
}

/// Write the bug report to BUGS.md; returns the path written.
pub fn save_bug_report(root: &Path, content: &str) -> Result<PathBuf> {
    let path = root.join(BUGS_FILENAME);
    fs::write(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_land_at_the_repo_root() {
        let dir = tempfile::tempdir().unwrap();
        let docs = save_docs(dir.path(), "# Docs").unwrap();
        let bugs = save_bug_report(dir.path(), "# Bugs").unwrap();
        assert_eq!(std::fs::read_to_string(docs).unwrap(), "# Docs");
        assert!(bugs.ends_with(BUGS_FILENAME));
    }
}
