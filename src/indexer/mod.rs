//! Repository Indexer
//!
//! Walks a directory tree, applies ignore patterns, and reads eligible
//! text files into memory as flat records. Per-file failures (permissions,
//! non-UTF-8 content) skip that file; indexing as a whole never fails.
//! No size or count bound is enforced here — the context builder bounds
//! what actually reaches a prompt.

mod patterns;

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

pub use patterns::IgnorePatterns;

/// Extensions read as text. Files without a dot in their name are also read.
const TEXT_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "py", "rb", "go", "rs", "java", "kt", "c", "cpp",
    "h", "hpp", "cs", "php", "md", "json", "yaml", "yml", "html", "css", "scss",
];

/// One file read during an indexing pass. Never persisted; owned by the
/// pass that created it.
#[derive(Debug, Clone)]
pub struct IndexedFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub content: String,
    /// Lower-cased file extension, `None` for extension-less files.
    pub language: Option<String>,
}

/// Immutable result of one indexing pass.
#[derive(Debug, Clone)]
pub struct IndexResult {
    pub root: PathBuf,
    pub files: Vec<IndexedFile>,
    pub total_files: usize,
}

/// Index a repository: walk, exclude, read contents.
pub fn index(root: &Path, extra_exclude: &[String]) -> IndexResult {
    let patterns = IgnorePatterns::for_root(root, extra_exclude);
    let files = collect(root, &patterns)
        .into_iter()
        .filter_map(|path| read_indexed(root, path))
        .collect::<Vec<_>>();

    debug!("Indexed {} files under {}", files.len(), root.display());

    IndexResult {
        root: root.to_path_buf(),
        total_files: files.len(),
        files,
    }
}

/// Walk the tree, pruning excluded directories and keeping allow-listed
/// candidate files. Walk errors are skipped, never surfaced.
pub(crate) fn collect(root: &Path, patterns: &IgnorePatterns) -> Vec<PathBuf> {
    let filter_root = root.to_path_buf();
    let filter_patterns = patterns.clone();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let relative = entry
                .path()
                .strip_prefix(&filter_root)
                .unwrap_or(entry.path())
                .to_string_lossy();
            !filter_patterns.matches(&relative)
        })
        .build();

    walker
        .filter_map(|e| e.ok())
        .filter(|entry| entry.path().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(is_text_candidate)
        })
        .map(|entry| entry.into_path())
        .collect()
}

fn is_text_candidate(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => TEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => true,
    }
}

fn read_indexed(root: &Path, path: PathBuf) -> Option<IndexedFile> {
    // Binary or unreadable files are silently excluded.
    let content = String::from_utf8(fs::read(&path).ok()?).ok()?;
    let relative_path = path
        .strip_prefix(root)
        .unwrap_or(&path)
        .to_string_lossy()
        .replace('\\', "/");
    let language = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    Some(IndexedFile {
        path,
        relative_path,
        content,
        language,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, rel: &str, bytes: &[u8]) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn indexes_readable_allow_listed_files_only() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "README.md", b"# hello");
        write(dir.path(), "src/main.rs", b"fn main() {}");
        write(dir.path(), "logo.png", b"not text");
        write(dir.path(), "data.bin", &[0xff, 0xfe, 0x00, 0x80]);

        let result = index(dir.path(), &[]);
        let mut rels: Vec<_> = result.files.iter().map(|f| f.relative_path.as_str()).collect();
        rels.sort();
        assert_eq!(rels, vec!["README.md", "src/main.rs"]);
        assert_eq!(result.total_files, 2);
    }

    #[test]
    fn binary_content_in_text_extension_is_skipped_without_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "ok.ts", b"export const x = 1;");
        write(dir.path(), "bad.ts", &[0xc3, 0x28, 0x00]);

        let result = index(dir.path(), &[]);
        assert_eq!(result.total_files, 1);
        assert_eq!(result.files[0].relative_path, "ok.ts");
    }

    #[test]
    fn default_and_extra_excludes_prune_directories() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "node_modules/pkg/index.js", b"x");
        write(dir.path(), "generated/out.ts", b"x");
        write(dir.path(), "src/app.ts", b"x");

        let result = index(dir.path(), &["generated".to_string()]);
        assert_eq!(result.total_files, 1);
        assert_eq!(result.files[0].relative_path, "src/app.ts");
    }

    #[test]
    fn gitignore_patterns_apply() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ".gitignore", b"secret.md\n");
        write(dir.path(), "secret.md", b"hidden");
        write(dir.path(), "public.md", b"shown");

        let result = index(dir.path(), &[]);
        assert_eq!(result.total_files, 1);
        assert_eq!(result.files[0].relative_path, "public.md");
    }

    #[test]
    fn extensionless_files_are_read_with_no_language_tag() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Makefile", b"all:\n\ttrue");
        write(dir.path(), "src/lib.rs", b"pub fn f() {}");

        let result = index(dir.path(), &[]);
        let makefile = result
            .files
            .iter()
            .find(|f| f.relative_path == "Makefile")
            .unwrap();
        assert!(makefile.language.is_none());
        let lib = result
            .files
            .iter()
            .find(|f| f.relative_path == "src/lib.rs")
            .unwrap();
        assert_eq!(lib.language.as_deref(), Some("rs"));
    }

    #[test]
    fn missing_root_yields_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("does-not-exist");
        let result = index(&gone, &[]);
        assert_eq!(result.total_files, 0);
        assert!(result.files.is_empty());
    }
}
