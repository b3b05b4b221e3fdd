//! Context Builder
//!
//! Turns an indexed file set into a single bounded prompt fragment. Files
//! are ranked per task mode, the top 6 are selected, and a shared 2100
//! character budget is split evenly across the selected files. The budget
//! keeps the whole prompt inside the tightest backend's throughput quota,
//! so a small well-chosen set of files beats broad coverage.

use crate::indexer::{IndexResult, IndexedFile};

/// Fixed selection cap; ordering is the selection mechanism.
const MAX_CONTEXT_FILES: usize = 6;
/// Per-file share of the budget when all 6 slots are filled.
const MAX_FILE_CHARS: usize = 350;

pub const EMPTY_INDEX_PLACEHOLDER: &str = "(No files indexed)";
pub const TRUNCATION_MARKER: &str = "\n\n... (truncated)";

/// Extensions counted as source code when ranking for bug analysis.
const SOURCE_CODE_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".py", ".rb", ".go", ".rs", ".java", ".kt",
    ".c", ".cpp", ".h", ".hpp", ".cs", ".php",
];

/// The three provider-backed task kinds. Determines ranking and which
/// system instruction the orchestrator prepends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskMode {
    Docs,
    Bugs,
    Ask,
}

/// Build the prompt context for a task. `query` participates in ranking
/// for [`TaskMode::Ask`] only.
pub fn build_context(index: &IndexResult, mode: TaskMode, query: Option<&str>) -> String {
    if index.files.is_empty() {
        return EMPTY_INDEX_PLACEHOLDER.to_string();
    }

    let query = query.unwrap_or("").to_lowercase();
    let rank = |f: &IndexedFile| -> u8 {
        let rel = f.relative_path.to_lowercase();
        match mode {
            TaskMode::Docs => rank_docs(&rel),
            TaskMode::Bugs => rank_bugs(&rel),
            TaskMode::Ask => rank_ask(&rel, &query),
        }
    };

    // Stable sort: equal ranks keep indexer order.
    let mut sorted: Vec<&IndexedFile> = index.files.iter().collect();
    sorted.sort_by_key(|f| rank(f));
    let selected = &sorted[..sorted.len().min(MAX_CONTEXT_FILES)];

    render(selected)
}

fn rank_docs(rel: &str) -> u8 {
    if rel == "readme.md" || rel == "package.json" {
        0
    } else if rel.ends_with(".json") || rel.ends_with(".yaml") || rel.ends_with(".yml") {
        1
    } else if rel.contains("src") || rel.contains("lib") || rel.contains("app") {
        2
    } else {
        3
    }
}

fn rank_bugs(rel: &str) -> u8 {
    if rel.contains("src") || rel.contains("lib") || rel.contains("app") {
        0
    } else if SOURCE_CODE_EXTENSIONS.iter().any(|ext| rel.ends_with(ext)) {
        1
    } else {
        2
    }
}

fn rank_ask(rel: &str, query: &str) -> u8 {
    let auth_hit = query.contains("auth") && (rel.contains("auth") || rel.contains("login"));
    let payment_hit = query.contains("payment") && rel.contains("payment");
    if auth_hit || payment_hit {
        0
    } else if rel == "readme.md" || rel == "package.json" {
        1
    } else if rel.contains("src") || rel.contains("lib") {
        2
    } else {
        3
    }
}

/// Render selected files as fenced blocks under a per-file heading. The
/// total budget is divided by the *selected* count, so fewer files get a
/// larger per-file allowance.
fn render(selected: &[&IndexedFile]) -> String {
    let per_file = MAX_FILE_CHARS * MAX_CONTEXT_FILES / selected.len();
    let blocks: Vec<String> = selected
        .iter()
        .map(|f| {
            format!(
                "## {}\n```\n{}\n```\n",
                f.relative_path,
                truncate(&f.content, per_file)
            )
        })
        .collect();
    blocks.join("\n")
}

/// Truncate to a character budget, appending a visible marker when content
/// was cut. Character counts, not bytes: the budget is a length heuristic,
/// and slicing must never split a code point.
fn truncate(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let mut out: String = content.chars().take(max_chars).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}
