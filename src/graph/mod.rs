//! Module Graph Builder
//!
//! Builds a file-level dependency graph for the map view by parsing
//! top-level import declarations with tree-sitter. Only statically
//! resolvable relative imports within the scanned set become edges;
//! package imports and unresolvable specifiers are silently omitted.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use tree_sitter::{Node, Parser as TsParser};

use crate::indexer::{self, IgnorePatterns};
use crate::types::{Result, ScoutError};

/// Extensions participating in the module graph.
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// One import edge: `from` imports `to`. The specifier describes what was
/// imported: the default-import name, the comma-joined named imports, or
/// `*` when neither is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleImport {
    pub from: PathBuf,
    pub to: PathBuf,
    pub specifier: String,
}

/// Files as nodes, imports as edges.
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    pub files: Vec<PathBuf>,
    pub imports: Vec<ModuleImport>,
}

/// Discover source files under `root` and parse their import statements.
/// Unreadable or unparseable files contribute no edges but do not fail
/// the build.
pub fn build_module_graph(root: &Path, exclude: &[String]) -> Result<ModuleGraph> {
    let patterns = IgnorePatterns::for_root(root, exclude);
    let files: Vec<PathBuf> = indexer::collect(root, &patterns)
        .into_iter()
        .filter(|p| is_source_file(p))
        .collect();
    let file_set: HashSet<PathBuf> = files.iter().cloned().collect();

    let mut imports = Vec::new();
    for file in &files {
        let Ok(content) = fs::read_to_string(file) else {
            continue;
        };
        match parse_imports(file, &content, &file_set) {
            Ok(mut edges) => imports.append(&mut edges),
            Err(e) => debug!("Skipping {}: {}", file.display(), e),
        }
    }

    Ok(ModuleGraph { files, imports })
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Parse one file's top-level import declarations into edges.
fn parse_imports(
    path: &Path,
    content: &str,
    files: &HashSet<PathBuf>,
) -> Result<Vec<ModuleImport>> {
    let mut parser = TsParser::new();
    let language = if matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx") | Some("jsx")
    ) {
        tree_sitter_typescript::LANGUAGE_TSX
    } else {
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT
    };
    parser
        .set_language(&language.into())
        .map_err(|e| ScoutError::Parse {
            message: format!("Failed to set TypeScript language: {e}"),
            path: path.display().to_string(),
        })?;

    let tree = parser.parse(content, None).ok_or_else(|| ScoutError::Parse {
        message: "Failed to parse source file".to_string(),
        path: path.display().to_string(),
    })?;

    let root = tree.root_node();
    let mut edges = Vec::new();

    // Only direct children of the program node: top-level imports.
    for i in 0..root.named_child_count() {
        let Some(node) = root.named_child(i) else {
            continue;
        };
        if node.kind() != "import_statement" {
            continue;
        }
        let Some(source) = node.child_by_field_name("source") else {
            continue;
        };
        let raw = source.utf8_text(content.as_bytes()).unwrap_or("");
        let spec = raw.trim_matches(|c| c == '"' || c == '\'');

        if !spec.starts_with('.') {
            continue;
        }
        let Some(resolved) = resolve_import(path, spec, files) else {
            continue;
        };

        edges.push(ModuleImport {
            from: path.to_path_buf(),
            to: resolved,
            specifier: imported_symbols(node, content),
        });
    }

    Ok(edges)
}

/// Describe what an import statement binds: the default-import identifier,
/// the comma-joined named-import list, or `*`.
fn imported_symbols(import: Node, content: &str) -> String {
    let bytes = content.as_bytes();

    for i in 0..import.named_child_count() {
        let Some(clause) = import.named_child(i) else {
            continue;
        };
        if clause.kind() != "import_clause" {
            continue;
        }

        let mut named: Vec<String> = Vec::new();
        for j in 0..clause.named_child_count() {
            let Some(binding) = clause.named_child(j) else {
                continue;
            };
            match binding.kind() {
                // `import name from "..."`
                "identifier" => {
                    if let Ok(name) = binding.utf8_text(bytes) {
                        return name.to_string();
                    }
                }
                // `import { a, b } from "..."`
                "named_imports" => {
                    for k in 0..binding.named_child_count() {
                        let Some(spec) = binding.named_child(k) else {
                            continue;
                        };
                        if spec.kind() == "import_specifier"
                            && let Some(name) = spec.child_by_field_name("name")
                            && let Ok(text) = name.utf8_text(bytes)
                        {
                            named.push(text.to_string());
                        }
                    }
                }
                _ => {}
            }
        }
        if !named.is_empty() {
            return named.join(", ");
        }
    }

    "*".to_string()
}

/// Resolve a relative specifier against the discovered file set: exact
/// path, then path + each known extension, then a same-directory basename
/// match ignoring extension.
fn resolve_import(from: &Path, spec: &str, files: &HashSet<PathBuf>) -> Option<PathBuf> {
    let dir = from.parent().unwrap_or(Path::new(""));
    let candidate = normalize(&dir.join(spec));

    if files.contains(&candidate) {
        return Some(candidate);
    }

    let has_ext = SOURCE_EXTENSIONS
        .iter()
        .any(|ext| spec.ends_with(&format!(".{ext}")));
    if !has_ext {
        for ext in SOURCE_EXTENSIONS {
            let mut with_ext = candidate.as_os_str().to_owned();
            with_ext.push(format!(".{ext}"));
            let with_ext = PathBuf::from(with_ext);
            if files.contains(&with_ext) {
                return Some(with_ext);
            }
        }
    }

    let spec_path = Path::new(spec);
    let stem = spec_path.file_stem()?.to_owned();
    let spec_dir = normalize(&dir.join(spec_path.parent().unwrap_or(Path::new(""))));
    files
        .iter()
        .find(|f| {
            f.file_stem().is_some_and(|s| s == stem.as_os_str())
                && f.parent() == Some(spec_dir.as_path())
        })
        .cloned()
}

/// Lexically remove `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn edge_to<'a>(graph: &'a ModuleGraph, from_rel: &str) -> Option<&'a ModuleImport> {
        graph
            .imports
            .iter()
            .find(|i| i.from.to_string_lossy().ends_with(from_rel))
    }

    #[test]
    fn relative_import_resolves_by_appending_extension() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.ts", r#"import helper from "./b";"#);
        write(dir.path(), "b.ts", "export default 1;");

        let graph = build_module_graph(dir.path(), &[]).unwrap();
        let edge = edge_to(&graph, "a.ts").expect("edge from a.ts");
        assert!(edge.to.to_string_lossy().ends_with("b.ts"));
        assert_eq!(edge.specifier, "helper");
    }

    #[test]
    fn package_imports_produce_no_edge() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.ts", r#"import React from "react";"#);
        write(dir.path(), "b.ts", "export {};");

        let graph = build_module_graph(dir.path(), &[]).unwrap();
        assert_eq!(graph.files.len(), 2);
        assert!(graph.imports.is_empty());
    }

    #[test]
    fn named_imports_join_with_commas() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.ts", r#"import { first, second } from "./b";"#);
        write(dir.path(), "b.ts", "export const first = 1; export const second = 2;");

        let graph = build_module_graph(dir.path(), &[]).unwrap();
        assert_eq!(edge_to(&graph, "a.ts").unwrap().specifier, "first, second");
    }

    #[test]
    fn side_effect_import_uses_wildcard_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.ts", r#"import "./b";"#);
        write(dir.path(), "b.ts", "export {};");

        let graph = build_module_graph(dir.path(), &[]).unwrap();
        assert_eq!(edge_to(&graph, "a.ts").unwrap().specifier, "*");
    }

    #[test]
    fn basename_match_ignores_extension_mismatch() {
        // Emitted-JS style specifier pointing at a TS source file.
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.ts", r#"import { x } from "./b.js";"#);
        write(dir.path(), "b.ts", "export const x = 1;");

        let graph = build_module_graph(dir.path(), &[]).unwrap();
        let edge = edge_to(&graph, "a.ts").unwrap();
        assert!(edge.to.to_string_lossy().ends_with("b.ts"));
    }

    #[test]
    fn parent_directory_imports_resolve() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/deep/a.ts", r#"import util from "../util";"#);
        write(dir.path(), "src/util.ts", "export default {};");

        let graph = build_module_graph(dir.path(), &[]).unwrap();
        let edge = edge_to(&graph, "a.ts").unwrap();
        assert!(edge.to.to_string_lossy().ends_with("src/util.ts"));
    }

    #[test]
    fn unresolvable_relative_import_is_silently_dropped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.ts", r#"import gone from "./missing";"#);

        let graph = build_module_graph(dir.path(), &[]).unwrap();
        assert!(graph.imports.is_empty());
    }

    #[test]
    fn excluded_directories_are_not_scanned() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "node_modules/lib/index.js", "module.exports = {};");
        write(dir.path(), "a.tsx", "export const App = () => null;");

        let graph = build_module_graph(dir.path(), &[]).unwrap();
        assert_eq!(graph.files.len(), 1);
    }
}
