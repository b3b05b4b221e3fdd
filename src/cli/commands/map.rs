//! Map Command
//!
//! Render the import-dependency map. This task never touches a provider:
//! it combines the module graph with git change-frequency statistics.

use std::path::Path;

use console::style;

use crate::cli::output::Output;
use crate::config::load_config;
use crate::git;
use crate::graph::build_module_graph;
use crate::types::Result;

pub fn run(root: &Path) -> Result<()> {
    let out = Output::new();
    let config = load_config(root);

    let graph = build_module_graph(root, &config.exclude)?;
    let stats = git::change_stats(root);

    out.header(&format!("Module map: {}", root.display()));

    if graph.files.is_empty() {
        out.warning("No source files found.");
        return Ok(());
    }

    for file in &graph.files {
        let rel = relative(root, file);
        match stats.get(&rel) {
            Some(count) => println!(
                "{} {}",
                style(&rel).bold(),
                style(format!("({count} commits)")).dim()
            ),
            None => println!("{}", style(&rel).bold()),
        }
        for import in graph.imports.iter().filter(|i| &i.from == file) {
            println!(
                "  → {} {}",
                relative(root, &import.to),
                style(format!("[{}]", import.specifier)).dim()
            );
        }
    }

    println!();
    out.info(&format!(
        "{} files, {} resolved imports",
        graph.files.len(),
        graph.imports.len()
    ));

    Ok(())
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
