//! Docs Command
//!
//! Index the repository, build a docs-ranked context, and write the
//! generated documentation to DOCS.md.

use std::path::Path;

use crate::ai::{self, create_provider};
use crate::cli::output::Output;
use crate::config::load_config;
use crate::context::{TaskMode, build_context};
use crate::types::Result;
use crate::{indexer, report};

pub async fn run(root: &Path) -> Result<()> {
    let out = Output::new();
    let config = load_config(root);
    let provider = create_provider(&config)?;

    out.info(&format!(
        "Generating documentation with {} ({})",
        provider.name(),
        provider.model()
    ));

    let index = indexer::index(root, &config.exclude);
    let context = build_context(&index, TaskMode::Docs, None);
    let markdown = ai::generate_docs(provider.as_ref(), &context).await?;

    let path = report::save_docs(root, &markdown)?;
    out.success(&format!("Documentation written to {}", path.display()));
    println!("{markdown}");

    Ok(())
}
