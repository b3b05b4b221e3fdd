//! Bugs Command
//!
//! Index the repository, build a bugs-ranked context, and print the
//! generated report. Persisted to BUGS.md only when configured.

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
        "Analyzing for bugs with {} ({})",
        provider.name(),
        provider.model()
    ));

    let index = indexer::index(root, &config.exclude);
    let context = build_context(&index, TaskMode::Bugs, None);
    let bug_report = ai::generate_bugs(provider.as_ref(), &context).await?;

    if config.output.save_reports {
        let path = report::save_bug_report(root, &bug_report)?;
        out.success(&format!("Bug report written to {}", path.display()));
    }
    println!("{bug_report}");

    Ok(())
}
