//! Ask Command
//!
//! Answer a free-form question about the codebase, streaming fragments to
//! stdout as they arrive. Fragments already printed stay visible when the
//! stream fails mid-way; the error is reported after them.

use std::io::Write;
use std::path::Path;

use futures::TryStreamExt;

use crate::ai::{self, create_provider};
use crate::config::load_config;
use crate::context::{TaskMode, build_context};
use crate::indexer;
use crate::types::Result;

pub async fn run(root: &Path, question: &str) -> Result<()> {
    let config = load_config(root);
    let provider = create_provider(&config)?;

    let index = indexer::index(root, &config.exclude);
    let context = build_context(&index, TaskMode::Ask, Some(question));

    let mut fragments =
        ai::answer_question_stream(provider.as_ref(), &context, question).await?;

    let mut stdout = std::io::stdout();
    loop {
        match fragments.try_next().await {
            Ok(Some(fragment)) => {
                print!("{fragment}");
                stdout.flush()?;
            }
            Ok(None) => break,
            Err(e) => {
                // Keep partial output on screen; surface the failure after it.
                println!();
                return Err(e);
            }
        }
    }
    println!();

    Ok(())
}
