//! CodeScout - AI Codebase Assistant
//!
//! Indexes a repository, builds a compact text context from the most
//! relevant files, and runs documentation, bug-hunting, question-answering,
//! and module-mapping tasks against a pluggable LLM backend.
//!
//! ## Core Features
//!
//! - **Bounded Context**: relevance-ranked file selection with a fixed
//!   character budget, so prompts stay small on any repository size
//! - **Provider Abstraction**: Ollama, Groq, Pollinations, and Anthropic
//!   behind one trait, with blocking and streaming generation
//! - **Module Map**: import-dependency graph via tree-sitter, combined
//!   with git change-frequency statistics
//!
//! ## Quick Start
//!
//! ```ignore
//! use codescout::config::load_config;
//! use codescout::{ai, context, indexer};
//!
//! let config = load_config(&root);
//! let provider = ai::create_provider(&config)?;
//! let index = indexer::index(&root, &config.exclude);
//! let ctx = context::build_context(&index, context::TaskMode::Docs, None);
//! let docs = ai::generate_docs(provider.as_ref(), &ctx).await?;
//! ```
//!
//! ## Modules
//!
//! - [`indexer`]: file discovery, ignore patterns, text extraction
//! - [`context`]: task-aware ranking and budgeted rendering
//! - [`ai`]: provider abstraction, prompts, task orchestration
//! - [`graph`]: import-dependency module graph
//! - [`config`]: `.codescoutrc` loading with safe defaults

pub mod ai;
pub mod cli;
pub mod config;
pub mod context;
pub mod git;
pub mod graph;
pub mod indexer;
pub mod report;
pub mod types;

// Configuration
pub use config::{ScoutConfig, load_config};

// Error types
pub use types::{Result, ScoutError};

// Providers
pub use ai::{
    AnthropicProvider, FragmentStream, GroqProvider, OllamaProvider, PollinationsProvider,
    ProviderKind, TextProvider, create_provider,
};

// Indexing and context
pub use context::{TaskMode, build_context};
pub use indexer::{IndexResult, IndexedFile};

// Module graph
pub use graph::{ModuleGraph, ModuleImport, build_module_graph};
