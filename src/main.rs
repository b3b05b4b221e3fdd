use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "codescout")]
#[command(version, about = "AI assistant for exploring and documenting codebases")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Repository to analyze
    #[arg(long, short, global = true, default_value = ".")]
    path: PathBuf,

    /// Force plain, non-styled output
    #[arg(long, global = true)]
    plain: bool,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Markdown documentation (writes DOCS.md)
    Docs,

    /// Scan for likely bugs and print a report
    Bugs,

    /// Ask a question about the codebase (streams the answer)
    Ask {
        #[arg(help = "Question to answer")]
        question: Option<String>,
    },

    /// Print the import-dependency module map
    Map,
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", console::style("Error:").red(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.plain {
        console::set_colors_enabled(false);
    }

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let root = cli.path;

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Docs => {
            let rt = Runtime::new()?;
            rt.block_on(codescout::cli::commands::docs::run(&root))?;
        }
        Commands::Bugs => {
            let rt = Runtime::new()?;
            rt.block_on(codescout::cli::commands::bugs::run(&root))?;
        }
        Commands::Ask { question } => {
            let Some(question) = question else {
                println!("Provide a question: codescout ask \"How does auth work?\"");
                return Ok(());
            };
            let rt = Runtime::new()?;
            rt.block_on(codescout::cli::commands::ask::run(&root, &question))?;
        }
        Commands::Map => {
            codescout::cli::commands::map::run(&root)?;
        }
    }

    Ok(())
}
