mod completions;
mod compose;
mod explain;
mod localize;
mod needs_linking;

use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use compose::ComposeCommand;
use eyre::Result;
use explain::ExplainCommand;
use localize::LocalizeCommand;
use needs_linking::NeedsLinkingCommand;

/// Extension trait for exiting on configuration errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for ngpreset_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "ngpreset")]
#[command(version)]
#[command(about = "Inspect the transform passes composed for an Angular build")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Compose(cmd) => cmd.run(),
            Commands::NeedsLinking(cmd) => cmd.run(),
            Commands::Localize(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the presets and plugins composed from preset.toml
    Compose(ComposeCommand),

    /// Report which files contain partial declarations to link
    NeedsLinking(NeedsLinkingCommand),

    /// Apply the translate and locale passes to source files
    Localize(LocalizeCommand),

    /// Explain the composer steps and what preset.toml enables
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
