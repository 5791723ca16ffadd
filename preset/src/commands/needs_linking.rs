use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct NeedsLinkingCommand {
    /// Files to inspect
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl NeedsLinkingCommand {
    pub fn run(&self) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread().build()?;
        let report = runtime.block_on(ops::needs_linking(&self.files))?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
