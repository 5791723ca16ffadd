use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use ngpreset_config::PresetToml;
use ngpreset_passes::PipelineOptions;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    /// Path to preset.toml (defaults to ./preset.toml)
    #[arg(short, long, default_value = "preset.toml")]
    pub config: PathBuf,

    /// Directory to search for @babel/runtime (defaults to the config directory)
    #[arg(long)]
    pub runtime_dir: Option<PathBuf>,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let preset = PresetToml::open(&self.config).unwrap_or_exit();
        let options = PipelineOptions::from_preset(&preset).unwrap_or_exit();
        let report = ops::explain(&preset, options, self.runtime_dir.as_deref())?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
