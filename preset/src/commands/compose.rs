use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use ngpreset_config::PresetToml;
use ngpreset_passes::PipelineOptions;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ComposeCommand {
    /// Path to preset.toml (defaults to ./preset.toml)
    #[arg(short, long, default_value = "preset.toml")]
    pub config: PathBuf,

    /// Directory to search for @babel/runtime (defaults to the config directory)
    #[arg(long)]
    pub runtime_dir: Option<PathBuf>,

    /// Print the pass list as JSON
    #[arg(long)]
    pub json: bool,
}

impl ComposeCommand {
    pub fn run(&self) -> Result<()> {
        let preset = PresetToml::open(&self.config).unwrap_or_exit();
        let options = PipelineOptions::from_preset(&preset).unwrap_or_exit();
        let report = ops::compose(&preset, options, self.runtime_dir.as_deref())?;

        if self.json {
            let json = serde_json::to_string_pretty(&report)
                .wrap_err("Failed to serialize pass list")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
