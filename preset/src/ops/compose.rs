//! Compose operation - builds the pass list for a preset.toml.

use std::path::Path;

use eyre::{Context, Result};
use ngpreset_config::PresetToml;
use ngpreset_passes::{PassComposer, PipelineOptions};

use crate::reports::ComposeReport;

/// Execute the compose operation.
pub fn compose(
    preset: &PresetToml,
    options: PipelineOptions,
    runtime_dir: Option<&Path>,
) -> Result<ComposeReport> {
    let runtime_package = super::locate_runtime(preset, runtime_dir)?;
    let passes = PassComposer::new(runtime_package)
        .compose(&options)
        .wrap_err("Failed to compose passes")?;
    let description = passes.describe();

    Ok(ComposeReport {
        config_path: preset.path().to_path_buf(),
        presets: description.presets,
        plugins: description.plugins,
    })
}
