//! Operations behind the CLI commands.
//!
//! Each operation gathers data into a report; commands decide how to render it.

mod compose;
mod explain;
mod localize;
mod needs_linking;

use std::path::Path;

pub use compose::compose;
use eyre::{Context, Result};
pub use explain::explain;
pub use localize::localize;
pub use needs_linking::needs_linking;
use ngpreset_config::PresetToml;
use ngpreset_passes::runtime::RuntimeHelperPackage;

/// Find `@babel/runtime` above `runtime_dir`, or above the config directory.
fn locate_runtime(preset: &PresetToml, runtime_dir: Option<&Path>) -> Result<RuntimeHelperPackage> {
    let search_from = runtime_dir.unwrap_or_else(|| preset.base_dir());
    let search_from = std::fs::canonicalize(search_from)
        .wrap_err_with(|| format!("Failed to resolve {}", search_from.display()))?;
    RuntimeHelperPackage::locate(&search_from)
        .wrap_err("Runtime helpers are required to compose passes")
}
