//! Needs-linking operation.

use std::path::PathBuf;

use eyre::{Context, Result};
use ngpreset_passes::linker;

use crate::reports::{LinkingEntry, NeedsLinkingReport};

/// Check each file with the process-wide linking decision.
pub async fn needs_linking(files: &[PathBuf]) -> Result<NeedsLinkingReport> {
    let mut entries = Vec::with_capacity(files.len());

    for path in files {
        let source = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let display = path.to_string_lossy();
        let requires = linker::requires_linking(&display, &source).await?;

        entries.push(LinkingEntry {
            path: path.clone(),
            exempt: linker::is_linking_exempt(&display),
            requires_linking: requires,
        });
    }

    Ok(NeedsLinkingReport { entries })
}
