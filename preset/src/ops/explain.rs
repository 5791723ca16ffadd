//! Explain operation - what each composer step does for a preset.toml.

use std::path::Path;

use eyre::{Context, Result};
use ngpreset_config::PresetToml;
use ngpreset_passes::{PassComposer, PipelineOptions, browsers};

use crate::reports::{ExplainReport, StepSummary};

/// Execute the explain operation.
///
/// A step is reported as enabled when it adds passes for this preset.
pub fn explain(
    preset: &PresetToml,
    options: PipelineOptions,
    runtime_dir: Option<&Path>,
) -> Result<ExplainReport> {
    let composer = PassComposer::new(super::locate_runtime(preset, runtime_dir)?);
    let (_, outcomes) = composer
        .compose_traced(&options)
        .wrap_err("Failed to compose passes")?;

    let steps = outcomes
        .iter()
        .map(|outcome| StepSummary {
            name: outcome.info.name.to_string(),
            description: outcome.info.description.to_string(),
            enabled: outcome.contributed(),
        })
        .collect();

    let affected_browsers = match &options.supported_browsers {
        Some(entries) => {
            let affected = browsers::safari_class_field_scope_bug_browsers()
                .wrap_err("Failed to resolve affected browsers")?;
            let queries: Vec<&str> = entries.iter().map(String::as_str).collect();
            composer
                .env()
                .browser_resolver
                .resolve(&queries)
                .wrap_err("Failed to resolve supported browsers")?
                .into_iter()
                .filter(|target| affected.contains(target))
                .collect()
        }
        None => Vec::new(),
    };

    let config = preset.config();
    Ok(ExplainReport {
        config_path: preset.path().to_path_buf(),
        steps,
        affected_browsers,
        locale: config.i18n.as_ref().map(|i18n| i18n.locale.clone()),
        missing_translation: config.missing_translation().to_string(),
    })
}
