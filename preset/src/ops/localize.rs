//! Localize operation - applies the translate and locale passes to files.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use eyre::{Context, Result};
use ngpreset_config::PresetToml;
use ngpreset_core::Severity;
use ngpreset_passes::{
    PassComposer, PipelineOptions,
    i18n::{LocalePlugin, TranslatePlugin},
};

use crate::reports::{LocalizeReport, LocalizedFile};

/// Execute the localize operation.
///
/// Each file is rewritten into `out_dir` under its own file name. Problems
/// are logged as they are reported and collected into the report.
pub fn localize(
    preset: &PresetToml,
    options: PipelineOptions,
    runtime_dir: Option<&Path>,
    files: &[PathBuf],
    out_dir: &Path,
) -> Result<LocalizeReport> {
    let Some(locale) = options.i18n.as_ref().map(|i18n| i18n.locale.clone()) else {
        eyre::bail!("{} has no [i18n] section", preset.path().display());
    };

    let options = options.with_reporter(Arc::new(|severity: Severity, message: &str| {
        match severity {
            Severity::Error => tracing::error!("{}", message),
            Severity::Warning => tracing::warn!("{}", message),
            Severity::Info | Severity::Ignore => tracing::info!("{}", message),
        }
    }));

    let runtime_package = super::locate_runtime(preset, runtime_dir)?;
    let passes = PassComposer::new(runtime_package)
        .compose(&options)
        .wrap_err("Failed to compose passes")?;
    let translate = passes.find_plugin::<TranslatePlugin>();
    let locale_pass = passes.find_plugin::<LocalePlugin>();

    fs::create_dir_all(out_dir)
        .wrap_err_with(|| format!("Failed to create {}", out_dir.display()))?;

    let mut localized = Vec::with_capacity(files.len());
    for path in files {
        let mut source = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        if let Some(translate) = translate {
            source = translate.rewrite(&source);
        }
        if let Some(locale_pass) = locale_pass {
            source = locale_pass.rewrite(&source);
        }

        let file_name = path
            .file_name()
            .ok_or_else(|| eyre::eyre!("{} is not a file", path.display()))?;
        let output = out_dir.join(file_name);
        fs::write(&output, source)
            .wrap_err_with(|| format!("Failed to write {}", output.display()))?;

        localized.push(LocalizedFile {
            source: path.clone(),
            output,
        });
    }

    Ok(LocalizeReport {
        locale,
        files: localized,
        diagnostics: passes.diagnostics().messages(),
    })
}
