//! Preset configuration types and parsing for preset.toml files.

mod file;
mod missing;
mod parse;
mod validate;

use std::path::PathBuf;

pub use file::PresetToml;
pub use missing::MissingTranslation;
use serde::Deserialize;

/// Root configuration for preset.toml.
///
/// Every section is optional. A missing section disables the matching
/// transform step entirely.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetConfig {
    /// Resolved browserslist entries to downlevel for.
    #[serde(default)]
    pub supported_browsers: Option<Vec<String>>,

    /// Always rewrite async functions into generators.
    #[serde(default)]
    pub force_async_transformation: bool,

    /// Localization settings.
    #[serde(default)]
    pub i18n: Option<I18nConfig>,

    /// Partial declaration linking.
    #[serde(default)]
    pub linker: Option<LinkerConfig>,

    /// Build optimizer passes.
    #[serde(default)]
    pub optimize: Option<OptimizeConfig>,

    /// Code coverage instrumentation.
    #[serde(default)]
    pub instrument_code: Option<InstrumentCodeConfig>,
}

/// `[i18n]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct I18nConfig {
    /// Target locale, e.g. `fr` or `en-US`.
    pub locale: String,

    /// Policy for messages without a translation (defaults to `ignore`).
    #[serde(default)]
    pub missing_translation: Option<MissingTranslation>,

    /// JSON translation files, relative to the configuration file.
    #[serde(default)]
    pub translation_files: Vec<PathBuf>,
}

/// `[linker]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Keep the declarations needed for JIT compilation.
    #[serde(default)]
    pub jit_mode: bool,
}

/// `[optimize]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizeConfig {
    /// Annotate top-level statements as side-effect free.
    #[serde(default)]
    pub pure_top_level: bool,

    /// Wrap decorated classes so they can be tree-shaken.
    #[serde(default)]
    pub wrap_decorators: bool,
}

/// `[instrument_code]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstrumentCodeConfig {
    /// Only files under this path are instrumented.
    pub included_base_path: PathBuf,

    /// Optional JSON source map of the input.
    #[serde(default)]
    pub input_source_map: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl PresetConfig {
    /// Whether linking is requested.
    pub fn should_link(&self) -> bool {
        self.linker.as_ref().is_some_and(|l| l.enabled)
    }

    /// Missing translation policy, falling back to the default.
    pub fn missing_translation(&self) -> MissingTranslation {
        self.i18n
            .as_ref()
            .and_then(|i18n| i18n.missing_translation)
            .unwrap_or_default()
    }
}
