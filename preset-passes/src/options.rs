//! Pipeline options for one file.

use std::{fmt, path::PathBuf, sync::Arc};

use ngpreset_config::{MissingTranslation, PresetToml};
use ngpreset_core::DiagnosticReporter;
use serde_json::Value;

use crate::{
    i18n::{I18nPluginCreators, LocalizePluginCreators, TranslationTable, parse_translations},
    linker::{Es2015LinkerPluginCreator, LinkerPluginCreator},
};

/// Localization settings.
#[derive(Debug, Clone)]
pub struct I18nOptions {
    pub locale: String,
    pub missing_translation_behavior: Option<MissingTranslation>,
    pub translation: Option<Arc<TranslationTable>>,
    pub translation_files: Vec<PathBuf>,
    pub plugin_creators: Arc<dyn I18nPluginCreators>,
}

impl I18nOptions {
    /// Locale settings using the built-in pass creators.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            missing_translation_behavior: None,
            translation: None,
            translation_files: Vec::new(),
            plugin_creators: Arc::new(LocalizePluginCreators),
        }
    }

    pub fn with_translation(mut self, translation: Arc<TranslationTable>) -> Self {
        self.translation = Some(translation);
        self
    }

    pub fn with_missing_translation(mut self, behavior: MissingTranslation) -> Self {
        self.missing_translation_behavior = Some(behavior);
        self
    }
}

/// Linking settings.
#[derive(Debug, Clone)]
pub struct LinkerOptions {
    pub should_link: bool,
    pub jit_mode: bool,
    pub linker_plugin_creator: Arc<dyn LinkerPluginCreator>,
}

impl LinkerOptions {
    pub fn new(should_link: bool, jit_mode: bool) -> Self {
        Self {
            should_link,
            jit_mode,
            linker_plugin_creator: Arc::new(Es2015LinkerPluginCreator),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentCodeOptions {
    pub included_base_path: PathBuf,
    pub input_source_map: Option<Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizeOptions {
    pub pure_top_level: bool,
    pub wrap_decorators: bool,
}

/// Everything the composer needs to build the passes of one file.
///
/// Absent sections disable their step.
#[derive(Clone, Default)]
pub struct PipelineOptions {
    pub i18n: Option<I18nOptions>,
    pub angular_linker: Option<LinkerOptions>,
    pub force_async_transformation: bool,
    pub instrument_code: Option<InstrumentCodeOptions>,
    pub optimize: Option<OptimizeOptions>,
    pub supported_browsers: Option<Vec<String>>,
    pub diagnostic_reporter: Option<DiagnosticReporter>,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("i18n", &self.i18n)
            .field("angular_linker", &self.angular_linker)
            .field("force_async_transformation", &self.force_async_transformation)
            .field("instrument_code", &self.instrument_code)
            .field("optimize", &self.optimize)
            .field("supported_browsers", &self.supported_browsers)
            .field("diagnostic_reporter", &self.diagnostic_reporter.is_some())
            .finish()
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from a configuration file, loading the translation
    /// files and input source map it references.
    pub fn from_preset(preset: &PresetToml) -> ngpreset_config::Result<Self> {
        let config = preset.config();

        let i18n = match &config.i18n {
            Some(i18n) => {
                let translation = preset
                    .load_translations()?
                    .map(|messages| Arc::new(parse_translations(messages)));
                Some(I18nOptions {
                    locale: i18n.locale.clone(),
                    missing_translation_behavior: i18n.missing_translation,
                    translation,
                    translation_files: i18n
                        .translation_files
                        .iter()
                        .map(|p| preset.resolve(p))
                        .collect(),
                    plugin_creators: Arc::new(LocalizePluginCreators),
                })
            }
            None => None,
        };

        let angular_linker = config
            .linker
            .as_ref()
            .map(|linker| LinkerOptions::new(linker.enabled, linker.jit_mode));

        let instrument_code = match &config.instrument_code {
            Some(coverage) => Some(InstrumentCodeOptions {
                included_base_path: preset.resolve(&coverage.included_base_path),
                input_source_map: preset.load_input_source_map()?,
            }),
            None => None,
        };

        let optimize = config.optimize.map(|optimize| OptimizeOptions {
            pure_top_level: optimize.pure_top_level,
            wrap_decorators: optimize.wrap_decorators,
        });

        Ok(Self {
            i18n,
            angular_linker,
            force_async_transformation: config.force_async_transformation,
            instrument_code,
            optimize,
            supported_browsers: config.supported_browsers.clone(),
            diagnostic_reporter: None,
        })
    }

    /// Set the callback every nested diagnostic is forwarded to.
    pub fn with_reporter(mut self, reporter: DiagnosticReporter) -> Self {
        self.diagnostic_reporter = Some(reporter);
        self
    }
}

#[cfg(test)]
mod tests {
    use ngpreset_core::Severity;

    use super::*;

    #[test]
    fn test_from_preset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("messages.fr.json"),
            r#"{"locale": "fr", "translations": {"hello": "Bonjour {$NAME}"}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("main.js.map"), r#"{"version": 3}"#).unwrap();
        let config = dir.path().join("preset.toml");
        std::fs::write(
            &config,
            r#"
supported_browsers = ["safari 15"]

[i18n]
locale = "fr"
missing_translation = "error"
translation_files = ["messages.fr.json"]

[linker]
jit_mode = true

[optimize]
wrap_decorators = true

[instrument_code]
included_base_path = "src"
input_source_map = "main.js.map"
"#,
        )
        .unwrap();

        let preset = PresetToml::open(&config).unwrap();
        let options = PipelineOptions::from_preset(&preset).unwrap();

        let i18n = options.i18n.unwrap();
        assert_eq!(i18n.locale, "fr");
        assert_eq!(
            i18n.missing_translation_behavior,
            Some(MissingTranslation::Error)
        );
        let table = i18n.translation.unwrap();
        assert_eq!(table["hello"].placeholder_names, vec!["NAME"]);

        let linker = options.angular_linker.unwrap();
        assert!(linker.should_link);
        assert!(linker.jit_mode);

        assert_eq!(
            options.optimize,
            Some(OptimizeOptions {
                pure_top_level: false,
                wrap_decorators: true,
            })
        );

        let coverage = options.instrument_code.unwrap();
        assert_eq!(coverage.included_base_path, dir.path().join("src"));
        assert_eq!(coverage.input_source_map, Some(serde_json::json!({"version": 3})));
        assert_eq!(options.supported_browsers, Some(vec!["safari 15".to_string()]));
    }

    #[test]
    fn test_debug_hides_reporter() {
        let options = PipelineOptions::new().with_reporter(Arc::new(|_: Severity, _: &str| {}));
        let debug = format!("{options:?}");
        assert!(debug.contains("diagnostic_reporter: true"));
    }
}
