//! Locale substitution.
//!
//! [`build_i18n_plugins`] produces the passes that replace translatable
//! messages with their translation and inline the active locale. Problems
//! found while translating land in a dedicated [`Diagnostics`] sink that is
//! wired to the caller's reporter.

mod plugins;
mod translation;

use std::{fmt, sync::Arc};

use eyre::Result;
use ngpreset_config::MissingTranslation;
use ngpreset_core::{DiagnosticReporter, Diagnostics};
pub use plugins::{LocalePlugin, LocalizeCall, LocalizePluginCreators, TranslatePlugin};
pub use translation::{ParsedTranslation, TranslationTable, parse_translations};

use crate::pass::Plugin;

/// Factories for the two localization passes.
pub trait I18nPluginCreators: Send + Sync + fmt::Debug {
    /// Create the pass that substitutes translations.
    fn make_translate_plugin(
        &self,
        diagnostics: Arc<Diagnostics>,
        translations: Arc<TranslationTable>,
        missing_translation: MissingTranslation,
    ) -> Result<Plugin>;

    /// Create the pass that inlines the locale identifier.
    fn make_locale_plugin(&self, locale: &str) -> Result<Plugin>;
}

/// Passes and sink produced for one locale.
#[derive(Debug)]
pub struct I18nPlugins {
    pub plugins: Vec<Plugin>,
    pub diagnostics: Arc<Diagnostics>,
}

/// Build the localization passes for `locale`.
///
/// The translate pass is only created when a translation table is given and
/// always comes before the locale pass.
pub fn build_i18n_plugins(
    locale: &str,
    translation: Option<Arc<TranslationTable>>,
    missing_translation: Option<MissingTranslation>,
    reporter: Option<DiagnosticReporter>,
    creators: &dyn I18nPluginCreators,
) -> Result<I18nPlugins> {
    let diagnostics = Arc::new(Diagnostics::with_reporter(reporter));
    let mut plugins = Vec::with_capacity(2);

    if let Some(translation) = translation {
        tracing::debug!(locale, messages = translation.len(), "creating translate pass");
        plugins.push(creators.make_translate_plugin(
            diagnostics.clone(),
            translation,
            missing_translation.unwrap_or_default(),
        )?);
    }

    plugins.push(creators.make_locale_plugin(locale)?);

    Ok(I18nPlugins {
        plugins,
        diagnostics,
    })
}
