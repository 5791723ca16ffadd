//! I18n step - translation and locale inlining.

use eyre::Result;

use crate::{
    composer::{ComposeContext, Step},
    i18n::build_i18n_plugins,
};

pub struct I18nStep;

impl Step for I18nStep {
    fn name(&self) -> &'static str {
        "i18n"
    }

    fn description(&self) -> &'static str {
        "Substitute translations and inline the locale"
    }

    fn run(&self, ctx: &mut ComposeContext<'_>) -> Result<()> {
        let Some(i18n) = ctx.options.i18n.as_ref() else {
            return Ok(());
        };

        let built = build_i18n_plugins(
            &i18n.locale,
            i18n.translation.clone(),
            i18n.missing_translation_behavior,
            ctx.options.diagnostic_reporter.clone(),
            i18n.plugin_creators.as_ref(),
        )?;

        ctx.plugins.extend(built.plugins);
        ctx.sinks.push(built.diagnostics);
        Ok(())
    }
}
