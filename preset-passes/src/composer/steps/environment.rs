//! Environment step - downlevels for the supported browsers.

use eyre::{Result, WrapErr};
use serde_json::Value;

use crate::{
    composer::{ComposeContext, Step},
    names,
    pass::NamedPass,
};

pub struct EnvironmentStep;

impl Step for EnvironmentStep {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn description(&self) -> &'static str {
        "Downlevel language features for the supported browsers"
    }

    fn run(&self, ctx: &mut ComposeContext<'_>) -> Result<()> {
        let Some(browsers) = ctx.options.supported_browsers.as_ref() else {
            return Ok(());
        };

        let affected = ctx
            .env
            .browser_cache
            .affected_browsers(ctx.env.browser_resolver.as_ref())?;

        // Entries may be queries (`Safari <=15`) or resolved identifiers,
        // which resolve to themselves.
        let queries: Vec<&str> = browsers.iter().map(String::as_str).collect();
        let targets = ctx
            .env
            .browser_resolver
            .resolve(&queries)
            .wrap_err("Failed to resolve supported browsers")?;

        // Class fields must be downleveled for Safari's scope bug, whatever
        // the targets would otherwise allow.
        let mut include = Vec::new();
        if targets.iter().any(|target| affected.contains(target)) {
            include.push(Value::from(names::CLASS_PROPERTIES));
            include.push(Value::from(names::PRIVATE_METHODS));
        }

        let preset = NamedPass::new(names::PRESET_ENV)
            .option("bugfixes", true)
            .option("modules", false)
            .option("targets", browsers.clone())
            .option("include", include)
            .option("exclude", vec![names::TYPEOF_SYMBOL]);

        ctx.presets.push(preset.into_plugin());
        ctx.runtime.require();
        Ok(())
    }
}
