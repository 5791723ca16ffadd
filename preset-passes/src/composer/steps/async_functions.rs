//! Async step - rewrites async functions into generators.

use eyre::Result;

use crate::{
    composer::{ComposeContext, Step},
    names,
    pass::NamedPass,
};

pub struct AsyncFunctionsStep;

impl Step for AsyncFunctionsStep {
    fn name(&self) -> &'static str {
        "async"
    }

    fn description(&self) -> &'static str {
        "Downlevel async functions so zone-based change detection sees them"
    }

    fn run(&self, ctx: &mut ComposeContext<'_>) -> Result<()> {
        if !ctx.options.force_async_transformation {
            return Ok(());
        }

        ctx.plugins.extend([
            NamedPass::new(names::ASYNC_TO_GENERATOR).into_plugin(),
            NamedPass::new(names::ASYNC_GENERATOR_FUNCTIONS).into_plugin(),
        ]);
        ctx.runtime.require();
        Ok(())
    }
}
