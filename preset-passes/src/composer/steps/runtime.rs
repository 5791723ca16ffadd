//! Runtime step - consolidates helpers into the shared runtime package.

use eyre::Result;

use crate::composer::{ComposeContext, Step};

pub struct RuntimeStep;

impl Step for RuntimeStep {
    fn name(&self) -> &'static str {
        "runtime"
    }

    fn description(&self) -> &'static str {
        "Import helpers from the shared runtime package"
    }

    fn run(&self, ctx: &mut ComposeContext<'_>) -> Result<()> {
        if let Some(plugin) = ctx.runtime.plugin(&ctx.env.runtime_package) {
            ctx.plugins.push(plugin);
        }
        Ok(())
    }
}
