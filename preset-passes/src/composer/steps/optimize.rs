//! Optimize step - build optimizer passes.

use eyre::Result;

use crate::{
    composer::{ComposeContext, Step},
    names,
    pass::NamedPass,
};

pub struct OptimizeStep;

impl Step for OptimizeStep {
    fn name(&self) -> &'static str {
        "optimize"
    }

    fn description(&self) -> &'static str {
        "Elide framework metadata and make classes and enums tree-shakable"
    }

    fn run(&self, ctx: &mut ComposeContext<'_>) -> Result<()> {
        let Some(optimize) = ctx.options.optimize else {
            return Ok(());
        };

        if optimize.pure_top_level {
            ctx.plugins
                .push(NamedPass::new(names::MARK_TOP_LEVEL_PURE).into_plugin());
        }

        ctx.plugins.extend([
            NamedPass::new(names::ELIDE_ANGULAR_METADATA).into_plugin(),
            NamedPass::new(names::ADJUST_TYPESCRIPT_ENUMS).into_plugin(),
            NamedPass::new(names::ADJUST_STATIC_MEMBERS)
                .option("wrapDecorators", optimize.wrap_decorators)
                .into_plugin(),
        ]);
        Ok(())
    }
}
