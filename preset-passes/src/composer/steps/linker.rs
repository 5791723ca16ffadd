//! Linker step - appends the partial declaration linker.

use eyre::Result;

use crate::{
    composer::{ComposeContext, Step},
    linker::{LinkerLogger, LinkerPluginOptions},
};

pub struct LinkerStep;

impl Step for LinkerStep {
    fn name(&self) -> &'static str {
        "linker"
    }

    fn description(&self) -> &'static str {
        "Link partially compiled declarations"
    }

    fn run(&self, ctx: &mut ComposeContext<'_>) -> Result<()> {
        let options = ctx.options;
        let Some(linker) = options.angular_linker.as_ref() else {
            return Ok(());
        };
        if !linker.should_link {
            return Ok(());
        }

        let logger = LinkerLogger::new(ctx.new_sink());
        let plugin = linker.linker_plugin_creator.create(LinkerPluginOptions {
            linker_jit_mode: linker.jit_mode,
            // Source mapping through the linker produces broken maps.
            source_mapping: false,
            logger,
            file_system: ctx.env.file_system.clone(),
        })?;

        ctx.plugins.push(plugin);
        ctx.runtime.require();
        Ok(())
    }
}
