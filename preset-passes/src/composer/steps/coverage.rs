//! Coverage step.

use std::sync::Arc;

use eyre::Result;

use crate::{
    composer::{ComposeContext, Step},
    coverage::CoveragePlugin,
};

pub struct CoverageStep;

impl Step for CoverageStep {
    fn name(&self) -> &'static str {
        "coverage"
    }

    fn description(&self) -> &'static str {
        "Instrument code for coverage reports"
    }

    fn run(&self, ctx: &mut ComposeContext<'_>) -> Result<()> {
        if let Some(coverage) = ctx.options.instrument_code.as_ref() {
            ctx.plugins.push(Arc::new(CoveragePlugin::new(
                coverage.included_base_path.clone(),
                coverage.input_source_map.clone(),
            )));
        }
        Ok(())
    }
}
