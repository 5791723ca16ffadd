//! Pass composition.
//!
//! [`PassComposer::compose`] runs the composer steps in a fixed order and
//! returns the ordered presets and plugins for one file:
//!
//! 1. `linker` - partial declaration linking
//! 2. `environment` - downleveling for the supported browsers
//! 3. `i18n` - translation and locale inlining
//! 4. `async` - async function downleveling
//! 5. `optimize` - build optimizer passes
//! 6. `coverage` - coverage instrumentation
//! 7. `runtime` - shared runtime helpers, always last
//!
//! Composition does no I/O. Factory errors propagate and no partial list is
//! returned.

mod context;
mod step;
mod steps;

use std::sync::Arc;

pub use context::{ComposeContext, ComposeEnv};
use eyre::Result;
pub use step::{Step, StepInfo, StepOutcome};
pub use steps::{
    AsyncFunctionsStep, CoverageStep, EnvironmentStep, I18nStep, LinkerStep, OptimizeStep,
    RuntimeStep,
};

use crate::{
    browsers::{self, BrowserCompatCache, BrowserData, BrowserResolver},
    linker::{HostFileSystem, LinkerFileSystem},
    options::PipelineOptions,
    pass::PassList,
    runtime::RuntimeHelperPackage,
};

/// The built-in steps in execution order.
pub fn builtin_steps() -> Vec<Box<dyn Step>> {
    vec![
        Box::new(LinkerStep),
        Box::new(EnvironmentStep),
        Box::new(I18nStep),
        Box::new(AsyncFunctionsStep),
        Box::new(OptimizeStep),
        Box::new(CoverageStep),
        Box::new(RuntimeStep),
    ]
}

/// Builds the pass list for a file from [`PipelineOptions`].
///
/// # Example
///
/// ```ignore
/// let composer = PassComposer::new(RuntimeHelperPackage::locate(&root)?);
/// let passes = composer.compose(&options)?;
/// ```
#[derive(Debug)]
pub struct PassComposer {
    env: ComposeEnv,
    steps: Vec<Box<dyn Step>>,
}

impl PassComposer {
    /// A composer using the process-wide browser cache and the host file
    /// system.
    pub fn new(runtime_package: RuntimeHelperPackage) -> Self {
        Self {
            env: ComposeEnv {
                browser_cache: browsers::global_cache(),
                browser_resolver: Arc::new(BrowserData::new()),
                file_system: Arc::new(HostFileSystem),
                runtime_package,
            },
            steps: builtin_steps(),
        }
    }

    /// Use a dedicated browser cache instead of the process-wide one.
    pub fn with_browser_cache(mut self, cache: Arc<BrowserCompatCache>) -> Self {
        self.env.browser_cache = cache;
        self
    }

    pub fn with_browser_resolver(mut self, resolver: Arc<dyn BrowserResolver>) -> Self {
        self.env.browser_resolver = resolver;
        self
    }

    pub fn with_file_system(mut self, file_system: Arc<dyn LinkerFileSystem>) -> Self {
        self.env.file_system = file_system;
        self
    }

    pub fn env(&self) -> &ComposeEnv {
        &self.env
    }

    /// The steps in execution order.
    pub fn step_info(&self) -> Vec<StepInfo> {
        self.steps.iter().map(|step| step.info()).collect()
    }

    /// Compose the passes for one file.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a step.
    pub fn compose(&self, options: &PipelineOptions) -> Result<PassList> {
        self.compose_traced(options).map(|(passes, _)| passes)
    }

    /// Compose the passes for one file and report what each step added.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a step.
    pub fn compose_traced(
        &self,
        options: &PipelineOptions,
    ) -> Result<(PassList, Vec<StepOutcome>)> {
        let mut ctx = ComposeContext::new(options, &self.env);
        let mut outcomes = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let (presets, plugins) = (ctx.presets.len(), ctx.plugins.len());
            step.run(&mut ctx)?;

            let outcome = StepOutcome {
                info: step.info(),
                presets: ctx.presets.len() - presets,
                plugins: ctx.plugins.len() - plugins,
            };
            tracing::debug!(
                step = step.name(),
                presets = outcome.presets,
                plugins = outcome.plugins,
                "composed step"
            );
            outcomes.push(outcome);
        }

        Ok((ctx.finish(), outcomes))
    }
}

impl std::fmt::Debug for dyn Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use ngpreset_core::Version;

    use super::*;

    #[test]
    fn test_step_order() {
        let composer = PassComposer::new(RuntimeHelperPackage::new(Version::new(7, 26, 0), "/rt"));
        let names: Vec<_> = composer.step_info().iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "linker",
                "environment",
                "i18n",
                "async",
                "optimize",
                "coverage",
                "runtime"
            ]
        );
    }

    #[test]
    fn test_step_outcomes() {
        let composer = PassComposer::new(RuntimeHelperPackage::new(Version::new(7, 26, 0), "/rt"));
        let options = PipelineOptions {
            force_async_transformation: true,
            ..Default::default()
        };
        let (passes, outcomes) = composer.compose_traced(&options).unwrap();

        let contributed: Vec<_> = outcomes
            .iter()
            .filter(|outcome| outcome.contributed())
            .map(|outcome| (outcome.info.name, outcome.plugins))
            .collect();
        assert_eq!(contributed, vec![("async", 2), ("runtime", 1)]);
        assert_eq!(outcomes.len(), 7);
        assert_eq!(passes.plugins.len(), 3);
    }

    #[test]
    fn test_empty_options() {
        let composer = PassComposer::new(RuntimeHelperPackage::new(Version::new(7, 26, 0), "/rt"));
        let passes = composer.compose(&PipelineOptions::default()).unwrap();
        assert!(passes.is_empty());
        assert!(passes.sinks().is_empty());
    }
}
