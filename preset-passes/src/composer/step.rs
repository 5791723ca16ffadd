//! Composer step trait.

use eyre::Result;

use super::ComposeContext;

/// Information about a composer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// What one step added during a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub info: StepInfo,
    pub presets: usize,
    pub plugins: usize,
}

impl StepOutcome {
    /// Whether the step added any pass.
    pub fn contributed(&self) -> bool {
        self.presets + self.plugins > 0
    }
}

/// One stage of pass composition.
///
/// Steps run in a fixed order. Each one reads the pipeline options and
/// appends presets or plugins to the context; a step with nothing to do
/// leaves the context untouched.
pub trait Step: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run this step.
    ///
    /// # Errors
    ///
    /// Returns an error if a pass factory fails. The error is propagated
    /// unchanged and composition stops.
    fn run(&self, ctx: &mut ComposeContext<'_>) -> Result<()>;

    fn info(&self) -> StepInfo {
        StepInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
