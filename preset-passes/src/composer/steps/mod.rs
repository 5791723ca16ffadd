//! Built-in composer steps, in execution order.

mod async_functions;
mod coverage;
mod environment;
mod i18n;
mod linker;
mod optimize;
mod runtime;

pub use async_functions::AsyncFunctionsStep;
pub use coverage::CoverageStep;
pub use environment::EnvironmentStep;
pub use i18n::I18nStep;
pub use linker::LinkerStep;
pub use optimize::OptimizeStep;
pub use runtime::RuntimeStep;
