//! Pass composition for the ngpreset transform pipeline.
//!
//! This crate decides which AST passes a module needs and in which order:
//!
//! - [`composer`] - builds the ordered presets and plugins for a file
//! - [`linker`] - decides whether a file needs linking, and the linker pass
//! - [`i18n`] - translation substitution and locale inlining
//! - [`browsers`] - browsers affected by the Safari class field scope bug
//! - [`runtime`] - shared runtime helper extraction
//!
//! The host engine applies the returned passes and reads diagnostics from
//! the sinks attached to the [`PassList`].

pub mod browsers;
pub mod composer;
pub mod coverage;
pub mod i18n;
pub mod linker;
pub mod names;
mod options;
mod pass;
pub mod runtime;

pub use composer::{PassComposer, StepInfo, StepOutcome};
pub use options::{
    I18nOptions, InstrumentCodeOptions, LinkerOptions, OptimizeOptions, PipelineOptions,
};
pub use pass::{
    NamedPass, PassDescriptor, PassList, PassListDescriptor, PassOptions, Plugin, Transform,
};
