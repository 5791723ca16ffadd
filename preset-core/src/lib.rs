//! Core types for the ngpreset transform pipeline.
//!
//! This crate provides the diagnostic model shared by every pass producer
//! and the version type used to describe tooling packages.

mod diagnostic;
mod diagnostics;
mod version;

pub use diagnostic::{Diagnostic, Severity};
pub use diagnostics::{DiagnosticReporter, Diagnostics};
pub use version::{Version, VersionError};
