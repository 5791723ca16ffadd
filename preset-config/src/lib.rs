//! Configuration loading for the ngpreset transform pipeline.
//!
//! - [`PresetConfig`] - the `preset.toml` schema
//! - [`PresetToml`] - a configuration file on disk, with path resolution
//! - [`TranslationFile`] - Angular JSON translation files

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod translation;

pub use config::{
    I18nConfig, InstrumentCodeConfig, LinkerConfig, MissingTranslation, OptimizeConfig,
    PresetConfig, PresetToml,
};
pub use error::{Error, Result, SourceContext};
pub use translation::{TranslationFile, load_translations};
