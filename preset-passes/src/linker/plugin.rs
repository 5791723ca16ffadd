//! The linker pass and the logger it reports through.

use std::{any::Any, fmt, sync::Arc};

use eyre::Result;
use ngpreset_core::{Diagnostics, Severity};
use serde_json::Value;

use super::fs::LinkerFileSystem;
use crate::{
    names,
    pass::{PassOptions, Plugin, Transform},
};

/// Verbosity of a [`LinkerLogger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Logger handed to the linker pass.
///
/// Debug output is dropped. Everything else is recorded in the sink with
/// the arguments joined by `,`.
#[derive(Debug, Clone)]
pub struct LinkerLogger {
    diagnostics: Arc<Diagnostics>,
}

impl LinkerLogger {
    pub fn new(diagnostics: Arc<Diagnostics>) -> Self {
        Self { diagnostics }
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::Info
    }

    pub fn diagnostics(&self) -> &Arc<Diagnostics> {
        &self.diagnostics
    }

    pub fn debug(&self, _args: &[&str]) {}

    pub fn info(&self, args: &[&str]) {
        self.diagnostics.add(Severity::Info, args.join(","));
    }

    pub fn warn(&self, args: &[&str]) {
        self.diagnostics.add(Severity::Warning, args.join(","));
    }

    pub fn error(&self, args: &[&str]) {
        self.diagnostics.add(Severity::Error, args.join(","));
    }
}

/// Everything a linker factory receives.
#[derive(Debug, Clone)]
pub struct LinkerPluginOptions {
    pub linker_jit_mode: bool,
    pub source_mapping: bool,
    pub logger: LinkerLogger,
    pub file_system: Arc<dyn LinkerFileSystem>,
}

/// Factory for the linker pass.
pub trait LinkerPluginCreator: Send + Sync + fmt::Debug {
    fn create(&self, options: LinkerPluginOptions) -> Result<Plugin>;
}

/// Links partial declarations into full definitions.
#[derive(Debug)]
pub struct LinkerPlugin {
    options: LinkerPluginOptions,
}

impl LinkerPlugin {
    pub fn new(options: LinkerPluginOptions) -> Self {
        Self { options }
    }

    pub fn jit_mode(&self) -> bool {
        self.options.linker_jit_mode
    }

    pub fn logger(&self) -> &LinkerLogger {
        &self.options.logger
    }

    pub fn file_system(&self) -> &dyn LinkerFileSystem {
        self.options.file_system.as_ref()
    }
}

impl Transform for LinkerPlugin {
    fn name(&self) -> &str {
        names::ANGULAR_LINKER
    }

    fn options(&self) -> PassOptions {
        let mut options = PassOptions::new();
        options.insert(
            "linkerJitMode".to_string(),
            Value::Bool(self.options.linker_jit_mode),
        );
        options.insert(
            "sourceMapping".to_string(),
            Value::Bool(self.options.source_mapping),
        );
        options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Creates [`LinkerPlugin`] for ES2015+ output.
#[derive(Debug, Default, Clone, Copy)]
pub struct Es2015LinkerPluginCreator;

impl LinkerPluginCreator for Es2015LinkerPluginCreator {
    fn create(&self, options: LinkerPluginOptions) -> Result<Plugin> {
        Ok(Arc::new(LinkerPlugin::new(options)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linker::HostFileSystem;

    #[test]
    fn test_logger_joins_and_suppresses_debug() {
        let diagnostics = Arc::new(Diagnostics::new());
        let logger = LinkerLogger::new(diagnostics.clone());

        logger.debug(&["hidden"]);
        logger.info(&["linking", "main.js"]);
        logger.warn(&["deprecated"]);
        logger.error(&["a", "b", "c"]);

        let messages = diagnostics.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].severity, Severity::Info);
        assert_eq!(messages[0].message, "linking,main.js");
        assert_eq!(messages[1].severity, Severity::Warning);
        assert_eq!(messages[2].message, "a,b,c");
        assert!(diagnostics.has_errors());
        assert_eq!(logger.level(), LogLevel::Info);
    }

    #[test]
    fn test_plugin_options() {
        let plugin = Es2015LinkerPluginCreator
            .create(LinkerPluginOptions {
                linker_jit_mode: true,
                source_mapping: false,
                logger: LinkerLogger::new(Arc::new(Diagnostics::new())),
                file_system: Arc::new(HostFileSystem),
            })
            .unwrap();

        assert_eq!(
            plugin.describe().to_string(),
            r#"angular-linker {"linkerJitMode":true,"sourceMapping":false}"#
        );
        assert!(plugin.downcast_ref::<LinkerPlugin>().unwrap().jit_mode());
    }
}
