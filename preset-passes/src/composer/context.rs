//! State carried through the composer steps.

use std::{fmt, sync::Arc};

use ngpreset_core::Diagnostics;

use crate::{
    browsers::{BrowserCompatCache, BrowserResolver},
    linker::LinkerFileSystem,
    options::PipelineOptions,
    pass::{PassList, Plugin},
    runtime::{RuntimeHelperDecision, RuntimeHelperPackage},
};

/// Collaborators shared by every composition.
#[derive(Clone)]
pub struct ComposeEnv {
    pub browser_cache: Arc<BrowserCompatCache>,
    pub browser_resolver: Arc<dyn BrowserResolver>,
    pub file_system: Arc<dyn LinkerFileSystem>,
    pub runtime_package: RuntimeHelperPackage,
}

impl fmt::Debug for ComposeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposeEnv")
            .field("browser_cache", &self.browser_cache)
            .field("file_system", &self.file_system)
            .field("runtime_package", &self.runtime_package)
            .finish_non_exhaustive()
    }
}

/// Context for one call to [`PassComposer::compose`](super::PassComposer::compose).
#[derive(Debug)]
pub struct ComposeContext<'a> {
    pub options: &'a PipelineOptions,
    pub env: &'a ComposeEnv,
    pub presets: Vec<Plugin>,
    pub plugins: Vec<Plugin>,
    pub sinks: Vec<Arc<Diagnostics>>,
    pub runtime: RuntimeHelperDecision,
}

impl<'a> ComposeContext<'a> {
    pub fn new(options: &'a PipelineOptions, env: &'a ComposeEnv) -> Self {
        Self {
            options,
            env,
            presets: Vec::new(),
            plugins: Vec::new(),
            sinks: Vec::new(),
            runtime: RuntimeHelperDecision::new(),
        }
    }

    /// A new sink forwarding to the caller's reporter, attached to the output.
    pub fn new_sink(&mut self) -> Arc<Diagnostics> {
        let sink = Arc::new(Diagnostics::with_reporter(
            self.options.diagnostic_reporter.clone(),
        ));
        self.sinks.push(sink.clone());
        sink
    }

    /// Consume the context into the final pass list.
    pub fn finish(self) -> PassList {
        PassList::new(self.presets, self.plugins, self.sinks)
    }
}
