//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use ngpreset_core::{DiagnosticReporter, Severity, Version};
use ngpreset_passes::{
    PassComposer,
    browsers::{BrowserCompatCache, BrowserData, BrowserQueryError, BrowserResolver},
    linker::{LinkerLoader, NeedsLinking, PartialDeclarationScanner},
    runtime::RuntimeHelperPackage,
};

pub fn runtime_package() -> RuntimeHelperPackage {
    RuntimeHelperPackage::new(Version::new(7, 26, 0), "/app/node_modules/@babel/runtime")
}

/// A composer with its own browser cache, isolated from other tests.
pub fn composer() -> PassComposer {
    PassComposer::new(runtime_package()).with_browser_cache(Arc::new(BrowserCompatCache::new()))
}

/// A reporter recording every `(severity, message)` it receives.
pub fn recording_reporter() -> (DiagnosticReporter, Arc<Mutex<Vec<(Severity, String)>>>) {
    let records = Arc::new(Mutex::new(Vec::new()));
    let sink = records.clone();
    let reporter: DiagnosticReporter = Arc::new(move |severity: Severity, message: &str| {
        sink.lock().unwrap().push((severity, message.to_string()));
    });
    (reporter, records)
}

/// Resolver delegating to [`BrowserData`] and counting calls.
#[derive(Debug, Default)]
pub struct CountingResolver {
    pub calls: AtomicUsize,
}

impl CountingResolver {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BrowserResolver for CountingResolver {
    fn resolve(&self, queries: &[&str]) -> Result<Vec<String>, BrowserQueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        BrowserData::new().resolve(queries)
    }
}

/// Loader counting loads, slow enough for concurrent callers to overlap.
#[derive(Debug, Default)]
pub struct CountingLoader {
    pub loads: AtomicUsize,
}

impl CountingLoader {
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinkerLoader for CountingLoader {
    async fn load(&self) -> eyre::Result<Arc<dyn NeedsLinking>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(Arc::new(PartialDeclarationScanner))
    }
}

/// Loader failing on its first `failures` loads.
#[derive(Debug, Default)]
pub struct FlakyLoader {
    pub failures: usize,
    pub attempts: AtomicUsize,
}

impl FlakyLoader {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinkerLoader for FlakyLoader {
    async fn load(&self) -> eyre::Result<Arc<dyn NeedsLinking>> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            eyre::bail!("linker package is not installed");
        }
        Ok(Arc::new(PartialDeclarationScanner))
    }
}
