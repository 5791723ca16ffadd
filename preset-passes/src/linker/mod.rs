//! Linking decisions and the linker pass.
//!
//! Deciding whether a file needs linking requires a capability that is
//! expensive to obtain. [`LinkingDecision`] loads it lazily, at most once
//! per instance, and shares one in-flight load between concurrent callers.
//! A failed load is reported to the caller and retried on the next call.

mod fs;
mod plugin;

use std::{
    path::Path,
    sync::{Arc, LazyLock},
};

use async_trait::async_trait;
use eyre::Result;
pub use fs::{HostFileSystem, LinkerFileSystem};
pub use plugin::{
    Es2015LinkerPluginCreator, LinkerLogger, LinkerPlugin, LinkerPluginCreator,
    LinkerPluginOptions, LogLevel,
};
use regex::Regex;
use tokio::sync::OnceCell;

/// Marker emitted by the compiler for partially compiled declarations.
pub const PARTIAL_DECLARATION_MARKER: &str = "ɵɵngDeclare";

static EXEMPT_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\\/]@angular[\\/](?:compiler|core)|\.tsx?$").expect("exempt pattern is valid")
});

/// Whether `path` never needs linking.
///
/// The framework's own compiler and core packages would produce false
/// positives, and TypeScript sources are never partially compiled.
pub fn is_linking_exempt(path: &str) -> bool {
    EXEMPT_PATH.is_match(path)
}

/// The loaded capability deciding whether a file needs linking.
pub trait NeedsLinking: Send + Sync {
    fn needs_linking(&self, path: &str, source: &str) -> bool;
}

/// Loads the [`NeedsLinking`] capability.
#[async_trait]
pub trait LinkerLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn NeedsLinking>>;
}

#[async_trait]
impl<L: LinkerLoader + ?Sized> LinkerLoader for Arc<L> {
    async fn load(&self) -> Result<Arc<dyn NeedsLinking>> {
        (**self).load().await
    }
}

/// Scans for partial declarations.
#[derive(Debug, Default, Clone, Copy)]
pub struct PartialDeclarationScanner;

impl NeedsLinking for PartialDeclarationScanner {
    fn needs_linking(&self, _path: &str, source: &str) -> bool {
        source.contains(PARTIAL_DECLARATION_MARKER)
    }
}

/// Loader for [`PartialDeclarationScanner`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PartialDeclarationLoader;

#[async_trait]
impl LinkerLoader for PartialDeclarationLoader {
    async fn load(&self) -> Result<Arc<dyn NeedsLinking>> {
        Ok(Arc::new(PartialDeclarationScanner))
    }
}

/// Memoized linking decisions.
pub struct LinkingDecision<L> {
    loader: L,
    capability: OnceCell<Arc<dyn NeedsLinking>>,
}

impl<L: LinkerLoader> LinkingDecision<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            capability: OnceCell::new(),
        }
    }

    /// Whether the capability has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.capability.initialized()
    }

    /// Whether the file at `path` with contents `source` must be linked.
    ///
    /// # Errors
    ///
    /// Returns the loader's error when the capability cannot be loaded.
    pub async fn requires_linking(&self, path: &str, source: &str) -> Result<bool> {
        if is_linking_exempt(path) {
            return Ok(false);
        }

        let capability = self
            .capability
            .get_or_try_init(|| async {
                tracing::debug!("loading linker capability");
                let capability = self.loader.load().await?;
                tracing::info!("linker capability loaded");
                Ok::<_, eyre::Report>(capability)
            })
            .await?;

        Ok(capability.needs_linking(path, source))
    }

    /// [`LinkingDecision::requires_linking`] for a file path.
    pub async fn requires_linking_path(&self, path: &Path, source: &str) -> Result<bool> {
        self.requires_linking(&path.to_string_lossy(), source).await
    }
}

static DEFAULT_DECISION: LazyLock<LinkingDecision<PartialDeclarationLoader>> =
    LazyLock::new(|| LinkingDecision::new(PartialDeclarationLoader));

/// Process-wide linking decision using the built-in scanner.
pub async fn requires_linking(path: &str, source: &str) -> Result<bool> {
    DEFAULT_DECISION.requires_linking(path, source).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exempt_paths() {
        assert!(is_linking_exempt("/app/node_modules/@angular/core/fesm2022/core.mjs"));
        assert!(is_linking_exempt(r"C:\app\node_modules\@angular\compiler\index.js"));
        assert!(is_linking_exempt("/app/src/main.ts"));
        assert!(is_linking_exempt("/app/src/app.tsx"));
        assert!(!is_linking_exempt("/app/node_modules/@angular/common/fesm2022/common.mjs"));
        assert!(!is_linking_exempt("/app/src/main.ts.js"));
    }

    #[tokio::test]
    async fn test_default_service() {
        assert!(
            requires_linking("/lib/fesm2022/lib.mjs", "i0.ɵɵngDeclareComponent({})")
                .await
                .unwrap()
        );
        assert!(!requires_linking("/lib/plain.js", "export const a = 1;").await.unwrap());
        assert!(
            !requires_linking("/app/main.ts", "ɵɵngDeclareFactory")
                .await
                .unwrap()
        );
    }
}
