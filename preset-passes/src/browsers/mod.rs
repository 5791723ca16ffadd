//! Browsers affected by the Safari class field scope bug.
//!
//! WebKit versions up to 15 may give class field initializers the wrong
//! variable scope. Targets that include one of these browsers must always
//! downlevel class properties and private methods.

mod data;

use std::{
    collections::BTreeSet,
    sync::{Arc, LazyLock, Mutex, PoisonError},
};

pub use data::{BrowserData, BrowserQueryError};
use eyre::Result;

/// A set of browserslist identifiers.
pub type BrowserSet = BTreeSet<String>;

/// Queries selecting the browsers affected by the class field scope bug.
pub const SAFARI_CLASS_FIELD_SCOPE_BUG_QUERIES: &[&str] = &["Safari <=15", "iOS <=15"];

/// Resolves browserslist queries to browser identifiers.
pub trait BrowserResolver: Send + Sync {
    fn resolve(&self, queries: &[&str]) -> Result<Vec<String>, BrowserQueryError>;
}

/// Memoized set of affected browsers.
///
/// The set is computed by the first successful call and returned unchanged
/// afterwards, whatever resolver later callers pass.
#[derive(Debug, Default)]
pub struct BrowserCompatCache {
    browsers: Mutex<Option<Arc<BrowserSet>>>,
}

impl BrowserCompatCache {
    pub const fn new() -> Self {
        Self {
            browsers: Mutex::new(None),
        }
    }

    /// Whether the set has been computed.
    pub fn is_populated(&self) -> bool {
        self.browsers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The affected browsers, resolved on first use.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error. The cache stays empty so the next call
    /// resolves again.
    pub fn affected_browsers(&self, resolver: &dyn BrowserResolver) -> Result<Arc<BrowserSet>> {
        let mut browsers = self.browsers.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(browsers) = browsers.as_ref() {
            return Ok(browsers.clone());
        }

        let resolved: BrowserSet = resolver
            .resolve(SAFARI_CLASS_FIELD_SCOPE_BUG_QUERIES)?
            .into_iter()
            .collect();
        tracing::info!(count = resolved.len(), "resolved class field scope bug browsers");

        let resolved = Arc::new(resolved);
        *browsers = Some(resolved.clone());
        Ok(resolved)
    }
}

static GLOBAL_CACHE: LazyLock<Arc<BrowserCompatCache>> =
    LazyLock::new(|| Arc::new(BrowserCompatCache::new()));

/// The process-wide cache.
pub fn global_cache() -> Arc<BrowserCompatCache> {
    GLOBAL_CACHE.clone()
}

/// Process-wide affected browsers, resolved with [`BrowserData`].
pub fn safari_class_field_scope_bug_browsers() -> Result<Arc<BrowserSet>> {
    GLOBAL_CACHE.affected_browsers(&BrowserData::new())
}
