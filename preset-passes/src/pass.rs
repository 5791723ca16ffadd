//! Pass model shared by every step of the composer.
//!
//! A pass is an opaque capability for the host's AST engine: it exposes a
//! transform identifier and an ordered option map. Passes built by factories
//! (translation, linking) carry extra state the host reaches through
//! [`Transform::as_any`].

use std::{any::Any, fmt, sync::Arc};

use indexmap::IndexMap;
use ngpreset_core::Diagnostics;
use serde::Serialize;
use serde_json::Value;

/// Ordered options attached to a pass.
pub type PassOptions = IndexMap<String, Value>;

/// A single transform handed to the host engine.
pub trait Transform: Send + Sync + fmt::Debug {
    /// The transform identifier understood by the host.
    fn name(&self) -> &str;

    /// Options the host passes to the transform.
    fn options(&self) -> PassOptions {
        PassOptions::new()
    }

    /// Access the concrete pass, e.g. to call its rewrite methods.
    fn as_any(&self) -> &dyn Any;
}

impl dyn Transform {
    /// Downcast to a concrete pass type.
    pub fn downcast_ref<T: Transform + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Serializable `(name, options)` view of this pass.
    pub fn describe(&self) -> PassDescriptor {
        PassDescriptor {
            name: self.name().to_string(),
            options: self.options(),
        }
    }
}

/// A shared pass, as stored in a [`PassList`].
pub type Plugin = Arc<dyn Transform>;

/// A pass identified by name only, with static options.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedPass {
    name: &'static str,
    options: PassOptions,
}

impl NamedPass {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            options: PassOptions::new(),
        }
    }

    /// Add an option, keeping insertion order.
    pub fn option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    /// Wrap into a shared [`Plugin`].
    pub fn into_plugin(self) -> Plugin {
        Arc::new(self)
    }
}

impl Transform for NamedPass {
    fn name(&self) -> &str {
        self.name
    }

    fn options(&self) -> PassOptions {
        self.options.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Serializable description of a pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub options: PassOptions,
}

impl fmt::Display for PassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.options.is_empty() {
            let options = serde_json::to_string(&self.options).map_err(|_| fmt::Error)?;
            write!(f, " {}", options)?;
        }
        Ok(())
    }
}

/// Serializable description of a [`PassList`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassListDescriptor {
    pub presets: Vec<PassDescriptor>,
    pub plugins: Vec<PassDescriptor>,
}

/// The ordered presets and plugins composed for one file.
///
/// The host must apply both sequences in order. Diagnostic sinks created
/// while composing travel with the list so the host can read them after the
/// passes ran.
#[derive(Debug, Default)]
pub struct PassList {
    pub presets: Vec<Plugin>,
    pub plugins: Vec<Plugin>,
    sinks: Vec<Arc<Diagnostics>>,
}

impl PassList {
    pub(crate) fn new(
        presets: Vec<Plugin>,
        plugins: Vec<Plugin>,
        sinks: Vec<Arc<Diagnostics>>,
    ) -> Self {
        Self {
            presets,
            plugins,
            sinks,
        }
    }

    /// Whether no preset and no plugin was selected.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty() && self.plugins.is_empty()
    }

    /// Names of the presets in order.
    pub fn preset_names(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name()).collect()
    }

    /// Names of the plugins in order.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// First plugin of the given concrete type.
    pub fn find_plugin<T: Transform + 'static>(&self) -> Option<&T> {
        self.plugins.iter().find_map(|p| p.downcast_ref::<T>())
    }

    /// The sinks nested producers write into, in creation order.
    pub fn sinks(&self) -> &[Arc<Diagnostics>] {
        &self.sinks
    }

    /// Collect every nested diagnostic into one sink.
    ///
    /// The returned sink has no reporter, so nothing is reported twice.
    pub fn diagnostics(&self) -> Diagnostics {
        let merged = Diagnostics::new();
        for sink in &self.sinks {
            merged.merge(sink);
        }
        merged
    }

    /// Whether any nested producer recorded an error.
    pub fn has_errors(&self) -> bool {
        self.sinks.iter().any(|sink| sink.has_errors())
    }

    /// Serializable view of the whole list.
    pub fn describe(&self) -> PassListDescriptor {
        PassListDescriptor {
            presets: self.presets.iter().map(|p| p.describe()).collect(),
            plugins: self.plugins.iter().map(|p| p.describe()).collect(),
        }
    }
}

impl fmt::Display for PassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "presets:")?;
        for preset in &self.presets {
            writeln!(f, "  {}", preset.describe())?;
        }
        writeln!(f, "plugins:")?;
        for plugin in &self.plugins {
            writeln!(f, "  {}", plugin.describe())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_named_pass_options_keep_order() {
        let pass = NamedPass::new("example")
            .option("zeta", true)
            .option("alpha", json!(["a"]));

        let keys: Vec<_> = pass.options().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_descriptor_display() {
        let plain = NamedPass::new("elide").into_plugin();
        assert_eq!(plain.describe().to_string(), "elide");

        let configured = NamedPass::new("adjust").option("wrap", false).into_plugin();
        assert_eq!(configured.describe().to_string(), r#"adjust {"wrap":false}"#);
    }

    #[test]
    fn test_downcast() {
        let plugin = NamedPass::new("elide").into_plugin();
        assert!(plugin.downcast_ref::<NamedPass>().is_some());
    }

    #[test]
    fn test_diagnostics_merge_without_reporting_twice() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let sink = Arc::new(Diagnostics::with_reporter(Some(Arc::new(
            move |_: ngpreset_core::Severity, _: &str| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        ))));
        sink.warn("first");

        let list = PassList::new(Vec::new(), Vec::new(), vec![sink]);
        let merged = list.diagnostics();

        assert_eq!(merged.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!list.has_errors());
    }
}
