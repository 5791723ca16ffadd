//! Code coverage instrumentation pass.

use std::{
    any::Any,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::{
    names,
    pass::{PassOptions, Transform},
};

/// Instruments files under `included_base_path` for coverage.
#[derive(Debug, Clone)]
pub struct CoveragePlugin {
    included_base_path: PathBuf,
    input_source_map: Option<Value>,
}

impl CoveragePlugin {
    pub fn new(included_base_path: impl Into<PathBuf>, input_source_map: Option<Value>) -> Self {
        Self {
            included_base_path: included_base_path.into(),
            input_source_map,
        }
    }

    pub fn included_base_path(&self) -> &Path {
        &self.included_base_path
    }

    pub fn input_source_map(&self) -> Option<&Value> {
        self.input_source_map.as_ref()
    }

    /// Whether the pass instruments `path`.
    pub fn instruments(&self, path: &Path) -> bool {
        path.starts_with(&self.included_base_path)
    }
}

impl Transform for CoveragePlugin {
    fn name(&self) -> &str {
        names::CODE_COVERAGE
    }

    fn options(&self) -> PassOptions {
        let mut options = PassOptions::new();
        options.insert(
            "includedBasePath".to_string(),
            Value::from(self.included_base_path.to_string_lossy().into_owned()),
        );
        options.insert(
            "inputSourceMap".to_string(),
            self.input_source_map.clone().unwrap_or(Value::Null),
        );
        options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruments_prefix_only() {
        let plugin = CoveragePlugin::new("/app/src", None);
        assert!(plugin.instruments(Path::new("/app/src/main.js")));
        assert!(plugin.instruments(Path::new("/app/src/app/app.component.js")));
        assert!(!plugin.instruments(Path::new("/app/node_modules/lib/index.js")));
        assert!(!plugin.instruments(Path::new("/app/src-other/main.js")));
    }

    #[test]
    fn test_options() {
        let plugin = CoveragePlugin::new("src", Some(serde_json::json!({"version": 3})));
        assert_eq!(
            (&plugin as &dyn Transform).describe().to_string(),
            r#"add-code-coverage {"includedBasePath":"src","inputSourceMap":{"version":3}}"#
        );
    }
}
