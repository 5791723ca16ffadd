//! Shared runtime helper extraction.

use std::path::{Path, PathBuf};

use ngpreset_core::{Version, VersionError};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    names,
    pass::{NamedPass, Plugin},
};

const RUNTIME_MANIFEST: &str = "node_modules/@babel/runtime/package.json";

/// Error returned when the runtime helper package cannot be located.
#[derive(Debug, Error)]
pub enum RuntimePackageError {
    #[error("could not find node_modules/@babel/runtime/package.json above {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid version in {}", path.display())]
    Version {
        path: PathBuf,
        #[source]
        source: VersionError,
    },
}

#[derive(Deserialize)]
struct PackageManifest {
    version: String,
}

/// The installed runtime helper package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeHelperPackage {
    pub version: Version,
    pub absolute_runtime: PathBuf,
}

impl RuntimeHelperPackage {
    pub fn new(version: Version, absolute_runtime: impl Into<PathBuf>) -> Self {
        Self {
            version,
            absolute_runtime: absolute_runtime.into(),
        }
    }

    /// Find the package in `start` or the closest ancestor that has it.
    pub fn locate(start: &Path) -> Result<Self, RuntimePackageError> {
        let manifest = start
            .ancestors()
            .map(|dir| dir.join(RUNTIME_MANIFEST))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| RuntimePackageError::NotFound(start.to_path_buf()))?;

        let content = std::fs::read_to_string(&manifest).map_err(|source| {
            RuntimePackageError::Io {
                path: manifest.clone(),
                source,
            }
        })?;
        let package: PackageManifest =
            serde_json::from_str(&content).map_err(|source| RuntimePackageError::Parse {
                path: manifest.clone(),
                source,
            })?;
        let version = package
            .version
            .parse()
            .map_err(|source| RuntimePackageError::Version {
                path: manifest.clone(),
                source,
            })?;

        let absolute_runtime = manifest
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        tracing::debug!(version = %version, path = %absolute_runtime.display(), "located runtime helpers");

        Ok(Self {
            version,
            absolute_runtime,
        })
    }
}

/// Whether any composed pass needs the shared runtime helpers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeHelperDecision {
    required: bool,
}

impl RuntimeHelperDecision {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(&mut self) {
        self.required = true;
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The consolidating runtime pass, if one is needed.
    pub fn plugin(&self, package: &RuntimeHelperPackage) -> Option<Plugin> {
        if !self.required {
            return None;
        }

        let pass = NamedPass::new(names::TRANSFORM_RUNTIME)
            .option("useESModules", true)
            .option("version", package.version.to_string())
            .option(
                "absoluteRuntime",
                package.absolute_runtime.to_string_lossy().into_owned(),
            );
        Some(pass.into_plugin())
    }
}
