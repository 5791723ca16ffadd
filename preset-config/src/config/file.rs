use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::PresetConfig;
use crate::{Error, Result, translation::load_translations};

/// Represents a preset.toml file with both raw content and parsed configuration.
///
/// Relative paths inside the configuration resolve against the directory
/// containing the file.
pub struct PresetToml {
    path: PathBuf,
    content: String,
    config: PresetConfig,
}

impl PresetToml {
    /// Open and parse a preset.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let filename = path.display().to_string();
        let config = PresetConfig::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            config,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed configuration.
    pub fn config(&self) -> &PresetConfig {
        &self.config
    }

    /// Directory relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Resolve a configured path against [`PresetToml::base_dir`].
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// Load the configured translation files.
    ///
    /// Returns `None` when i18n is disabled or no translation file is listed,
    /// in which case only the locale is embedded.
    pub fn load_translations(&self) -> Result<Option<IndexMap<String, String>>> {
        let Some(i18n) = &self.config.i18n else {
            return Ok(None);
        };
        if i18n.translation_files.is_empty() {
            return Ok(None);
        }

        let paths: Vec<PathBuf> = i18n
            .translation_files
            .iter()
            .map(|p| self.resolve(p))
            .collect();
        load_translations(&paths, &i18n.locale).map(Some)
    }

    /// Load the configured input source map as JSON.
    pub fn load_input_source_map(&self) -> Result<Option<serde_json::Value>> {
        let Some(path) = self
            .config
            .instrument_code
            .as_ref()
            .and_then(|c| c.input_source_map.as_ref())
        else {
            return Ok(None);
        };

        let path = self.resolve(path);
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| Box::new(Error::SourceMapParse { path, source }))
    }
}
