//! Configuration parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{PresetConfig, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for PresetConfig {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, "preset.toml")
    }
}

impl PresetConfig {
    /// Parse a preset.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_config(&content, &path.display().to_string())
    }

    /// Parse a preset.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_config(content, filename)
    }
}

/// Parse a configuration from content with the given filename for error reporting.
pub fn parse_config(content: &str, filename: &str) -> Result<PresetConfig> {
    let source_ctx = SourceContext::new(content, filename);
    let config: PresetConfig =
        toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    ParseContext::new(&source_ctx).validate(&config)?;
    Ok(config)
}
