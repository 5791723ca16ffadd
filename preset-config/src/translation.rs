//! Angular JSON translation files.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A translation file in the Angular JSON format.
///
/// ```json
/// { "locale": "fr", "translations": { "greeting": "Bonjour {$NAME} !" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationFile {
    /// Locale the messages are written in.
    pub locale: String,
    /// Message id to translated text, in file order.
    pub translations: IndexMap<String, String>,
}

impl TranslationFile {
    /// Read and parse a translation file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&content).map_err(|source| {
            Box::new(Error::TranslationParse {
                path: path.to_path_buf(),
                source,
            })
        })
    }
}

/// Load and merge translation files for `locale`.
///
/// Files are merged in order; a later file overrides ids of an earlier one.
/// A file declaring another locale is still used, with a warning.
pub fn load_translations(paths: &[PathBuf], locale: &str) -> Result<IndexMap<String, String>> {
    let mut merged = IndexMap::new();

    for path in paths {
        let file = TranslationFile::open(path)?;
        if !file.locale.eq_ignore_ascii_case(locale) {
            tracing::warn!(
                "File '{}' locale ('{}') does not match configured locale ('{}')",
                path.display(),
                file.locale,
                locale
            );
        }
        tracing::debug!(
            "Loaded {} translations from {}",
            file.translations.len(),
            path.display()
        );
        merged.extend(file.translations);
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "messages.fr.json",
            r#"{"locale":"fr","translations":{"greeting":"Bonjour","farewell":"Au revoir"}}"#,
        );

        let file = TranslationFile::open(&path).unwrap();
        assert_eq!(file.locale, "fr");
        let ids: Vec<_> = file.translations.keys().collect();
        assert_eq!(ids, vec!["greeting", "farewell"]);
    }

    #[test]
    fn test_merge_order() {
        let dir = tempfile::tempdir().unwrap();
        let base = write(
            dir.path(),
            "base.json",
            r#"{"locale":"fr","translations":{"a":"un","b":"deux"}}"#,
        );
        let extra = write(
            dir.path(),
            "extra.json",
            r#"{"locale":"fr","translations":{"b":"DEUX","c":"trois"}}"#,
        );

        let merged = load_translations(&[base, extra], "fr").unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged["b"], "DEUX");
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "broken.json", r#"{"locale": "fr""#);

        let err = TranslationFile::open(&path).unwrap_err();
        assert!(matches!(*err, Error::TranslationParse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = TranslationFile::open("/nonexistent/messages.json").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
