//! Validation context and utilities for configuration parsing.

use miette::SourceSpan;

use super::PresetConfig;
use crate::{Result, error::SourceContext};

/// Validation context that carries source information.
///
/// Errors produced through this context point at the offending value in the
/// original TOML text when it can be located.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: &'a SourceContext,
}

impl<'a> ParseContext<'a> {
    pub fn new(source: &'a SourceContext) -> Self {
        Self { source }
    }

    /// Find the span of a quoted string value in the source.
    pub fn find_span(&self, value: &str) -> Option<SourceSpan> {
        find_string_span(self.source.src(), value)
    }

    /// Validate the whole configuration.
    pub fn validate(&self, config: &PresetConfig) -> Result<()> {
        if let Some(i18n) = &config.i18n {
            self.validate_locale(&i18n.locale)?;
        }

        if let Some(browsers) = &config.supported_browsers {
            if browsers.is_empty() {
                return Err(self.source.validation_error(
                    "supported_browsers must not be empty; remove it to skip downleveling",
                    find_key_span(self.source.src(), "supported_browsers"),
                ));
            }
            for entry in browsers {
                self.validate_browser(entry)?;
            }
        }

        let empty_coverage_path = config
            .instrument_code
            .as_ref()
            .is_some_and(|coverage| coverage.included_base_path.as_os_str().is_empty());
        if empty_coverage_path {
            return Err(self.source.validation_error(
                "included_base_path must not be empty",
                find_key_span(self.source.src(), "included_base_path"),
            ));
        }

        Ok(())
    }

    /// Validate a BCP 47 locale tag.
    pub fn validate_locale(&self, locale: &str) -> Result<()> {
        if let Some(reason) = validate_locale_tag(locale) {
            return Err(self
                .source
                .invalid_locale_error(locale, reason, self.find_span(locale)));
        }
        Ok(())
    }

    /// Validate a browserslist entry: `<name> <version>` or a version
    /// bound such as `<name> <=<version>`.
    pub fn validate_browser(&self, entry: &str) -> Result<()> {
        let valid = entry
            .split_once(char::is_whitespace)
            .is_some_and(|(name, rest)| is_browser_entry(name, rest));

        if valid {
            Ok(())
        } else {
            Err(self
                .source
                .invalid_browser_error(entry, self.find_span(entry)))
        }
    }
}

fn is_browser_entry(name: &str, rest: &str) -> bool {
    let rest = rest.trim_start();
    let version = ["<=", ">=", "<", ">"]
        .into_iter()
        .find_map(|op| rest.strip_prefix(op))
        .unwrap_or(rest)
        .trim_start();

    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !version.is_empty()
        && version
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
}

/// Check a locale tag, returning the reason when it is invalid.
pub(crate) fn validate_locale_tag(locale: &str) -> Option<&'static str> {
    if locale.is_empty() {
        return Some("locale cannot be empty");
    }

    let mut subtags = locale.split(['-', '_']);
    let language = subtags.next().unwrap_or_default();
    if !(2..=8).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
        return Some("the language subtag must be 2 to 8 letters");
    }

    for subtag in subtags {
        if subtag.is_empty() || subtag.len() > 8 {
            return Some("subtags must be 1 to 8 characters long");
        }
        if !subtag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Some("subtags may only contain letters and digits");
        }
    }

    None
}

/// Find the span of a quoted string value in the TOML source.
pub(crate) fn find_string_span(src: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let needle = format!("{quote}{value}{quote}");
        if let Some(pos) = src.find(&needle) {
            return Some(SourceSpan::from((pos + 1, value.len())));
        }
    }
    None
}

/// Find the span of a key at the start of a line.
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in src.lines() {
        let trimmed = line.trim_start();
        let is_key = trimmed
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if is_key {
            let start = offset + (line.len() - trimmed.len());
            return Some(SourceSpan::from((start, key.len())));
        }
        offset += line.len() + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_locales() {
        for locale in ["fr", "en-US", "zh-Hant", "de_CH", "es-419"] {
            assert!(validate_locale_tag(locale).is_none(), "{locale}");
        }
    }

    #[test]
    fn test_invalid_locales() {
        assert!(validate_locale_tag("").is_some());
        assert!(validate_locale_tag("f").is_some());
        assert!(validate_locale_tag("fr-").is_some());
        assert!(validate_locale_tag("fr-C@").is_some());
        assert!(validate_locale_tag("12").is_some());
    }

    #[test]
    fn test_browser_entries() {
        for entry in ["safari 15.6", "ios_saf 15.0-15.1", "Safari <=15", "chrome >= 120"] {
            let (name, rest) = entry.split_once(' ').unwrap();
            assert!(is_browser_entry(name, rest), "{entry}");
        }
        for (name, rest) in [("safari", "<="), ("safari", "latest"), ("safari!", "15")] {
            assert!(!is_browser_entry(name, rest), "{name} {rest}");
        }
    }

    #[test]
    fn test_find_string_span() {
        let src = r#"locale = "fr-CA""#;
        let span = find_string_span(src, "fr-CA").unwrap();
        assert_eq!(span.offset(), 10);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_find_key_span() {
        let src = "force_async_transformation = true\n  supported_browsers = []\n";
        let span = find_key_span(src, "supported_browsers").unwrap();
        assert_eq!(span.offset(), 36);
    }
}
