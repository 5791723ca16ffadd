//! Parsed translations and placeholder rendering.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\$([^}]*)\}").expect("placeholder pattern is valid"));

/// Message id to parsed translation, shared by every file of a locale build.
pub type TranslationTable = IndexMap<String, ParsedTranslation>;

/// A message split into literal parts and `{$NAME}` placeholders.
///
/// `message_parts` always has one more element than `placeholder_names`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTranslation {
    pub text: String,
    pub message_parts: Vec<String>,
    pub placeholder_names: Vec<String>,
}

impl ParsedTranslation {
    /// Parse a message string. Unterminated placeholders stay literal text.
    pub fn parse(text: &str) -> Self {
        let mut message_parts = Vec::new();
        let mut placeholder_names = Vec::new();
        let mut last = 0;

        for captures in PLACEHOLDER.captures_iter(text) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            message_parts.push(text[last..whole.start()].to_string());
            placeholder_names.push(name.as_str().to_string());
            last = whole.end();
        }
        message_parts.push(text[last..].to_string());

        Self {
            text: text.to_string(),
            message_parts,
            placeholder_names,
        }
    }

    /// Render with the call site's placeholder substitutions.
    ///
    /// Returns the first placeholder name with no substitution as the error.
    pub fn render(&self, substitutions: &IndexMap<String, String>) -> Result<String, String> {
        self.render_escaped(substitutions, str::to_string)
    }

    /// Like [`render`](Self::render), passing each literal part through
    /// `escape`. Substituted values are inserted as given.
    pub fn render_escaped(
        &self,
        substitutions: &IndexMap<String, String>,
        escape: impl Fn(&str) -> String,
    ) -> Result<String, String> {
        let mut parts = self.message_parts.iter();
        let mut output = parts.next().map(|part| escape(part.as_str())).unwrap_or_default();
        for (name, part) in self.placeholder_names.iter().zip(parts) {
            let value = substitutions.get(name).ok_or_else(|| name.clone())?;
            output.push_str(value);
            output.push_str(&escape(part.as_str()));
        }
        Ok(output)
    }
}

/// Parse raw message texts into a [`TranslationTable`].
pub fn parse_translations<I>(translations: I) -> TranslationTable
where
    I: IntoIterator<Item = (String, String)>,
{
    translations
        .into_iter()
        .map(|(id, text)| {
            let parsed = ParsedTranslation::parse(&text);
            (id, parsed)
        })
        .collect()
}
