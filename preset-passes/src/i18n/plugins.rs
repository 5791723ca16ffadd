//! Built-in translate and locale passes.

use std::{
    any::Any,
    sync::{Arc, LazyLock},
};

use eyre::Result;
use indexmap::IndexMap;
use ngpreset_config::MissingTranslation;
use ngpreset_core::Diagnostics;
use regex::{Captures, NoExpand, Regex};
use serde_json::Value;

use super::{I18nPluginCreators, TranslationTable};
use crate::{
    names,
    pass::{PassOptions, Plugin, Transform},
};

static LOCALE_ACCESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:typeof\s+\$localize\s*!==?\s*(?:"undefined"|'undefined')\s*&&\s*)?\$localize\.locale\b"#,
    )
    .expect("locale access pattern is valid")
});

static LOCALIZE_TEMPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\$localize\s*`((?:[^`\\]|\\.)*)`").expect("localize pattern is valid")
});

static SUBSTITUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)\}").expect("substitution pattern is valid"));

/// A `$localize` call site as seen by the translate pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizeCall {
    /// The computed message id.
    pub message_id: String,
    /// The source message, used as the fallback.
    pub source_text: String,
    /// Placeholder name to the expression text it stands for.
    pub substitutions: IndexMap<String, String>,
}

impl LocalizeCall {
    pub fn new(message_id: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            source_text: source_text.into(),
            substitutions: IndexMap::new(),
        }
    }

    pub fn substitution(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.substitutions.insert(name.into(), value.into());
        self
    }

    /// Read the body of a `$localize` tagged template.
    ///
    /// The message id comes from the `:meaning|description@@id:` block.
    /// Returns `None` when there is no custom id. Unnamed placeholders are
    /// called `PH`, `PH_1`, `PH_2` and so on. Substitutions keep their
    /// `${expr}` text, so the source text is still valid template content.
    pub fn from_template(body: &str) -> Option<Self> {
        let mut parts = Vec::new();
        let mut expressions = Vec::new();
        let mut last = 0;
        for captures in SUBSTITUTION.captures_iter(body) {
            let (Some(whole), Some(expression)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            parts.push(&body[last..whole.start()]);
            expressions.push(expression.as_str());
            last = whole.end();
        }
        parts.push(&body[last..]);

        let (first, rest) = parts.split_first()?;
        let (metadata, text) = split_block(first);
        let (_, message_id) = metadata?.split_once("@@")?;
        let message_id = message_id.trim();
        if message_id.is_empty() {
            return None;
        }

        let mut call = Self::new(message_id, text);
        for (index, (expression, part)) in expressions.iter().zip(rest).enumerate() {
            let (name, text) = split_block(part);
            let name = match name {
                Some(name) => name.to_string(),
                None if index == 0 => "PH".to_string(),
                None => format!("PH_{index}"),
            };
            let value = format!("${{{expression}}}");
            call.source_text.push_str(&value);
            call.source_text.push_str(text);
            call.substitutions.insert(name, value);
        }
        Some(call)
    }
}

/// Split a leading `:block:` off a message part.
fn split_block(part: &str) -> (Option<&str>, &str) {
    part.strip_prefix(':')
        .and_then(|rest| rest.split_once(':'))
        .map_or((None, part), |(block, text)| (Some(block), text))
}

fn escape_template(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// Replaces translatable messages with their translation.
#[derive(Debug)]
pub struct TranslatePlugin {
    diagnostics: Arc<Diagnostics>,
    translations: Arc<TranslationTable>,
    missing_translation: MissingTranslation,
}

impl TranslatePlugin {
    pub fn new(
        diagnostics: Arc<Diagnostics>,
        translations: Arc<TranslationTable>,
        missing_translation: MissingTranslation,
    ) -> Self {
        Self {
            diagnostics,
            translations,
            missing_translation,
        }
    }

    pub fn missing_translation(&self) -> MissingTranslation {
        self.missing_translation
    }

    /// Translate one call site.
    ///
    /// Failures are recorded in the sink and the source text is kept.
    pub fn translate(&self, call: &LocalizeCall) -> String {
        self.translate_escaped(call, str::to_string)
    }

    /// Replace every `$localize` tagged template that has a custom id with a
    /// plain template literal holding its translation.
    ///
    /// Messages without a custom id are left for the host.
    pub fn rewrite(&self, source: &str) -> String {
        LOCALIZE_TEMPLATE
            .replace_all(source, |captures: &Captures<'_>| {
                let body = captures.get(1).map_or("", |body| body.as_str());
                match LocalizeCall::from_template(body) {
                    Some(call) => format!("`{}`", self.translate_escaped(&call, escape_template)),
                    None => {
                        tracing::debug!("leaving $localize message without a custom id");
                        captures[0].to_string()
                    }
                }
            })
            .into_owned()
    }

    fn translate_escaped(&self, call: &LocalizeCall, escape: impl Fn(&str) -> String) -> String {
        let Some(translation) = self.translations.get(&call.message_id) else {
            self.diagnostics.add(
                self.missing_translation.severity(),
                format!(
                    "No translation found for \"{}\" (\"{}\").",
                    call.message_id, call.source_text
                ),
            );
            return call.source_text.clone();
        };

        match translation.render_escaped(&call.substitutions, escape) {
            Ok(text) => text,
            Err(placeholder) => {
                self.diagnostics.error(format!(
                    "There is a placeholder name mismatch with the translation provided for the message \"{}\" (\"{}\").\n  The translation contains a placeholder with name {}, which does not exist in the message.",
                    call.message_id, call.source_text, placeholder
                ));
                call.source_text.clone()
            }
        }
    }
}

impl Transform for TranslatePlugin {
    fn name(&self) -> &str {
        names::LOCALIZE_TRANSLATE
    }

    fn options(&self) -> PassOptions {
        let mut options = PassOptions::new();
        options.insert(
            "missingTranslation".to_string(),
            Value::from(self.missing_translation.as_str()),
        );
        options.insert(
            "translations".to_string(),
            Value::from(self.translations.len()),
        );
        options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Embeds the active locale identifier.
#[derive(Debug, Clone)]
pub struct LocalePlugin {
    locale: String,
}

impl LocalePlugin {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Replace every `$localize.locale` read with the locale literal.
    pub fn rewrite(&self, source: &str) -> String {
        let literal = Value::from(self.locale.as_str()).to_string();
        LOCALE_ACCESS
            .replace_all(source, NoExpand(&literal))
            .into_owned()
    }
}

impl Transform for LocalePlugin {
    fn name(&self) -> &str {
        names::LOCALIZE_LOCALE
    }

    fn options(&self) -> PassOptions {
        let mut options = PassOptions::new();
        options.insert("locale".to_string(), Value::from(self.locale.as_str()));
        options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Creators for [`TranslatePlugin`] and [`LocalePlugin`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalizePluginCreators;

impl I18nPluginCreators for LocalizePluginCreators {
    fn make_translate_plugin(
        &self,
        diagnostics: Arc<Diagnostics>,
        translations: Arc<TranslationTable>,
        missing_translation: MissingTranslation,
    ) -> Result<Plugin> {
        Ok(Arc::new(TranslatePlugin::new(
            diagnostics,
            translations,
            missing_translation,
        )))
    }

    fn make_locale_plugin(&self, locale: &str) -> Result<Plugin> {
        Ok(Arc::new(LocalePlugin::new(locale)))
    }
}
