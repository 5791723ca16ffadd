//! Missing translation handling through the composed pass list.

mod common;

use std::sync::Arc;

use common::composer;
use ngpreset_config::MissingTranslation;
use ngpreset_core::Severity;
use ngpreset_passes::{
    I18nOptions, PassList, PipelineOptions,
    i18n::{LocalePlugin, LocalizeCall, TranslatePlugin, parse_translations},
    names,
};

fn compose(missing: Option<MissingTranslation>) -> PassList {
    let table = parse_translations(vec![("greeting".to_string(), "Bonjour".to_string())]);
    let mut i18n = I18nOptions::new("fr").with_translation(Arc::new(table));
    i18n.missing_translation_behavior = missing;

    let options = PipelineOptions {
        i18n: Some(i18n),
        ..Default::default()
    };
    composer().compose(&options).unwrap()
}

fn translate_missing(passes: &PassList) {
    let translate = passes.find_plugin::<TranslatePlugin>().unwrap();
    let output = translate.translate(&LocalizeCall::new("missing", "Missing message"));
    assert_eq!(output, "Missing message");
}

#[test]
fn test_translate_then_locale() {
    let passes = compose(Some(MissingTranslation::Warning));
    assert_eq!(
        passes.plugin_names(),
        vec![names::LOCALIZE_TRANSLATE, names::LOCALIZE_LOCALE]
    );
    assert!(passes.presets.is_empty());
}

#[test]
fn test_missing_translation_error() {
    let passes = compose(Some(MissingTranslation::Error));
    translate_missing(&passes);

    let diagnostics = passes.diagnostics();
    assert!(passes.has_errors());
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.messages()[0].message.contains("\"missing\""));
}

#[test]
fn test_missing_translation_warning() {
    let passes = compose(Some(MissingTranslation::Warning));
    translate_missing(&passes);

    let diagnostics = passes.diagnostics();
    assert!(!passes.has_errors());
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.messages()[0].severity, Severity::Warning);
}

#[test]
fn test_missing_translation_ignore() {
    for missing in [Some(MissingTranslation::Ignore), None] {
        let passes = compose(missing);
        translate_missing(&passes);
        assert!(passes.diagnostics().is_empty());
    }
}

#[test]
fn test_locale_without_translations() {
    let options = PipelineOptions {
        i18n: Some(I18nOptions::new("de-CH")),
        ..Default::default()
    };
    let passes = composer().compose(&options).unwrap();

    assert_eq!(passes.plugin_names(), vec![names::LOCALIZE_LOCALE]);
    let locale = passes.find_plugin::<LocalePlugin>().unwrap();
    assert_eq!(
        locale.rewrite("registerLocale($localize.locale);"),
        r#"registerLocale("de-CH");"#
    );
}

#[test]
fn test_localize_source_reports_missing_messages() {
    let (reporter, records) = common::recording_reporter();
    let options = PipelineOptions {
        i18n: Some(
            I18nOptions::new("fr")
                .with_translation(Arc::new(parse_translations(vec![(
                    "greeting".to_string(),
                    "Bonjour {$NAME}".to_string(),
                )])))
                .with_missing_translation(MissingTranslation::Error),
        ),
        ..Default::default()
    }
    .with_reporter(reporter);
    let passes = composer().compose(&options).unwrap();

    let source = r#"title = $localize`:@@greeting:Hello ${user}:NAME:`;
footer = $localize`:@@footer:Thanks`;
lang = $localize.locale;"#;
    let translated = passes.find_plugin::<TranslatePlugin>().unwrap().rewrite(source);
    let localized = passes.find_plugin::<LocalePlugin>().unwrap().rewrite(&translated);

    assert_eq!(
        localized,
        r#"title = `Bonjour ${user}`;
footer = `Thanks`;
lang = "fr";"#
    );
    assert!(passes.has_errors());
    assert_eq!(
        *records.lock().unwrap(),
        vec![(
            Severity::Error,
            r#"No translation found for "footer" ("Thanks")."#.to_string()
        )]
    );
}
