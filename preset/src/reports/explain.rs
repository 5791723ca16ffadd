//! Explain command report.

use std::path::PathBuf;

use super::output::{Output, Report};

/// What each composer step does for a preset.toml.
#[derive(Debug)]
pub struct ExplainReport {
    pub config_path: PathBuf,
    pub steps: Vec<StepSummary>,
    /// Configured targets affected by the Safari class field scope bug.
    pub affected_browsers: Vec<String>,
    pub locale: Option<String>,
    pub missing_translation: String,
}

#[derive(Debug)]
pub struct StepSummary {
    pub name: String,
    pub description: String,
    pub enabled: bool,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("Pass Composition");
        out.newline();

        out.key_value("Input", &self.config_path.display().to_string());
        if let Some(locale) = &self.locale {
            out.key_value_indented("Locale", locale);
            out.key_value_indented("Missing translations", &self.missing_translation);
        }
        out.newline();

        out.section("Steps");
        for (i, step) in self.steps.iter().enumerate() {
            let state = if step.enabled { "on" } else { "off" };
            out.numbered_item(
                i + 1,
                &format!("{} [{}] - {}", step.name, state, step.description),
            );
        }

        if !self.affected_browsers.is_empty() {
            out.newline();
            out.section("Class fields downleveled for");
            for browser in &self.affected_browsers {
                out.list_item(browser);
            }
        }
    }
}
