//! Localize command report.

use std::path::PathBuf;

use ngpreset_core::Diagnostic;

use super::output::{Output, Report};

#[derive(Debug)]
pub struct LocalizeReport {
    pub locale: String,
    pub files: Vec<LocalizedFile>,
    /// Diagnostics recorded while translating.
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
pub struct LocalizedFile {
    pub source: PathBuf,
    pub output: PathBuf,
}

impl LocalizeReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for LocalizeReport {
    fn render(&self, out: &mut dyn Output) {
        for diagnostic in &self.diagnostics {
            out.diagnostic(diagnostic.severity.as_str(), &diagnostic.message);
        }

        out.key_value("Locale", &self.locale);
        for file in &self.files {
            out.list_item(&format!(
                "{} -> {}",
                file.source.display(),
                file.output.display()
            ));
        }
    }
}
