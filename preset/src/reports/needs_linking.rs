//! Needs-linking command report.

use std::path::PathBuf;

use super::output::{Output, Report};

#[derive(Debug)]
pub struct NeedsLinkingReport {
    pub entries: Vec<LinkingEntry>,
}

#[derive(Debug)]
pub struct LinkingEntry {
    pub path: PathBuf,
    /// Skipped without inspecting the contents.
    pub exempt: bool,
    pub requires_linking: bool,
}

impl Report for NeedsLinkingReport {
    fn render(&self, out: &mut dyn Output) {
        for entry in &self.entries {
            let verdict = match (entry.requires_linking, entry.exempt) {
                (true, _) => "needs linking",
                (false, true) => "exempt",
                (false, false) => "no partial declarations",
            };
            out.key_value(&entry.path.display().to_string(), verdict);
        }
    }
}
