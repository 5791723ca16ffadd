//! Compose command report.

use std::path::PathBuf;

use ngpreset_passes::PassDescriptor;
use serde::Serialize;

use super::output::{Output, Report};

/// The composed passes for a preset.toml.
#[derive(Debug, Serialize)]
pub struct ComposeReport {
    pub config_path: PathBuf,
    pub presets: Vec<PassDescriptor>,
    pub plugins: Vec<PassDescriptor>,
}

impl Report for ComposeReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value("Input", &self.config_path.display().to_string());
        out.newline();

        out.section("Presets");
        if self.presets.is_empty() {
            out.list_item("(none)");
        }
        for (i, preset) in self.presets.iter().enumerate() {
            out.numbered_item(i + 1, &preset.to_string());
        }
        out.newline();

        out.section("Plugins");
        if self.plugins.is_empty() {
            out.list_item("(none)");
        }
        for (i, plugin) in self.plugins.iter().enumerate() {
            out.numbered_item(i + 1, &plugin.to_string());
        }
    }
}
