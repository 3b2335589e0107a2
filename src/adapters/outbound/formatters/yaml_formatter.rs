use crate::application::read_models::LibraryDocument;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use anyhow::Context;

/// YamlFormatter adapter - the library document as YAML
pub struct YamlFormatter;

impl YamlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for YamlFormatter {
    fn format(&self, document: &LibraryDocument) -> Result<String> {
        serde_yaml_ng::to_string(document).context("Failed to serialize report to YAML")
    }
}
