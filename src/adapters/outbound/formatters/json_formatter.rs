use crate::application::read_models::LibraryDocument;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use anyhow::Context;

/// JsonFormatter adapter - the library document as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, document: &LibraryDocument) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(document).context("Failed to serialize report to JSON")?;
        json.push('\n');
        Ok(json)
    }
}
