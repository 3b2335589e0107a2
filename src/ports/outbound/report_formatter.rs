use crate::application::read_models::LibraryDocument;
use crate::shared::Result;

/// ReportFormatter port - renders the library document
///
/// A pure data-to-text transform; implementations do no I/O.
pub trait ReportFormatter {
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, document: &LibraryDocument) -> Result<String>;
}
