//! Library document read model
//!
//! The serializable shape of the report: one entry per library with its compliance table,
//! plus document metadata. Field names are the YAML/JSON keys.

use serde::Serialize;

/// The complete report
#[derive(Debug, Clone, Serialize)]
pub struct LibraryDocument {
    pub metadata: DocumentMetadataView,
    pub libraries: Vec<LibraryView>,
}

/// Identification of one generated document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadataView {
    /// `urn:uuid:<v4>`
    pub document_id: String,
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub tool: ToolView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolView {
    pub name: String,
    pub version: String,
}

/// One library of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryView {
    /// Registry page or module path
    pub source: String,
    /// Go sub-package path; empty elsewhere
    pub submodule: String,
    /// `YYYY-MM-DD`; empty when the registry has no release date
    pub release: String,
    pub library_table: LibraryTableView,
}

/// Compliance table of one library
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryTableView {
    pub manufacturer: String,
    pub software: String,
    pub summary: String,
    pub version: String,
    pub license: String,
    pub function: String,
    pub incorporated: String,
    pub level_of_concern: String,
    pub parents: Vec<String>,
    pub answer1: String,
    pub answer2: String,
    pub answer3: String,
    pub answer4: String,
    pub answer5: String,
    pub answer6: String,
}
