//! Read models
//!
//! View-optimized structs that the report formatters serialize.

pub mod library_document;
pub mod library_document_builder;

pub use library_document::{
    DocumentMetadataView, LibraryDocument, LibraryTableView, LibraryView, ToolView,
};
pub use library_document_builder::LibraryDocumentBuilder;
