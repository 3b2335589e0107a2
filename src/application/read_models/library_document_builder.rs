//! Builder for the library document read model

use super::library_document::{
    DocumentMetadataView, LibraryDocument, LibraryTableView, LibraryView, ToolView,
};
use crate::resolution::domain::{Ecosystem, LibraryEntry};
use chrono::{SecondsFormat, Utc};

const FUNCTION: &str = "Library";
const INCORPORATED: &str = "Yes";
const LEVEL_OF_CONCERN: &str = "Minor";

const ANSWER_2: &str = "The hardware specification is documented in [DPS].\n\
The software specification is outlined in [SRS].";

const ANSWER_3: &str = "Software Requirements are captured in [SRS]. Software Tests are described in [SVP] and [VTP]. \
Traceability is ensured by [EVDR].\n\n\
(1) The OTS SW was incorporated in the device during installation of the system. \
There is no possibility to see, remove or change the system files.";

const ANSWER_5: &str = "Software Tests are described in [SVP] and [VTP].\n\n\
The OTS SW is incorporated in the device during installation of the system. \
There is no possibility to see, remove or change the system files.";

const ANSWER_6: &str = "The OTS SW is incorporated in the device during installation of the system and it will be ensured, \
that the user can not see, remove or change the system files.\n\
Configuration and Version of the OTS is kept under version control in Git\n\n\
The lifecycle of the OTS will be maintained using the [FOSS] process.";

fn answer_1(manufacturer: &str, version: &str, license: &str, summary: &str) -> String {
    format!(
        "Manufacturer: {}\nVersion: {}\nLicense: {}\n\n{}",
        manufacturer, version, license, summary
    )
}

/// Empty when the library has no parents
fn answer_4(parents: &[String]) -> String {
    if parents.is_empty() {
        return String::new();
    }
    format!(
        "The software is needed as dependency of {}.\n\n\
         There are no specialized requirements defined for this component. \
         Requirements for the system are specified in [SRS].\n\n\
         The OTS SW does not link with software outside the system.",
        parents.join(", ")
    )
}

/// Builds the [`LibraryDocument`] from aggregated library entries
pub struct LibraryDocumentBuilder;

impl LibraryDocumentBuilder {
    /// Builds a document with fresh metadata (new document id, current time)
    pub fn build(libraries: &[LibraryEntry]) -> LibraryDocument {
        Self::build_with_metadata(libraries, Self::generate_metadata())
    }

    pub fn build_with_metadata(
        libraries: &[LibraryEntry],
        metadata: DocumentMetadataView,
    ) -> LibraryDocument {
        LibraryDocument {
            metadata,
            libraries: libraries.iter().map(Self::build_library).collect(),
        }
    }

    pub fn generate_metadata() -> DocumentMetadataView {
        DocumentMetadataView {
            document_id: format!("urn:uuid:{}", uuid::Uuid::new_v4()),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            tool: ToolView {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    fn build_library(entry: &LibraryEntry) -> LibraryView {
        let record = &entry.record;
        let metadata = &entry.metadata;

        let table = LibraryTableView {
            manufacturer: metadata.full_name.clone(),
            software: record.software_name().to_string(),
            summary: metadata.description.clone(),
            version: record.version().to_string(),
            license: metadata.license.clone(),
            function: FUNCTION.to_string(),
            incorporated: INCORPORATED.to_string(),
            level_of_concern: LEVEL_OF_CONCERN.to_string(),
            parents: entry.parents.clone(),
            answer1: answer_1(
                &metadata.full_name,
                record.version(),
                &metadata.license,
                &metadata.description,
            ),
            answer2: ANSWER_2.to_string(),
            answer3: ANSWER_3.to_string(),
            answer4: answer_4(&entry.parents),
            answer5: ANSWER_5.to_string(),
            answer6: ANSWER_6.to_string(),
        };

        LibraryView {
            source: Self::source(entry),
            submodule: record.sub_path().unwrap_or_default().to_string(),
            release: metadata.release_date().unwrap_or_default(),
            library_table: table,
        }
    }

    /// Registry web page for npm and NuGet, the module path for Go
    fn source(entry: &LibraryEntry) -> String {
        let name = entry.record.name();
        match entry.record.ecosystem() {
            Ecosystem::Npm => format!("https://www.npmjs.com/package/{}", name),
            Ecosystem::NuGet => entry
                .metadata
                .project_url
                .clone()
                .unwrap_or_else(|| format!("https://www.nuget.org/packages/{}", name)),
            Ecosystem::Go | Ecosystem::Other(_) => name.to_string(),
        }
    }
}
