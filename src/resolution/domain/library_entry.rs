use super::{PackageRecord, RepoMetadata, ResolvedEntry};

/// Final enriched entity handed to the report builder
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryEntry {
    pub record: PackageRecord,
    pub metadata: RepoMetadata,
    pub parents: Vec<String>,
}

impl From<&ResolvedEntry> for LibraryEntry {
    fn from(entry: &ResolvedEntry) -> Self {
        Self {
            record: entry.record().clone(),
            metadata: entry.metadata().clone(),
            parents: entry.parents().to_vec(),
        }
    }
}
