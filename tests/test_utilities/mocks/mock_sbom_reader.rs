use ots_sbom::prelude::*;
use std::path::Path;

/// Mock SbomReader returning a fixed package list
pub struct MockSbomReader {
    records: Vec<PackageRecord>,
}

impl MockSbomReader {
    pub fn new(records: Vec<PackageRecord>) -> Self {
        Self { records }
    }

    /// Records from `(name, version, ecosystem)` triples
    pub fn from_packages(packages: &[(&str, &str, Ecosystem)]) -> Self {
        let records = packages
            .iter()
            .map(|(name, version, ecosystem)| {
                PackageRecord::new(name.to_string(), version.to_string(), ecosystem.clone())
                    .unwrap()
            })
            .collect();
        Self::new(records)
    }
}

impl SbomReader for MockSbomReader {
    fn read_packages(&self, _path: &Path) -> Result<Vec<PackageRecord>> {
        Ok(self.records.clone())
    }
}
