use crate::resolution::domain::PackageRecord;
use crate::shared::Result;
use std::path::Path;

/// SbomReader port - turns a scanner SBOM into package records
pub trait SbomReader {
    /// Reads the SBOM at `path` and returns its packages in document order
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist, is a symlink or is too large
    /// - The document cannot be parsed
    /// - A package lacks a name or version
    fn read_packages(&self, path: &Path) -> Result<Vec<PackageRecord>>;
}
