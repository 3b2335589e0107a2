use crate::ports::outbound::SbomReader;
use crate::resolution::domain::{split_go_module_path, Ecosystem, PackageRecord};
use crate::shared::error::SbomError;
use crate::shared::security::read_checked;
use crate::shared::Result;
use serde::Deserialize;
use std::path::Path;

/// Version Syft reports for the main module of a Go binary
const DEVEL_VERSION: &str = "(devel)";

#[derive(Debug, Deserialize)]
struct SyftDocument {
    #[serde(default)]
    artifacts: Vec<SyftArtifact>,
}

#[derive(Debug, Deserialize)]
struct SyftArtifact {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(rename = "type", default)]
    artifact_type: Option<String>,
    #[serde(default)]
    purl: Option<String>,
}

/// SyftJsonReader adapter for Syft JSON documents (`syft <target> -o json`)
///
/// Only the `artifacts` array is read. Relationships, sources and licenses reported by Syft are
/// ignored; metadata comes from the registries.
pub struct SyftJsonReader;

impl SyftJsonReader {
    pub fn new() -> Self {
        Self
    }

    /// Parses document text into records; `path` is used for error messages only
    fn parse(&self, content: &str, path: &Path) -> Result<Vec<PackageRecord>> {
        let document: SyftDocument =
            serde_json::from_str(content).map_err(|e| SbomError::SbomParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        let mut records = Vec::with_capacity(document.artifacts.len());

        for (index, artifact) in document.artifacts.into_iter().enumerate() {
            if artifact.version.as_deref() == Some(DEVEL_VERSION) {
                tracing::debug!(
                    artifact = artifact.name.as_deref().unwrap_or_default(),
                    "skipping main module"
                );
                continue;
            }

            records.push(Self::to_record(index, artifact)?);
        }

        Ok(records)
    }

    fn to_record(index: usize, artifact: SyftArtifact) -> Result<PackageRecord> {
        let name = artifact
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| SbomError::InvalidPackage {
                index,
                reason: "artifact has no name".to_string(),
            })?;
        let version = artifact
            .version
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| SbomError::InvalidPackage {
                index,
                reason: format!("artifact '{}' has no version", name),
            })?;

        let ecosystem = Ecosystem::detect(artifact.purl.as_deref(), artifact.artifact_type.as_deref());

        let (name, sub_path) = match ecosystem {
            Ecosystem::Go => split_go_module_path(&name),
            _ => (name, None),
        };

        let record = PackageRecord::new(name, version, ecosystem).map_err(|e| {
            SbomError::InvalidPackage {
                index,
                reason: e.to_string(),
            }
        })?;

        Ok(record
            .with_sub_path(sub_path)
            .with_content_id(artifact.id.unwrap_or_default())
            .with_purl(artifact.purl))
    }
}

impl Default for SyftJsonReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomReader for SyftJsonReader {
    fn read_packages(&self, path: &Path) -> Result<Vec<PackageRecord>> {
        if !path.exists() {
            return Err(SbomError::SbomNotFound {
                path: path.to_path_buf(),
                suggestion: "Create one with `syft <image or directory> -o json > sbom.json` \
                             and pass its path"
                    .to_string(),
            }
            .into());
        }

        let content = read_checked(path, "SBOM file")?;
        let records = self.parse(&content, path)?;

        tracing::info!(path = %path.display(), packages = records.len(), "SBOM read");
        Ok(records)
    }
}
