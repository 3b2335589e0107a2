use super::Ecosystem;
use crate::shared::Result;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// Maximum length for package versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// Number of leading segments that make up a Go module path (`github.com/owner/repo`)
const GO_MODULE_PATH_SEGMENTS: usize = 3;

/// NewType wrapper for package name with validation
///
/// Names from different ecosystems look very different (`@angular/core`,
/// `Microsoft.Extensions.Logging`, `github.com/spf13/cobra`), so only whitespace and control
/// characters are rejected; they would end up in lookup URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }

        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            anyhow::bail!("Package name '{}' contains whitespace or control characters", name);
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for an exact package version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(version: String) -> Result<Self> {
        if version.is_empty() {
            anyhow::bail!("Package version cannot be empty");
        }

        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Package version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        if version.chars().any(|c| c.is_whitespace() || c.is_control()) {
            anyhow::bail!(
                "Package version '{}' contains whitespace or control characters",
                version
            );
        }

        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A package as listed in the SBOM.
///
/// Identity fields are fixed at construction; there are no setters.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageRecord {
    name: PackageName,
    sub_path: Option<String>,
    version: Version,
    content_id: String,
    purl: Option<String>,
    ecosystem: Ecosystem,
}

impl PackageRecord {
    pub fn new(name: String, version: String, ecosystem: Ecosystem) -> Result<Self> {
        Ok(Self {
            name: PackageName::new(name)?,
            sub_path: None,
            version: Version::new(version)?,
            content_id: String::new(),
            purl: None,
            ecosystem,
        })
    }

    pub fn with_sub_path(mut self, sub_path: Option<String>) -> Self {
        self.sub_path = sub_path.filter(|s| !s.is_empty());
        self
    }

    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = content_id.into();
        self
    }

    pub fn with_purl(mut self, purl: Option<String>) -> Self {
        self.purl = purl.filter(|p| !p.is_empty());
        self
    }

    /// Registry name: npm package name, NuGet id or Go module path
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn sub_path(&self) -> Option<&str> {
        self.sub_path.as_deref()
    }

    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    pub fn purl(&self) -> Option<&str> {
        self.purl.as_deref()
    }

    pub fn ecosystem(&self) -> &Ecosystem {
        &self.ecosystem
    }

    /// Name including the sub-path: the full Go package path, the plain name elsewhere
    pub fn full_path(&self) -> String {
        match &self.sub_path {
            Some(sub) => format!("{}/{}", self.name, sub),
            None => self.name.to_string(),
        }
    }

    /// Key used by the resolved set: `name[/sub_path]@version`
    pub fn identity_key(&self) -> String {
        self.to_string()
    }

    /// Last path segment of the name: `github.com/integrii/flaggy` -> `flaggy`
    pub fn software_name(&self) -> &str {
        self.name().rsplit('/').next().unwrap_or(self.name())
    }
}

impl std::fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.sub_path {
            Some(sub) => write!(f, "{}/{}@{}", self.name, sub, self.version),
            None => write!(f, "{}@{}", self.name, self.version),
        }
    }
}

/// Splits a Go package path into module path and sub-path.
///
/// `github.com/aws/aws-sdk-go-v2/service/s3` -> (`github.com/aws/aws-sdk-go-v2`, `service/s3`)
pub fn split_go_module_path(path: &str) -> (String, Option<String>) {
    let mut parts = path.splitn(GO_MODULE_PATH_SEGMENTS + 1, '/');
    let module: Vec<&str> = parts.by_ref().take(GO_MODULE_PATH_SEGMENTS).collect();
    let rest = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
    (module.join("/"), rest)
}
