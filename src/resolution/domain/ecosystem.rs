use std::fmt;

/// Package distribution system a record was published to.
///
/// Chosen once when the SBOM is read and never changed afterwards. `Other` keeps the raw type
/// token so unsupported packages can still be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    /// npm registry
    Npm,
    /// NuGet gallery (.NET)
    NuGet,
    /// Go modules, resolved through their GitHub repository
    Go,
    /// Anything else (docker images, conan, pypi, ...)
    Other(String),
}

impl Ecosystem {
    /// Picks the ecosystem from a purl (`pkg:<type>/...`), falling back to the scanner's own
    /// artifact type when the purl is missing or malformed.
    pub fn detect(purl: Option<&str>, artifact_type: Option<&str>) -> Self {
        if let Some(ty) = purl.and_then(purl_type) {
            return Self::from_purl_type(&ty);
        }

        match artifact_type {
            Some(ty) => Self::from_artifact_type(ty),
            None => Ecosystem::Other("unknown".to_string()),
        }
    }

    /// Maps a purl type token
    pub fn from_purl_type(ty: &str) -> Self {
        match ty.to_ascii_lowercase().as_str() {
            "npm" => Ecosystem::Npm,
            "nuget" | "dotnet" => Ecosystem::NuGet,
            "golang" => Ecosystem::Go,
            other => Ecosystem::Other(other.to_string()),
        }
    }

    /// Maps a Syft artifact `type` value
    pub fn from_artifact_type(ty: &str) -> Self {
        match ty.to_ascii_lowercase().as_str() {
            "npm" => Ecosystem::Npm,
            "dotnet" | "nuget" => Ecosystem::NuGet,
            "go-module" => Ecosystem::Go,
            other => Ecosystem::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::NuGet => "nuget",
            Ecosystem::Go => "golang",
            Ecosystem::Other(ty) => ty,
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracts the type token of a package URL: `pkg:npm/%40angular/core@1.0.0` -> `npm`
fn purl_type(purl: &str) -> Option<String> {
    let rest = purl.strip_prefix("pkg:")?;
    let ty = rest.split('/').next()?;
    if ty.is_empty() {
        return None;
    }
    Some(ty.to_ascii_lowercase())
}
