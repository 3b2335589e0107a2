use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Descriptive metadata resolved from a package's registry.
///
/// `Default` is the zero value a package keeps when its lookup fails or the registry does not
/// know the requested version. Resolvers always produce a complete value; it is stored with a
/// single assignment, never merged field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoMetadata {
    /// Author, owner or full repository name
    pub full_name: String,
    pub description: String,
    /// SPDX identifier or free-text license
    pub license: String,
    pub project_url: Option<String>,
    /// Release of this exact version, when the registry exposes one
    pub release: Option<DateTime<Utc>>,
}

impl RepoMetadata {
    /// True when nothing was resolved
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Release date formatted for reports (`YYYY-MM-DD`)
    pub fn release_date(&self) -> Option<String> {
        self.release.map(|r| r.format("%Y-%m-%d").to_string())
    }
}

/// Dependencies a package version declares: name -> version requirement.
///
/// Insertion order follows the registry document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyManifest {
    dependencies: IndexMap<String, String>,
}

impl DependencyManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declared dependency; a repeated name keeps the first requirement
    pub fn declare(&mut self, name: impl Into<String>, requirement: impl Into<String>) {
        self.dependencies
            .entry(name.into())
            .or_insert_with(|| requirement.into());
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }

    pub fn requirement(&self, name: &str) -> Option<&str> {
        self.dependencies.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DependencyManifest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut manifest = Self::new();
        for (name, requirement) in iter {
            manifest.declare(name, requirement);
        }
        manifest
    }
}
