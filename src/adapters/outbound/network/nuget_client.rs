use super::HttpClient;
use crate::ports::outbound::EcosystemResolver;
use crate::resolution::domain::{DependencyManifest, RepoMetadata};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;

const REGISTRATION_URL: &str = "https://api.nuget.org/v3/registration5-semver1";

/// Generic .NET landing page some older packages use as project URL
const DOT_NET_PROJECT_URL: &str = "https://dot.net/";

/// NuGet stores unlisted packages with this publish year
const UNLISTED_PUBLISH_YEAR: i32 = 1900;

#[derive(Debug, Deserialize)]
struct RegistrationIndex {
    #[serde(default)]
    items: Vec<RegistrationPage>,
}

/// A page of the registration index; large packages leave `items` out and only link the page
#[derive(Debug, Deserialize)]
struct RegistrationPage {
    #[serde(rename = "@id")]
    id: String,
    #[serde(default)]
    items: Option<Vec<RegistrationLeaf>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationLeaf {
    catalog_entry: CatalogEntry,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    authors: Option<Authors>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    license_expression: Option<String>,
    #[serde(default)]
    license_url: Option<String>,
    #[serde(default)]
    project_url: Option<String>,
    #[serde(default)]
    published: Option<DateTime<Utc>>,
    #[serde(default)]
    dependency_groups: Vec<DependencyGroup>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Authors {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
struct DependencyGroup {
    #[serde(default)]
    dependencies: Vec<PackageDependency>,
}

#[derive(Debug, Clone, Deserialize)]
struct PackageDependency {
    id: String,
    #[serde(default)]
    range: Option<String>,
}

impl CatalogEntry {
    fn metadata(&self) -> RepoMetadata {
        let full_name = match &self.authors {
            Some(Authors::One(author)) => author.clone(),
            Some(Authors::Many(authors)) => authors.join(", "),
            None => String::new(),
        };

        // Microsoft descriptions start with a one-line summary followed by boilerplate
        let description = self
            .description
            .as_deref()
            .and_then(|d| d.lines().next())
            .unwrap_or_default()
            .trim_end()
            .to_string();

        let license = self
            .license_expression
            .clone()
            .filter(|l| !l.is_empty())
            .or_else(|| self.license_url.clone())
            .unwrap_or_default();

        let project_url = self
            .project_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(|url| {
                if url == DOT_NET_PROJECT_URL {
                    format!("https://www.nuget.org/packages/{}", self.id)
                } else {
                    url.to_string()
                }
            });

        let release = self
            .published
            .filter(|published| published.year() != UNLISTED_PUBLISH_YEAR);

        RepoMetadata {
            full_name,
            description,
            license,
            project_url,
            release,
        }
    }

    /// Union over all target-framework groups
    fn manifest(&self) -> DependencyManifest {
        self.dependency_groups
            .iter()
            .flat_map(|group| group.dependencies.iter())
            .map(|dep| (dep.id.as_str(), dep.range.clone().unwrap_or_default()))
            .collect()
    }
}

/// Finds the catalog entry for exactly `version` across all inlined pages
fn find_version<'a>(pages: &'a [RegistrationPage], version: &str) -> Option<&'a CatalogEntry> {
    pages
        .iter()
        .filter_map(|page| page.items.as_deref())
        .flatten()
        .map(|leaf| &leaf.catalog_entry)
        .find(|entry| entry.version == version)
}

fn registration_index_url(id: &str) -> String {
    format!(
        "{}/{}/index.json",
        REGISTRATION_URL,
        urlencoding::encode(&id.to_lowercase())
    )
}

/// NuGetRegistryClient adapter - resolves packages against the NuGet v3 registration API
pub struct NuGetRegistryClient {
    http: HttpClient,
}

impl NuGetRegistryClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    async fn find_entry(&self, id: &str, version: &str) -> Result<Option<CatalogEntry>> {
        let index: RegistrationIndex = self.http.get_json(&registration_index_url(id)).await?;
        self.search_index(&index, id, version).await
    }

    /// Inlined pages first; linked pages are fetched one by one until the version shows up
    async fn search_index(
        &self,
        index: &RegistrationIndex,
        id: &str,
        version: &str,
    ) -> Result<Option<CatalogEntry>> {
        if let Some(entry) = find_version(&index.items, version) {
            return Ok(Some(entry.clone()));
        }

        for page in index.items.iter().filter(|page| page.items.is_none()) {
            let fetched: RegistrationPage = self.http.get_json(&page.id).await?;
            if let Some(entry) = find_version(std::slice::from_ref(&fetched), version) {
                return Ok(Some(entry.clone()));
            }
        }

        tracing::debug!(package = %id, %version, "version not listed in NuGet registration");
        Ok(None)
    }
}

#[async_trait]
impl EcosystemResolver for NuGetRegistryClient {
    async fn resolve_metadata(&self, name: &str, version: &str) -> Result<RepoMetadata> {
        Ok(self
            .find_entry(name, version)
            .await?
            .map(|entry| entry.metadata())
            .unwrap_or_default())
    }

    async fn fetch_dependency_manifest(
        &self,
        name: &str,
        version: &str,
    ) -> Result<DependencyManifest> {
        Ok(self
            .find_entry(name, version)
            .await?
            .map(|entry| entry.manifest())
            .unwrap_or_default())
    }
}
