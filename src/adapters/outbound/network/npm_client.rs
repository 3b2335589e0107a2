use super::HttpClient;
use crate::ports::outbound::EcosystemResolver;
use crate::resolution::domain::{DependencyManifest, RepoMetadata};
use crate::shared::Result;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::Deserialize;

const REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Per-version document of the npm registry (`/<name>/<version>`)
#[derive(Debug, Deserialize)]
struct NpmVersionDocument {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    author: Option<NpmPerson>,
    #[serde(default)]
    license: Option<NpmLicense>,
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    dependencies: IndexMap<String, serde_json::Value>,
}

/// `author` is either `"Name <mail> (url)"` or `{ "name": ..., "email": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NpmPerson {
    Text(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
    Other(IgnoredAny),
}

impl NpmPerson {
    fn display_name(&self) -> String {
        match self {
            NpmPerson::Text(text) => text.trim().to_string(),
            NpmPerson::Object { name } => name.as_deref().unwrap_or_default().trim().to_string(),
            NpmPerson::Other(_) => String::new(),
        }
    }
}

/// `license` is an SPDX string or the legacy `{ "type": ..., "url": ... }` object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NpmLicense {
    Expression(String),
    Legacy {
        #[serde(rename = "type", default)]
        kind: Option<String>,
    },
    Other(IgnoredAny),
}

impl NpmLicense {
    fn identifier(&self) -> String {
        match self {
            NpmLicense::Expression(id) => id.clone(),
            NpmLicense::Legacy { kind } => kind.clone().unwrap_or_default(),
            NpmLicense::Other(_) => String::new(),
        }
    }
}

impl NpmVersionDocument {
    fn metadata(&self) -> RepoMetadata {
        RepoMetadata {
            full_name: self
                .author
                .as_ref()
                .map(NpmPerson::display_name)
                .unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            license: self
                .license
                .as_ref()
                .map(NpmLicense::identifier)
                .unwrap_or_default(),
            project_url: self.homepage.clone().filter(|url| !url.is_empty()),
            // the per-version document carries no publish date
            release: None,
        }
    }

    fn manifest(&self) -> DependencyManifest {
        self.dependencies
            .iter()
            .filter_map(|(name, requirement)| {
                requirement
                    .as_str()
                    .map(|req| (name.as_str(), req.to_string()))
            })
            .collect()
    }
}

/// Builds the registry URL for `name@version`
///
/// The name is lowercased; a scoped name keeps its `@` and encodes the scope separator as
/// `%2f` (`@angular/core` -> `@angular%2fcore`).
fn version_document_url(name: &str, version: &str) -> String {
    let name = name.to_lowercase();
    let encoded_name = match name.strip_prefix('@').and_then(|n| n.split_once('/')) {
        Some((scope, package)) => format!(
            "@{}%2f{}",
            urlencoding::encode(scope),
            urlencoding::encode(package)
        ),
        None => urlencoding::encode(&name).into_owned(),
    };

    format!(
        "{}/{}/{}",
        REGISTRY_URL,
        encoded_name,
        urlencoding::encode(version)
    )
}

/// NpmRegistryClient adapter - resolves npm packages against registry.npmjs.org
pub struct NpmRegistryClient {
    http: HttpClient,
}

impl NpmRegistryClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    async fn fetch_document(&self, name: &str, version: &str) -> Result<NpmVersionDocument> {
        let url = version_document_url(name, version);
        Ok(self.http.get_json(&url).await?)
    }
}

#[async_trait]
impl EcosystemResolver for NpmRegistryClient {
    async fn resolve_metadata(&self, name: &str, version: &str) -> Result<RepoMetadata> {
        Ok(self.fetch_document(name, version).await?.metadata())
    }

    async fn fetch_dependency_manifest(
        &self,
        name: &str,
        version: &str,
    ) -> Result<DependencyManifest> {
        Ok(self.fetch_document(name, version).await?.manifest())
    }
}
