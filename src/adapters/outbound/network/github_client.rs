use super::HttpClient;
use crate::ports::outbound::EcosystemResolver;
use crate::resolution::domain::{DependencyManifest, RepoMetadata};
use crate::shared::error::FetchError;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Once;

const GITHUB_API_URL: &str = "https://api.github.com";
const GO_PROXY_URL: &str = "https://proxy.golang.org";

/// GitHub answers this when it cannot classify a repository's license
const NO_ASSERTION: &str = "NOASSERTION";

#[derive(Debug, Deserialize)]
struct GithubRepository {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    license: Option<GithubLicense>,
    #[serde(default)]
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubLicense {
    #[serde(default)]
    spdx_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubRelease {
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct GithubTag {
    name: String,
    commit: GithubCommitRef,
}

#[derive(Debug, Deserialize)]
struct GithubCommitRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GithubCommit {
    commit: GitCommit,
}

#[derive(Debug, Deserialize)]
struct GitCommit {
    #[serde(default)]
    author: Option<GitSignature>,
}

#[derive(Debug, Deserialize)]
struct GitSignature {
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

impl GithubRepository {
    fn metadata(&self) -> RepoMetadata {
        let license = self
            .license
            .as_ref()
            .and_then(|l| l.spdx_id.as_deref())
            .filter(|id| *id != NO_ASSERTION)
            .unwrap_or_default()
            .to_string();

        RepoMetadata {
            full_name: self.full_name.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            license,
            project_url: self.html_url.clone(),
            release: None,
        }
    }
}

/// Maps vanity import paths to their GitHub mirror (`golang.org/x/net` -> `github.com/golang/net`)
fn normalize_module_path(path: &str) -> String {
    match path.strip_prefix("golang.org/x/") {
        Some(name) if !name.is_empty() => format!("github.com/golang/{}", name),
        _ => path.to_string(),
    }
}

/// Splits `github.com/<owner>/<repo>` into owner and repository
fn github_coordinates(path: &str) -> Option<(&str, &str)> {
    let rest = path.strip_prefix("github.com/")?;
    let (owner, repo) = rest.split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some((owner, repo))
}

/// Git tag of a module version; `+incompatible` is a Go-side suffix only
fn release_tag(version: &str) -> &str {
    version.strip_suffix("+incompatible").unwrap_or(version)
}

/// Case-encodes a module path or version for the module proxy (`BurntSushi` -> `!burnt!sushi`)
fn escape_for_proxy(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_uppercase() {
            escaped.push('!');
            escaped.push(c.to_ascii_lowercase());
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Collects the `require` directives of a go.mod file, single-line and block form
fn parse_go_mod(content: &str) -> DependencyManifest {
    let mut manifest = DependencyManifest::new();
    let mut in_require_block = false;

    for raw in content.lines() {
        let line = match raw.find("//") {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();

        if line.is_empty() {
            continue;
        }

        if in_require_block {
            if line == ")" {
                in_require_block = false;
            } else {
                declare_requirement(&mut manifest, line);
            }
            continue;
        }

        let Some(rest) = line.strip_prefix("require") else {
            continue;
        };
        if !rest.starts_with(|c: char| c.is_whitespace() || c == '(') {
            continue;
        }

        let rest = rest.trim();
        if rest == "(" {
            in_require_block = true;
        } else if let Some(single) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            declare_requirement(&mut manifest, single.trim());
        } else {
            declare_requirement(&mut manifest, rest);
        }
    }

    manifest
}

fn declare_requirement(manifest: &mut DependencyManifest, line: &str) {
    let mut parts = line.split_whitespace();
    if let (Some(module), Some(version)) = (parts.next(), parts.next()) {
        manifest.declare(module, version);
    }
}

/// GithubGoClient adapter - resolves Go modules through GitHub and the Go module proxy
///
/// Repository metadata and release dates come from the GitHub REST API. Declared dependencies
/// come from the module's go.mod served by proxy.golang.org, so the manifest also works for
/// modules not hosted on GitHub.
///
/// # Authentication
/// The GitHub token is only sent to api.github.com. Without a token GitHub applies its
/// unauthenticated rate limit; a warning is logged once on first use.
pub struct GithubGoClient {
    api: HttpClient,
    proxy: HttpClient,
    token_warning: Once,
}

impl GithubGoClient {
    /// `http` must not carry credentials; the token is attached to a copy used for GitHub
    pub fn new(http: HttpClient, github_token: Option<String>) -> Self {
        Self {
            api: http.clone().with_bearer_token(github_token),
            proxy: http,
            token_warning: Once::new(),
        }
    }

    fn warn_if_unauthenticated(&self) {
        if !self.api.has_bearer_token() {
            self.token_warning.call_once(|| {
                tracing::warn!(
                    "no GitHub token configured (--github-token or GITHUB_TOKEN); \
                     GitHub requests are subject to the unauthenticated rate limit"
                );
            });
        }
    }

    /// Release timestamp of `tag`: the GitHub release if one exists, else the tagged commit
    async fn release_timestamp(&self, owner: &str, repo: &str, tag: &str) -> Option<DateTime<Utc>> {
        let release_url = format!(
            "{}/repos/{}/{}/releases/tags/{}",
            GITHUB_API_URL,
            owner,
            repo,
            urlencoding::encode(tag)
        );
        match self.api.get_json::<GithubRelease>(&release_url).await {
            Ok(GithubRelease {
                published_at: Some(published),
            }) => return Some(published),
            Ok(_) => {}
            Err(e) => tracing::debug!(%owner, %repo, %tag, "no release for tag: {}", e),
        }

        match self.tagged_commit_date(owner, repo, tag).await {
            Ok(date) => date,
            Err(e) => {
                tracing::debug!(%owner, %repo, %tag, "failed to read tag commit date: {}", e);
                None
            }
        }
    }

    async fn tagged_commit_date(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
    ) -> Result<Option<DateTime<Utc>>> {
        let tags_url = format!("{}/repos/{}/{}/tags?per_page=100", GITHUB_API_URL, owner, repo);
        let tags: Vec<GithubTag> = self.api.get_json(&tags_url).await?;

        let Some(found) = tags.into_iter().find(|t| t.name == tag) else {
            tracing::debug!(%owner, %repo, %tag, "tag not found");
            return Ok(None);
        };

        let commit_url = format!(
            "{}/repos/{}/{}/commits/{}",
            GITHUB_API_URL, owner, repo, found.commit.sha
        );
        let commit: GithubCommit = self.api.get_json(&commit_url).await?;

        Ok(commit.commit.author.and_then(|a| a.date))
    }
}

#[async_trait]
impl EcosystemResolver for GithubGoClient {
    async fn resolve_metadata(&self, name: &str, version: &str) -> Result<RepoMetadata> {
        let path = normalize_module_path(name);
        let Some((owner, repo)) = github_coordinates(&path) else {
            return Err(FetchError::UnsupportedSource(name.to_string()).into());
        };

        self.warn_if_unauthenticated();

        let repo_url = format!("{}/repos/{}/{}", GITHUB_API_URL, owner, repo);
        let repository: GithubRepository = self.api.get_json(&repo_url).await?;

        let mut metadata = repository.metadata();
        metadata.release = self
            .release_timestamp(owner, repo, release_tag(version))
            .await;

        Ok(metadata)
    }

    async fn fetch_dependency_manifest(
        &self,
        name: &str,
        version: &str,
    ) -> Result<DependencyManifest> {
        let url = format!(
            "{}/{}/@v/{}.mod",
            GO_PROXY_URL,
            escape_for_proxy(name),
            escape_for_proxy(version)
        );
        let content = self.proxy.get_text(&url).await?;
        Ok(parse_go_mod(&content))
    }
}
