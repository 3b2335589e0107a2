use crate::resolution::domain::{DependencyManifest, Ecosystem, RepoMetadata};
use crate::shared::Result;
use async_trait::async_trait;

/// EcosystemResolver port - registry access for one package ecosystem
///
/// Each ecosystem (npm, NuGet, Go/GitHub) has its own implementation. Lookups are for exact
/// versions only; version ranges are never resolved.
///
/// # Errors
/// Implementations return an error for transport failures, non-2xx responses and undecodable
/// payloads (see [`FetchError`](crate::shared::error::FetchError)). A 404 from a per-version
/// endpoint is a `Status` error. When a registry answers with a listing that merely lacks the
/// version (NuGet registration pages), the result is the zero value instead.
#[async_trait]
pub trait EcosystemResolver: Send + Sync {
    /// Fetches descriptive metadata for `name` at exactly `version`
    async fn resolve_metadata(&self, name: &str, version: &str) -> Result<RepoMetadata>;

    /// Fetches the dependencies `name@version` declares
    async fn fetch_dependency_manifest(
        &self,
        name: &str,
        version: &str,
    ) -> Result<DependencyManifest>;
}

/// ResolverProvider port - picks the resolver for an ecosystem tag
///
/// Returns `None` for ecosystems without registry support.
pub trait ResolverProvider: Send + Sync {
    fn resolver_for(&self, ecosystem: &Ecosystem) -> Option<&dyn EcosystemResolver>;
}
