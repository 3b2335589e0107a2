use super::{GithubGoClient, HttpClient, NpmRegistryClient, NuGetRegistryClient};
use crate::ports::outbound::{EcosystemResolver, ResolverProvider};
use crate::resolution::domain::Ecosystem;
use crate::shared::Result;
use std::time::Duration;

/// RegistryResolver - the production [`ResolverProvider`]
///
/// Holds one client per supported ecosystem and dispatches on the ecosystem tag.
pub struct RegistryResolver {
    npm: NpmRegistryClient,
    nuget: NuGetRegistryClient,
    go: GithubGoClient,
}

impl RegistryResolver {
    /// Creates all registry clients with a shared request timeout
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (e.g. TLS backend failure)
    pub fn new(request_timeout: Duration, github_token: Option<String>) -> Result<Self> {
        let http = HttpClient::new(request_timeout)?;

        Ok(Self {
            npm: NpmRegistryClient::new(http.clone()),
            nuget: NuGetRegistryClient::new(http.clone()),
            go: GithubGoClient::new(http, github_token),
        })
    }
}

impl ResolverProvider for RegistryResolver {
    fn resolver_for(&self, ecosystem: &Ecosystem) -> Option<&dyn EcosystemResolver> {
        match ecosystem {
            Ecosystem::Npm => Some(&self.npm),
            Ecosystem::NuGet => Some(&self.nuget),
            Ecosystem::Go => Some(&self.go),
            Ecosystem::Other(_) => None,
        }
    }
}
