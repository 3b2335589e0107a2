use async_trait::async_trait;
use ots_sbom::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock registry for one ecosystem, keyed by `name@version`
#[derive(Default)]
pub struct MockRegistry {
    metadata: HashMap<String, RepoMetadata>,
    manifests: HashMap<String, DependencyManifest>,
    calls: Arc<AtomicUsize>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, name: &str, version: &str, metadata: RepoMetadata) -> Self {
        self.metadata.insert(format!("{}@{}", name, version), metadata);
        self
    }

    pub fn with_dependencies(mut self, name: &str, version: &str, deps: &[&str]) -> Self {
        let manifest = deps.iter().map(|d| (*d, "*")).collect();
        self.manifests.insert(format!("{}@{}", name, version), manifest);
        self
    }

    /// Shared counter of all lookups, usable after the registry was moved
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl EcosystemResolver for MockRegistry {
    async fn resolve_metadata(&self, name: &str, version: &str) -> Result<RepoMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.metadata
            .get(&format!("{}@{}", name, version))
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("{}@{} returned status 404", name, version))
    }

    async fn fetch_dependency_manifest(
        &self,
        name: &str,
        version: &str,
    ) -> Result<DependencyManifest> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .manifests
            .get(&format!("{}@{}", name, version))
            .cloned()
            .unwrap_or_default())
    }
}

/// Mock ResolverProvider with one optional registry per supported ecosystem
#[derive(Default)]
pub struct MockResolverProvider {
    pub npm: Option<MockRegistry>,
    pub nuget: Option<MockRegistry>,
    pub go: Option<MockRegistry>,
}

impl ResolverProvider for MockResolverProvider {
    fn resolver_for(&self, ecosystem: &Ecosystem) -> Option<&dyn EcosystemResolver> {
        let registry = match ecosystem {
            Ecosystem::Npm => self.npm.as_ref(),
            Ecosystem::NuGet => self.nuget.as_ref(),
            Ecosystem::Go => self.go.as_ref(),
            Ecosystem::Other(_) => None,
        };
        registry.map(|r| r as &dyn EcosystemResolver)
    }
}
