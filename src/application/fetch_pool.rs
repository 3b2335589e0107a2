use crate::ports::outbound::ResolverProvider;
use crate::resolution::domain::{DependencyManifest, ResolvedEntry, ResolvedSet};
use crate::shared::error::FetchError;
use futures::stream::{self, StreamExt};
use std::time::Duration;

/// Default number of concurrent registry lookups
pub const DEFAULT_WORKERS: usize = 10;

/// Default time limit for one package lookup
pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(30);

/// Completed/total callback, invoked as lookups finish
pub type ProgressFn<'a> = &'a dyn Fn(usize, usize);

/// Outcome of resolving the metadata of a whole set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub resolved: usize,
    /// Identity key and reason of every failed lookup
    pub failed: Vec<(String, String)>,
    pub unsupported: usize,
}

enum Outcome {
    Resolved,
    Failed(String, String),
    Unsupported,
}

/// FetchPool - bounded-concurrency registry lookups over a [`ResolvedSet`]
///
/// Every lookup owns exactly one slot of the set; results are written in place, so the
/// completion order of the lookups never affects the set order. A lookup that fails or exceeds
/// the task timeout leaves its slot at the zero value and the run continues.
#[derive(Debug, Clone, Copy)]
pub struct FetchPool {
    workers: usize,
    task_timeout: Duration,
}

impl Default for FetchPool {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS, DEFAULT_TASK_TIMEOUT)
    }
}

impl FetchPool {
    pub fn new(workers: usize, task_timeout: Duration) -> Self {
        Self {
            workers: workers.max(1),
            task_timeout,
        }
    }

    /// Resolves metadata for every entry of `set`; returns once all lookups have finished
    pub async fn resolve_all<P>(
        &self,
        set: &mut ResolvedSet,
        provider: &P,
        on_progress: ProgressFn<'_>,
    ) -> FetchSummary
    where
        P: ResolverProvider + ?Sized,
    {
        let total = set.len();
        let mut summary = FetchSummary::default();
        let mut completed = 0;

        let mut lookups = stream::iter(set.iter_mut())
            .map(|entry| self.resolve_entry(entry, provider))
            .buffer_unordered(self.workers);

        while let Some(outcome) = lookups.next().await {
            match outcome {
                Outcome::Resolved => summary.resolved += 1,
                Outcome::Failed(key, reason) => summary.failed.push((key, reason)),
                Outcome::Unsupported => summary.unsupported += 1,
            }
            completed += 1;
            on_progress(completed, total);
        }

        summary
    }

    async fn resolve_entry<P>(&self, entry: &mut ResolvedEntry, provider: &P) -> Outcome
    where
        P: ResolverProvider + ?Sized,
    {
        let record = entry.record();
        let key = record.identity_key();

        let Some(resolver) = provider.resolver_for(record.ecosystem()) else {
            tracing::info!(
                package = %key,
                ecosystem = %record.ecosystem(),
                "no registry for ecosystem, metadata left empty"
            );
            return Outcome::Unsupported;
        };

        let lookup = tokio::time::timeout(
            self.task_timeout,
            resolver.resolve_metadata(record.name(), record.version()),
        )
        .await;

        let error = match lookup {
            Ok(Ok(metadata)) => {
                entry.set_metadata(metadata);
                return Outcome::Resolved;
            }
            Ok(Err(e)) => e,
            Err(_) => FetchError::Timeout(self.task_timeout).into(),
        };

        entry.set_metadata(Default::default());
        tracing::warn!(package = %key, "metadata lookup failed: {:#}", error);
        Outcome::Failed(key, format!("{:#}", error))
    }

    /// Fetches the dependency manifest of every entry, in set order
    ///
    /// `None` marks a package whose manifest could not be fetched or whose ecosystem has no
    /// registry.
    pub async fn fetch_manifests<P>(
        &self,
        set: &ResolvedSet,
        provider: &P,
        on_progress: ProgressFn<'_>,
    ) -> Vec<Option<DependencyManifest>>
    where
        P: ResolverProvider + ?Sized,
    {
        let total = set.len();
        let mut manifests = Vec::with_capacity(total);

        let mut lookups = stream::iter(set.iter())
            .map(|entry| self.fetch_manifest(entry, provider))
            .buffered(self.workers);

        while let Some(manifest) = lookups.next().await {
            manifests.push(manifest);
            on_progress(manifests.len(), total);
        }

        manifests
    }

    async fn fetch_manifest<P>(&self, entry: &ResolvedEntry, provider: &P) -> Option<DependencyManifest>
    where
        P: ResolverProvider + ?Sized,
    {
        let record = entry.record();
        let resolver = provider.resolver_for(record.ecosystem())?;
        let path = record.full_path();

        let lookup = tokio::time::timeout(
            self.task_timeout,
            resolver.fetch_dependency_manifest(&path, record.version()),
        )
        .await;

        match lookup {
            Ok(Ok(manifest)) => Some(manifest),
            Ok(Err(e)) => {
                tracing::warn!(package = %record, "dependency manifest lookup failed: {:#}", e);
                None
            }
            Err(_) => {
                tracing::warn!(
                    package = %record,
                    "dependency manifest lookup failed: {}",
                    FetchError::Timeout(self.task_timeout)
                );
                None
            }
        }
    }
}
