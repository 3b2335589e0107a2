use crate::application::dto::{EnrichRequest, EnrichResponse, EnrichStats};
use crate::application::fetch_pool::{FetchPool, FetchSummary};
use crate::ports::outbound::{ProgressReporter, ResolverProvider, SbomReader};
use crate::resolution::domain::ResolvedSet;
use crate::resolution::services::{
    Aggregation, AggregationPolicy, Aggregator, PackageFilter, ParentGraphBuilder,
};
use crate::shared::Result;
use indexmap::IndexMap;

/// EnrichSbomUseCase - turns a scanner SBOM into enriched library entries
///
/// Steps: read the SBOM, resolve registry metadata for every package, reconstruct parent links
/// from the declared dependencies, and aggregate the result into report entities.
///
/// # Type Parameters
/// * `SR` - SbomReader implementation
/// * `RP` - ResolverProvider implementation
/// * `PR` - ProgressReporter implementation
pub struct EnrichSbomUseCase<SR, RP, PR> {
    sbom_reader: SR,
    resolver_provider: RP,
    progress_reporter: PR,
}

impl<SR, RP, PR> EnrichSbomUseCase<SR, RP, PR>
where
    SR: SbomReader,
    RP: ResolverProvider,
    PR: ProgressReporter,
{
    pub fn new(sbom_reader: SR, resolver_provider: RP, progress_reporter: PR) -> Self {
        Self {
            sbom_reader,
            resolver_provider,
            progress_reporter,
        }
    }

    /// Executes the enrichment
    ///
    /// Registry failures never fail the run; they leave the affected package with empty
    /// metadata. Only an unreadable SBOM or invalid settings return an error.
    pub async fn execute(&self, request: EnrichRequest) -> Result<EnrichResponse> {
        // Step 1: Validate settings before any work
        let filter = PackageFilter::new(request.exclude_patterns.clone())?;

        // Step 2: Read the SBOM into the resolved set
        let mut set = self.read_sbom(&request)?;
        let mut stats = EnrichStats {
            total_packages: set.len(),
            ecosystems: Self::count_ecosystems(&set),
            ..Default::default()
        };

        if request.dry_run {
            return Ok(self.build_dry_run_response(stats));
        }

        let pool = FetchPool::new(request.workers, request.task_timeout);

        // Step 3: Registry metadata
        let summary = self.resolve_metadata(&pool, &mut set).await;
        stats.resolved = summary.resolved;
        stats.failed = summary.failed.len();
        stats.unsupported = summary.unsupported;

        // Step 4: Parent links
        if request.include_parents {
            let (manifests, links) = self.reconstruct_parents(&pool, &mut set, &request).await;
            stats.manifests_fetched = manifests;
            stats.parent_links = links;
        }

        // Step 5: Report entities
        let policy = AggregationPolicy {
            max_parents: request.max_parents,
            exclude: filter,
        };
        let aggregation = Aggregator::aggregate(&set, &policy);
        self.report_aggregation(&aggregation);

        stats.excluded_by_parent_limit = aggregation.excluded_by_parent_limit;
        stats.excluded_by_pattern = aggregation.excluded_by_pattern;

        Ok(EnrichResponse::new(aggregation.libraries, stats))
    }

    fn read_sbom(&self, request: &EnrichRequest) -> Result<ResolvedSet> {
        self.progress_reporter.report(&format!(
            "📖 Loading SBOM from: {}",
            request.sbom_path.display()
        ));

        let records = self.sbom_reader.read_packages(&request.sbom_path)?;
        let read = records.len();
        let set = ResolvedSet::from_records(records);

        if set.len() < read {
            self.progress_reporter.report(&format!(
                "✅ Detected {} package(s) ({} duplicate(s) merged)",
                set.len(),
                read - set.len()
            ));
        } else {
            self.progress_reporter
                .report(&format!("✅ Detected {} package(s)", set.len()));
        }

        Ok(set)
    }

    fn count_ecosystems(set: &ResolvedSet) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for entry in set.iter() {
            *counts
                .entry(entry.record().ecosystem().to_string())
                .or_insert(0) += 1;
        }
        counts
    }

    /// Builds a response for dry-run mode (validation only)
    fn build_dry_run_response(&self, stats: EnrichStats) -> EnrichResponse {
        for (ecosystem, count) in &stats.ecosystems {
            self.progress_reporter
                .report(&format!("   - {}: {} package(s)", ecosystem, count));
        }
        self.progress_reporter.report_completion(
            "Success: SBOM and configuration validated. No registry requests were made.",
        );
        EnrichResponse::dry_run(stats)
    }

    async fn resolve_metadata(&self, pool: &FetchPool, set: &mut ResolvedSet) -> FetchSummary {
        self.progress_reporter
            .report("🔍 Fetching package metadata...");

        let on_progress = |done: usize, total: usize| {
            self.progress_reporter
                .report_progress(done, total, Some("Fetching package metadata..."))
        };
        let summary = pool
            .resolve_all(set, &self.resolver_provider, &on_progress)
            .await;

        let mut message = format!(
            "✅ Metadata retrieval complete: {} succeeded out of {}, {} failed",
            summary.resolved,
            set.len(),
            summary.failed.len()
        );
        if summary.unsupported > 0 {
            message.push_str(&format!(
                ", {} without registry support",
                summary.unsupported
            ));
        }
        self.progress_reporter.report_completion(&message);

        summary
    }

    /// Returns (manifests fetched, parent links added)
    async fn reconstruct_parents(
        &self,
        pool: &FetchPool,
        set: &mut ResolvedSet,
        request: &EnrichRequest,
    ) -> (usize, usize) {
        self.progress_reporter
            .report("🔗 Reconstructing parent relationships...");

        let on_progress = |done: usize, total: usize| {
            self.progress_reporter
                .report_progress(done, total, Some("Fetching dependency manifests..."))
        };
        let manifests = pool
            .fetch_manifests(set, &self.resolver_provider, &on_progress)
            .await;

        let stats = ParentGraphBuilder::new(request.match_mode).build(set, &manifests);

        self.progress_reporter.report_completion(&format!(
            "✅ Parent relationships complete: {} link(s) from {} manifest(s)",
            stats.links, stats.scanned
        ));

        (stats.scanned, stats.links)
    }

    fn report_aggregation(&self, aggregation: &Aggregation) {
        if aggregation.excluded_by_pattern > 0 {
            self.progress_reporter.report(&format!(
                "🚫 Excluded {} package(s) based on filters",
                aggregation.excluded_by_pattern
            ));
        }
        if aggregation.excluded_by_parent_limit > 0 {
            self.progress_reporter.report(&format!(
                "🚫 Excluded {} package(s) used by too many parents",
                aggregation.excluded_by_parent_limit
            ));
        }
        for pattern in &aggregation.unmatched_patterns {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Exclude pattern '{}' did not match any package.",
                pattern
            ));
        }
    }
}

#[cfg(test)]
mod tests;
