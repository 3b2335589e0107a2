use crate::resolution::domain::LibraryEntry;
use indexmap::IndexMap;

/// Counters of one enrichment run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichStats {
    /// Distinct packages after duplicate collapse
    pub total_packages: usize,
    /// Package count per ecosystem tag, in first-seen order
    pub ecosystems: IndexMap<String, usize>,
    pub resolved: usize,
    pub failed: usize,
    /// Packages of ecosystems without registry support
    pub unsupported: usize,
    pub manifests_fetched: usize,
    pub parent_links: usize,
    pub excluded_by_parent_limit: usize,
    pub excluded_by_pattern: usize,
}

/// EnrichResponse - output of the enrichment use case
#[derive(Debug, Clone)]
pub struct EnrichResponse {
    /// Report entities in SBOM order
    pub libraries: Vec<LibraryEntry>,
    pub stats: EnrichStats,
    /// True when the run stopped after validation
    pub dry_run: bool,
}

impl EnrichResponse {
    pub fn new(libraries: Vec<LibraryEntry>, stats: EnrichStats) -> Self {
        Self {
            libraries,
            stats,
            dry_run: false,
        }
    }

    pub fn dry_run(stats: EnrichStats) -> Self {
        Self {
            libraries: Vec::new(),
            stats,
            dry_run: true,
        }
    }
}
