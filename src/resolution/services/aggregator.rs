use super::PackageFilter;
use crate::resolution::domain::{LibraryEntry, ResolvedSet};

/// Parent count above which an entity is left out of the report
pub const DEFAULT_MAX_PARENTS: usize = 3;

/// Filtering applied when the resolved set is turned into report entities
#[derive(Debug, Clone)]
pub struct AggregationPolicy {
    /// Entities with more parents than this are excluded; `None` keeps all
    pub max_parents: Option<usize>,
    pub exclude: PackageFilter,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        Self {
            max_parents: Some(DEFAULT_MAX_PARENTS),
            exclude: PackageFilter::default(),
        }
    }
}

/// Result of one aggregation
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Kept entities, in SBOM order
    pub libraries: Vec<LibraryEntry>,
    pub excluded_by_parent_limit: usize,
    pub excluded_by_pattern: usize,
    /// Exclude patterns that matched no package
    pub unmatched_patterns: Vec<String>,
}

/// Aggregator - zips record, metadata and parents into report entities
///
/// A pure, order-preserving predicate over the resolved set; nothing upstream is modified.
/// Exclude patterns see the full path, so Go sub-path packages can be excluded on their own.
pub struct Aggregator;

impl Aggregator {
    pub fn aggregate(set: &ResolvedSet, policy: &AggregationPolicy) -> Aggregation {
        let full_paths: Vec<String> = set.iter().map(|e| e.record().full_path()).collect();
        let mut aggregation = Aggregation {
            unmatched_patterns: policy
                .exclude
                .unmatched_patterns(full_paths.iter().map(String::as_str)),
            ..Default::default()
        };

        for (entry, full_path) in set.iter().zip(&full_paths) {
            if policy.exclude.matches(full_path) {
                aggregation.excluded_by_pattern += 1;
                continue;
            }

            if let Some(limit) = policy.max_parents {
                if entry.parents().len() > limit {
                    tracing::debug!(
                        package = %entry.record(),
                        parents = entry.parents().len(),
                        "excluded: parent count above limit {}",
                        limit
                    );
                    aggregation.excluded_by_parent_limit += 1;
                    continue;
                }
            }

            aggregation.libraries.push(LibraryEntry::from(entry));
        }

        aggregation
    }
}
