use crate::application::fetch_pool::{DEFAULT_TASK_TIMEOUT, DEFAULT_WORKERS};
use crate::resolution::services::{MatchMode, DEFAULT_MAX_PARENTS};
use std::path::PathBuf;
use std::time::Duration;

/// EnrichRequest - input of the enrichment use case
///
/// Built by the CLI after merging command-line flags with the config file.
#[derive(Debug, Clone)]
pub struct EnrichRequest {
    /// Syft JSON document to read
    pub sbom_path: PathBuf,
    /// Concurrent registry lookups
    pub workers: usize,
    /// Time limit for one package lookup
    pub task_timeout: Duration,
    /// Packages with more parents are left out of the report; `None` keeps all
    pub max_parents: Option<usize>,
    pub exclude_patterns: Vec<String>,
    pub match_mode: MatchMode,
    /// Reconstruct parent links from dependency manifests
    pub include_parents: bool,
    /// Read and validate only, no network access
    pub dry_run: bool,
}

impl EnrichRequest {
    /// Request with default settings for `sbom_path`
    pub fn new(sbom_path: PathBuf) -> Self {
        Self {
            sbom_path,
            workers: DEFAULT_WORKERS,
            task_timeout: DEFAULT_TASK_TIMEOUT,
            max_parents: Some(DEFAULT_MAX_PARENTS),
            exclude_patterns: Vec::new(),
            match_mode: MatchMode::default(),
            include_parents: true,
            dry_run: false,
        }
    }
}
