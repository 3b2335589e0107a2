use crate::resolution::domain::{DependencyManifest, Ecosystem, ResolvedSet};
use std::str::FromStr;

/// How a declared dependency name is compared with the names in the resolved set
///
/// Go packages are always compared exactly: `require` lines name whole module paths, and
/// sibling modules share long prefixes (`.../aws-sdk-go-v2` and `.../aws-sdk-go-v2/service/s3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The declared name contains the package name (case-insensitive).
    ///
    /// Heuristic: when one package name is a substring of another (`rxjs` inside
    /// `rxjs-compat`) a package can pick up a parent it does not really have.
    #[default]
    Substring,
    /// The declared name equals the package name (case-insensitive)
    Exact,
}

impl MatchMode {
    fn matches(self, declared: &str, candidate: &str, ecosystem: &Ecosystem) -> bool {
        match (self, ecosystem) {
            (_, Ecosystem::Go) | (MatchMode::Exact, _) => declared == candidate,
            (MatchMode::Substring, _) => declared.contains(candidate),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "exact" => Ok(MatchMode::Exact),
            _ => Err(format!(
                "Invalid match mode: {}. Please specify 'substring' or 'exact'",
                s
            )),
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Substring => write!(f, "substring"),
            MatchMode::Exact => write!(f, "exact"),
        }
    }
}

/// Counters from one parent-graph pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParentGraphStats {
    /// Packages whose manifest was scanned
    pub scanned: usize,
    /// Packages without a manifest (fetch failed or unsupported)
    pub skipped: usize,
    /// Parent links added
    pub links: usize,
}

/// ParentGraphBuilder - infers parents by cross-referencing declared dependencies
///
/// For every package P with a manifest, each other package Q whose name matches one of P's
/// declared dependency names gets P added to its parents. Names are full paths, so a Go
/// package is identified by its module path including the sub-path. Cost is
/// O(packages x packages x dependencies), fine for SBOMs of a few hundred packages; progress is
/// logged per package so large inputs stay visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParentGraphBuilder {
    match_mode: MatchMode,
}

impl ParentGraphBuilder {
    pub fn new(match_mode: MatchMode) -> Self {
        Self { match_mode }
    }

    /// Adds parent links to `set`.
    ///
    /// `manifests[i]` belongs to the i-th entry of `set`; `None` means no manifest was
    /// available and that package contributes no links.
    pub fn build(
        &self,
        set: &mut ResolvedSet,
        manifests: &[Option<DependencyManifest>],
    ) -> ParentGraphStats {
        let display_names: Vec<String> = set.iter().map(|e| e.record().full_path()).collect();
        let ecosystems: Vec<Ecosystem> = set
            .iter()
            .map(|e| e.record().ecosystem().clone())
            .collect();
        let folded_names: Vec<String> = display_names
            .iter()
            .map(|n| n.to_ascii_lowercase())
            .collect();
        let total = display_names.len();

        let mut stats = ParentGraphStats::default();

        for (parent_idx, manifest) in manifests.iter().enumerate().take(total) {
            let parent_name = &display_names[parent_idx];

            let Some(manifest) = manifest else {
                tracing::debug!(package = %parent_name, "no dependency manifest, skipping");
                stats.skipped += 1;
                continue;
            };

            tracing::info!(
                package = %parent_name,
                dependencies = manifest.len(),
                "scanning dependencies ({}/{})",
                parent_idx + 1,
                total
            );
            stats.scanned += 1;

            for declared in manifest.names() {
                let declared = declared.to_ascii_lowercase();

                for (child_idx, child_name) in folded_names.iter().enumerate() {
                    // A package is never its own child, even when the names overlap
                    if child_idx == parent_idx || *child_name == folded_names[parent_idx] {
                        continue;
                    }
                    if !self
                        .match_mode
                        .matches(&declared, child_name, &ecosystems[child_idx])
                    {
                        continue;
                    }

                    if let Some(child) = set.get_index_mut(child_idx) {
                        if child.add_parent(parent_name) {
                            tracing::debug!(
                                parent = %parent_name,
                                child = %display_names[child_idx],
                                "parent link added"
                            );
                            stats.links += 1;
                        }
                    }
                }
            }
        }

        stats
    }
}
