use super::*;
use crate::application::dto::EnrichRequest;
use crate::ports::outbound::EcosystemResolver;
use crate::resolution::domain::{DependencyManifest, Ecosystem, PackageRecord, RepoMetadata};
use crate::resolution::services::MatchMode;
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// Mock implementations for testing
struct MockSbomReader {
    records: Vec<PackageRecord>,
}

impl SbomReader for MockSbomReader {
    fn read_packages(&self, _path: &Path) -> Result<Vec<PackageRecord>> {
        Ok(self.records.clone())
    }
}

struct FailingSbomReader;

impl SbomReader for FailingSbomReader {
    fn read_packages(&self, path: &Path) -> Result<Vec<PackageRecord>> {
        anyhow::bail!("cannot read {}", path.display())
    }
}

/// In-memory registry: metadata and manifests per name, optional per-name delay
#[derive(Default)]
struct MockRegistry {
    metadata: HashMap<String, RepoMetadata>,
    manifests: HashMap<String, Vec<&'static str>>,
    delays_ms: HashMap<String, u64>,
    calls: AtomicUsize,
}

impl MockRegistry {
    fn with_package(mut self, name: &str, license: &str, deps: &[&'static str]) -> Self {
        self.metadata.insert(
            name.to_string(),
            RepoMetadata {
                full_name: format!("{} authors", name),
                description: format!("{} description", name),
                license: license.to_string(),
                ..Default::default()
            },
        );
        self.manifests.insert(name.to_string(), deps.to_vec());
        self
    }

    fn with_delay(mut self, name: &str, delay_ms: u64) -> Self {
        self.delays_ms.insert(name.to_string(), delay_ms);
        self
    }

    async fn delay(&self, name: &str) {
        if let Some(ms) = self.delays_ms.get(name) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
    }
}

#[async_trait]
impl EcosystemResolver for MockRegistry {
    async fn resolve_metadata(&self, name: &str, _version: &str) -> Result<RepoMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.delay(name).await;
        self.metadata
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("{} returned status 404", name))
    }

    async fn fetch_dependency_manifest(
        &self,
        name: &str,
        _version: &str,
    ) -> Result<DependencyManifest> {
        self.delay(name).await;
        let deps = self
            .manifests
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("{} returned status 404", name))?;
        Ok(deps.iter().map(|d| (*d, "*")).collect())
    }
}

struct MockProvider {
    registry: MockRegistry,
}

impl ResolverProvider for MockProvider {
    fn resolver_for(&self, ecosystem: &Ecosystem) -> Option<&dyn EcosystemResolver> {
        match ecosystem {
            Ecosystem::Npm | Ecosystem::NuGet | Ecosystem::Go => Some(&self.registry),
            Ecosystem::Other(_) => None,
        }
    }
}

#[derive(Default)]
struct MockProgressReporter {
    messages: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}

    fn report_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

fn npm(name: &str) -> PackageRecord {
    PackageRecord::new(name.to_string(), "1.0.0".to_string(), Ecosystem::Npm).unwrap()
}

fn use_case(
    records: Vec<PackageRecord>,
    registry: MockRegistry,
) -> EnrichSbomUseCase<MockSbomReader, MockProvider, MockProgressReporter> {
    EnrichSbomUseCase::new(
        MockSbomReader { records },
        MockProvider { registry },
        MockProgressReporter::default(),
    )
}

fn request() -> EnrichRequest {
    let mut request = EnrichRequest::new(PathBuf::from("sbom.json"));
    request.task_timeout = Duration::from_secs(5);
    request
}

fn names(response: &EnrichResponse) -> Vec<&str> {
    response.libraries.iter().map(|l| l.record.name()).collect()
}

fn angular_registry() -> MockRegistry {
    MockRegistry::default()
        .with_package("@angular/core", "MIT", &["rxjs", "tslib", "zone.js"])
        .with_package("rxjs", "Apache-2.0", &["tslib"])
        .with_package("tslib", "0BSD", &[])
        .with_package("zone.js", "MIT", &["tslib"])
}

fn angular_records() -> Vec<PackageRecord> {
    vec![npm("@angular/core"), npm("rxjs"), npm("tslib"), npm("zone.js")]
}

#[tokio::test]
async fn test_execute_enriches_and_links_parents() {
    let use_case = use_case(angular_records(), angular_registry());

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(names(&response), vec!["@angular/core", "rxjs", "tslib", "zone.js"]);
    assert_eq!(response.libraries[1].metadata.license, "Apache-2.0");
    assert_eq!(response.libraries[1].parents, vec!["@angular/core".to_string()]);
    assert_eq!(
        response.libraries[2].parents,
        vec![
            "@angular/core".to_string(),
            "rxjs".to_string(),
            "zone.js".to_string()
        ]
    );
    assert_eq!(response.stats.resolved, 4);
    assert_eq!(response.stats.failed, 0);
    assert_eq!(response.stats.manifests_fetched, 4);
    assert_eq!(response.stats.parent_links, 5);
    assert!(!response.dry_run);
}

#[tokio::test]
async fn test_output_order_independent_of_completion_order() {
    // the first package is by far the slowest
    let registry = angular_registry()
        .with_delay("@angular/core", 80)
        .with_delay("rxjs", 40);
    let use_case = use_case(angular_records(), registry);

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(names(&response), vec!["@angular/core", "rxjs", "tslib", "zone.js"]);
    assert_eq!(response.libraries[0].metadata.license, "MIT");
}

#[tokio::test]
async fn test_execute_is_idempotent() {
    let use_case = use_case(angular_records(), angular_registry());

    let first = use_case.execute(request()).await.unwrap();
    let second = use_case.execute(request()).await.unwrap();

    assert_eq!(first.libraries, second.libraries);
    assert_eq!(first.stats, second.stats);
}

#[tokio::test]
async fn test_timeout_leaves_zero_metadata_for_that_package_only() {
    let registry = angular_registry().with_delay("rxjs", 2_000);
    let use_case = use_case(angular_records(), registry);
    let mut request = request();
    request.task_timeout = Duration::from_millis(100);

    let response = use_case.execute(request).await.unwrap();

    assert_eq!(response.stats.failed, 1);
    assert!(response.libraries[1].metadata.is_empty());
    assert_eq!(response.libraries[0].metadata.license, "MIT");
    assert_eq!(response.libraries[2].metadata.license, "0BSD");
    // rxjs' manifest timed out too, so tslib is only linked by the other two
    assert_eq!(
        response.libraries[2].parents,
        vec!["@angular/core".to_string(), "zone.js".to_string()]
    );
}

#[tokio::test]
async fn test_registry_failure_is_not_fatal() {
    let registry = MockRegistry::default().with_package("rxjs", "Apache-2.0", &[]);
    let use_case = use_case(vec![npm("rxjs"), npm("left-pad")], registry);

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(response.libraries.len(), 2);
    assert_eq!(response.stats.resolved, 1);
    assert_eq!(response.stats.failed, 1);
    assert!(response.libraries[1].metadata.is_empty());
}

#[tokio::test]
async fn test_unsupported_ecosystem_is_kept_with_empty_metadata() {
    let conan = PackageRecord::new(
        "zlib".to_string(),
        "1.2.13".to_string(),
        Ecosystem::Other("conan".to_string()),
    )
    .unwrap();
    let use_case = use_case(vec![npm("tslib"), conan], angular_registry());

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(names(&response), vec!["tslib", "zlib"]);
    assert_eq!(response.stats.unsupported, 1);
    assert!(response.libraries[1].metadata.is_empty());
}

#[tokio::test]
async fn test_parent_limit_excludes_entities() {
    let use_case = use_case(angular_records(), angular_registry());
    let mut request = request();
    request.max_parents = Some(2);

    let response = use_case.execute(request).await.unwrap();

    assert_eq!(names(&response), vec!["@angular/core", "rxjs", "zone.js"]);
    assert_eq!(response.stats.excluded_by_parent_limit, 1);
}

#[tokio::test]
async fn test_without_parents() {
    let use_case = use_case(angular_records(), angular_registry());
    let mut request = request();
    request.include_parents = false;

    let response = use_case.execute(request).await.unwrap();

    assert_eq!(response.libraries.len(), 4);
    assert!(response.libraries.iter().all(|l| l.parents.is_empty()));
    assert_eq!(response.stats.manifests_fetched, 0);
}

#[tokio::test]
async fn test_exclude_patterns_and_unmatched_warning() {
    let use_case = use_case(angular_records(), angular_registry());
    let mut request = request();
    request.exclude_patterns = vec!["@angular/*".to_string(), "lodash".to_string()];

    let response = use_case.execute(request).await.unwrap();

    assert_eq!(names(&response), vec!["rxjs", "tslib", "zone.js"]);
    // exclusion does not remove parent links contributed by the excluded package
    assert!(response.libraries[0]
        .parents
        .contains(&"@angular/core".to_string()));
    let errors = use_case.progress_reporter.errors.borrow();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("lodash"));
}

#[tokio::test]
async fn test_invalid_exclude_pattern_fails_before_reading() {
    let use_case = EnrichSbomUseCase::new(
        FailingSbomReader,
        MockProvider {
            registry: MockRegistry::default(),
        },
        MockProgressReporter::default(),
    );
    let mut request = request();
    request.exclude_patterns = vec!["*".to_string()];

    let err = use_case.execute(request).await.unwrap_err();
    assert!(err.to_string().contains("only wildcards"));
}

#[tokio::test]
async fn test_unreadable_sbom_is_fatal() {
    let use_case = EnrichSbomUseCase::new(
        FailingSbomReader,
        MockProvider {
            registry: MockRegistry::default(),
        },
        MockProgressReporter::default(),
    );

    let err = use_case.execute(request()).await.unwrap_err();
    assert!(err.to_string().contains("cannot read sbom.json"));
}

#[tokio::test]
async fn test_dry_run_makes_no_registry_calls() {
    let go = PackageRecord::new(
        "github.com/spf13/cobra".to_string(),
        "v1.8.0".to_string(),
        Ecosystem::Go,
    )
    .unwrap();
    let mut records = angular_records();
    records.push(go);
    let use_case = use_case(records, angular_registry());
    let mut request = request();
    request.dry_run = true;

    let response = use_case.execute(request).await.unwrap();

    assert!(response.dry_run);
    assert!(response.libraries.is_empty());
    assert_eq!(response.stats.total_packages, 5);
    assert_eq!(response.stats.ecosystems.get("npm"), Some(&4));
    assert_eq!(response.stats.ecosystems.get("golang"), Some(&1));
    assert_eq!(use_case.resolver_provider.registry.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_duplicates_collapse_and_are_reported() {
    let use_case = use_case(vec![npm("rxjs"), npm("rxjs"), npm("tslib")], angular_registry());

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(names(&response), vec!["rxjs", "tslib"]);
    let messages = use_case.progress_reporter.messages.borrow();
    assert!(messages.iter().any(|m| m.contains("1 duplicate(s) merged")));
}

#[tokio::test]
async fn test_exact_match_mode() {
    let registry = MockRegistry::default()
        .with_package("app", "MIT", &["rxjs-compat"])
        .with_package("rxjs", "Apache-2.0", &[]);
    let use_case = use_case(vec![npm("app"), npm("rxjs")], registry);

    let substring = use_case.execute(request()).await.unwrap();
    assert_eq!(substring.libraries[1].parents, vec!["app".to_string()]);

    let mut request = request();
    request.match_mode = MatchMode::Exact;
    let exact = use_case.execute(request).await.unwrap();
    assert!(exact.libraries[1].parents.is_empty());
}
