/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_registry;
mod mock_sbom_reader;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_registry::{MockRegistry, MockResolverProvider};
pub use mock_sbom_reader::MockSbomReader;
