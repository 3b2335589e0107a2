/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define what the application core needs from the outside world:
/// the SBOM reader, registry resolvers, report formatting and output.
pub mod ecosystem_resolver;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;
pub mod sbom_reader;

pub use ecosystem_resolver::{EcosystemResolver, ResolverProvider};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
pub use sbom_reader::SbomReader;
