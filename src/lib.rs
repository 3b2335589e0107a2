//! ots-sbom - registry enrichment for Syft SBOMs
//!
//! Reads the packages of a Syft JSON SBOM, looks each one up in its package registry (npm,
//! NuGet, Go modules via GitHub), reconstructs which packages pull in which from their declared
//! dependencies, and renders an off-the-shelf software (OTS) library report.
//!
//! # Architecture
//!
//! - **Resolution** (`resolution`): package identity, metadata and the parent graph, no I/O
//! - **Application Layer** (`application`): the enrichment use case, fetch pool and report model
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): registry clients, Syft reader, formatters, console output
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use ots_sbom::prelude::*;
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<()> {
//! let use_case = EnrichSbomUseCase::new(
//!     SyftJsonReader::new(),
//!     RegistryResolver::new(Duration::from_secs(10), None)?,
//!     StderrProgressReporter::new(),
//! );
//!
//! let response = use_case
//!     .execute(EnrichRequest::new(PathBuf::from("sbom.json")))
//!     .await?;
//!
//! let document = LibraryDocumentBuilder::build(&response.libraries);
//! println!("{}", YamlFormatter::new().format(&document)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod resolution;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, StdoutPresenter, SyftJsonReader,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, YamlFormatter};
    pub use crate::adapters::outbound::network::RegistryResolver;
    pub use crate::application::dto::{EnrichRequest, EnrichResponse, EnrichStats, OutputFormat};
    pub use crate::application::read_models::{LibraryDocument, LibraryDocumentBuilder};
    pub use crate::application::use_cases::EnrichSbomUseCase;
    pub use crate::ports::outbound::{
        EcosystemResolver, OutputPresenter, ProgressReporter, ReportFormatter, ResolverProvider,
        SbomReader,
    };
    pub use crate::resolution::domain::{
        DependencyManifest, Ecosystem, LibraryEntry, PackageRecord, RepoMetadata, ResolvedSet,
    };
    pub use crate::resolution::services::{
        AggregationPolicy, Aggregator, MatchMode, PackageFilter, ParentGraphBuilder,
    };
    pub use crate::shared::Result;
}
