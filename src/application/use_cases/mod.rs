/// Use cases module containing application business logic orchestration
mod enrich_sbom;

pub use enrich_sbom::EnrichSbomUseCase;
