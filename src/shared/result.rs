/// Crate-wide Result alias.
///
/// Fatal errors (unreadable SBOM, invalid package records, output failures) travel as
/// `anyhow::Error` so `main` can print the whole cause chain. Per-package registry failures
/// also use it at the port boundary but are downcast to [`FetchError`](super::error::FetchError)
/// where the kind matters.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
