/// Network adapters for the package registries
mod github_client;
mod http_client;
mod npm_client;
mod nuget_client;
mod registry_resolver;

pub use github_client::GithubGoClient;
pub use http_client::{HttpClient, DEFAULT_REQUEST_TIMEOUT};
pub use npm_client::NpmRegistryClient;
pub use nuget_client::NuGetRegistryClient;
pub use registry_resolver::RegistryResolver;
