/// Resolution domain: package identity, registry metadata and the parent graph
///
/// Everything in here is free of I/O. Registry access lives behind the
/// `EcosystemResolver` port and is driven by the application layer.
pub mod domain;
pub mod services;
