/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: registry clients, the Syft reader,
/// report formatters and console output.
pub mod outbound;
