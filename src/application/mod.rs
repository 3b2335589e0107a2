/// Application layer - Use cases and DTOs
///
/// Orchestrates the resolution services and talks to infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod fetch_pool;
pub mod read_models;
pub mod use_cases;
