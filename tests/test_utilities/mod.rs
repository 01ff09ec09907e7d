/// Shared helpers for integration and end-to-end tests
pub mod mocks;
