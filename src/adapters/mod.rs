/// Adapters layer - Infrastructure implementations
///
/// Inbound adapters drive the application (HTTP API); outbound adapters
/// implement the ports the application depends on.
pub mod inbound;
pub mod outbound;
