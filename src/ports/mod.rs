/// Ports module defining the interfaces the application core depends on
///
/// Only driven (outbound) ports exist; the HTTP adapter calls the use cases directly.
pub mod outbound;
