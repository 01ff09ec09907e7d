/// In-process storage adapters
mod in_memory_sbom_repository;

pub use in_memory_sbom_repository::InMemorySbomRepository;
