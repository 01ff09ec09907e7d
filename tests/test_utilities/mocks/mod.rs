/// Mock implementations for testing
mod mock_api_key_store;
mod mock_nvd_repository;

pub use mock_api_key_store::MockApiKeyStore;
pub use mock_nvd_repository::MockNvdRepository;
