use crate::sbom_catalog::domain::{CpeProduct, Vulnerability};
use crate::shared::Result;
use async_trait::async_trait;

/// NvdRepository port for the National Vulnerability Database REST API
///
/// Every call takes the API key explicitly; the caller owns the decision of which key
/// is current. Implementations map transport and status failures to
/// `SbomError::NvdRequestFailed`.
#[async_trait]
pub trait NvdRepository: Send + Sync {
    /// Searches the CPE dictionary by free-text keyword
    async fn search_products(&self, keyword: &str, api_key: &str) -> Result<Vec<CpeProduct>>;

    /// Lists dictionary entries matching a (possibly partial) CPE match string
    async fn match_products(&self, cpe_match: &str, api_key: &str) -> Result<Vec<CpeProduct>>;

    /// Fetches the CVEs recorded against a CPE name
    async fn fetch_vulnerabilities(
        &self,
        cpe_name: &str,
        api_key: &str,
    ) -> Result<Vec<Vulnerability>>;

    /// Issues a minimal request to check that NVD accepts the key
    async fn verify_api_key(&self, api_key: &str) -> Result<()>;
}
