use async_trait::async_trait;
use sbom_studio::prelude::*;
use sbom_studio::sbom_catalog::domain::CpeProduct;
use std::sync::Mutex;

/// Mock NvdRepository serving canned products and CVEs
///
/// Every call records the API key it was given. `accepted_key` restricts which key
/// passes `verify_api_key`; any key passes when it is `None`.
pub struct MockNvdRepository {
    pub products: Vec<CpeProduct>,
    pub vulnerabilities: Vec<Vulnerability>,
    pub accepted_key: Option<String>,
    pub should_fail: bool,
    pub calls: Mutex<Vec<String>>,
}

impl MockNvdRepository {
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            vulnerabilities: Vec::new(),
            accepted_key: None,
            should_fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_product(mut self, cpe_name: &str, title: &str) -> Self {
        self.products.push(CpeProduct::new(
            cpe_name.to_string(),
            Some(title.to_string()),
            Some("2023-04-11T15:49:55.243".to_string()),
            vec![],
        ));
        self
    }

    pub fn with_vulnerability(mut self, vulnerability: Vulnerability) -> Self {
        self.vulnerabilities.push(vulnerability);
        self
    }

    pub fn accepting(mut self, key: &str) -> Self {
        self.accepted_key = Some(key.to_string());
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    /// API keys seen so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, api_key: &str) -> Result<()> {
        self.calls.lock().unwrap().push(api_key.to_string());
        if self.should_fail {
            return Err(SbomError::NvdRequestFailed {
                details: "NVD API returned status code 503 Service Unavailable".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for MockNvdRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NvdRepository for MockNvdRepository {
    async fn search_products(&self, _keyword: &str, api_key: &str) -> Result<Vec<CpeProduct>> {
        self.record(api_key)?;
        Ok(self.products.clone())
    }

    async fn match_products(&self, _cpe_match: &str, api_key: &str) -> Result<Vec<CpeProduct>> {
        self.record(api_key)?;
        Ok(self.products.clone())
    }

    async fn fetch_vulnerabilities(
        &self,
        _cpe_name: &str,
        api_key: &str,
    ) -> Result<Vec<Vulnerability>> {
        self.record(api_key)?;
        Ok(self.vulnerabilities.clone())
    }

    async fn verify_api_key(&self, api_key: &str) -> Result<()> {
        self.record(api_key)?;
        match &self.accepted_key {
            Some(accepted) if accepted != api_key => Err(SbomError::NvdRequestFailed {
                details: "NVD API returned status code 404 Not Found".to_string(),
            }
            .into()),
            _ => Ok(()),
        }
    }
}
