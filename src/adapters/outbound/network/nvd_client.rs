use crate::ports::outbound::NvdRepository;
use crate::sbom_catalog::domain::{CpeProduct, CvssScore, Vulnerability};
use crate::shared::error::SbomError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// NVD REST API client (CPE dictionary and CVE endpoints, API version 2.0)
///
/// # Behavior
/// - Sends the key in the `apiKey` header
/// - Implements timeout (30 seconds by default)
/// - Does not retry or cache; every failure surfaces as `SbomError::NvdRequestFailed`
pub struct NvdClient {
    client: reqwest::Client,
    base_url: String,
}

impl NvdClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://services.nvd.nist.gov/rest/json";
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    const CPES_PATH: &'static str = "/cpes/2.0";
    const CVES_PATH: &'static str = "/cves/2.0";
    const DEFAULT_DESCRIPTION: &'static str = "No description available";

    /// Creates a client against the public NVD service
    pub fn new() -> Result<Self> {
        Self::with_config(
            Self::DEFAULT_BASE_URL,
            Duration::from_secs(Self::DEFAULT_TIMEOUT_SECONDS),
        )
    }

    /// Creates a client against an alternative base URL (mirrors, tests)
    pub fn with_config(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("sbom-studio/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, parameter: &str, value: &str) -> String {
        format!(
            "{}{}?{}={}",
            self.base_url,
            path,
            parameter,
            urlencoding::encode(value)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, api_key: &str) -> Result<T> {
        tracing::debug!(url = %url, "querying NVD");

        let response = self
            .client
            .get(url)
            .header("apiKey", api_key)
            .send()
            .await
            .map_err(|e| SbomError::NvdRequestFailed {
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SbomError::NvdRequestFailed {
                details: format!("NVD API returned status code {}", status),
            }
            .into());
        }

        let body = response
            .json::<T>()
            .await
            .map_err(|e| SbomError::NvdRequestFailed {
                details: format!("unexpected response body: {}", e),
            })?;
        Ok(body)
    }

    async fn fetch_products(&self, url: &str, api_key: &str) -> Result<Vec<CpeProduct>> {
        let response: NvdCpeResponse = self.get_json(url, api_key).await?;
        Ok(response
            .products
            .into_iter()
            .map(|item| convert_to_product(item.cpe))
            .collect())
    }
}

#[async_trait]
impl NvdRepository for NvdClient {
    async fn search_products(&self, keyword: &str, api_key: &str) -> Result<Vec<CpeProduct>> {
        let url = self.endpoint(Self::CPES_PATH, "keywordSearch", keyword);
        self.fetch_products(&url, api_key).await
    }

    async fn match_products(&self, cpe_match: &str, api_key: &str) -> Result<Vec<CpeProduct>> {
        let url = self.endpoint(Self::CPES_PATH, "cpeMatchString", cpe_match);
        self.fetch_products(&url, api_key).await
    }

    async fn fetch_vulnerabilities(
        &self,
        cpe_name: &str,
        api_key: &str,
    ) -> Result<Vec<Vulnerability>> {
        let url = self.endpoint(Self::CVES_PATH, "cpeName", cpe_name);
        let response: NvdCveResponse = self.get_json(&url, api_key).await?;

        let mut vulnerabilities = Vec::with_capacity(response.vulnerabilities.len());
        for item in response.vulnerabilities {
            match convert_to_vulnerability(item.cve) {
                Ok(vuln) => vulnerabilities.push(vuln),
                Err(e) => tracing::warn!(error = %e, "skipping malformed CVE record"),
            }
        }
        Ok(vulnerabilities)
    }

    async fn verify_api_key(&self, api_key: &str) -> Result<()> {
        let url = self.endpoint(Self::CVES_PATH, "resultsPerPage", "1");
        let _: serde_json::Value = self.get_json(&url, api_key).await?;
        Ok(())
    }
}

fn convert_to_product(cpe: NvdCpe) -> CpeProduct {
    let title = cpe
        .titles
        .into_iter()
        .next()
        .map(|t| t.title)
        .filter(|t| !t.trim().is_empty());

    CpeProduct::new(
        cpe.cpe_name,
        title,
        cpe.created,
        cpe.refs.into_iter().map(|r| r.reference).collect(),
    )
}

/// Picks the first CVSS base score in order of preference: v3.1, v3.0, v2
fn preferred_base_score(metrics: &NvdMetrics) -> Option<f64> {
    [
        &metrics.cvss_metric_v31,
        &metrics.cvss_metric_v30,
        &metrics.cvss_metric_v2,
    ]
    .into_iter()
    .find_map(|set| set.first())
    .map(|metric| metric.cvss_data.base_score)
}

fn convert_to_vulnerability(cve: NvdCve) -> Result<Vulnerability> {
    let score = cve
        .metrics
        .as_ref()
        .and_then(preferred_base_score)
        .map(CvssScore::new)
        .transpose()?
        .unwrap_or_else(CvssScore::zero);

    let description = cve
        .descriptions
        .into_iter()
        .find(|d| d.lang == "en")
        .map(|d| d.value)
        .unwrap_or_else(|| NvdClient::DEFAULT_DESCRIPTION.to_string());

    Vulnerability::new(
        cve.id,
        description,
        score,
        cve.published,
        cve.last_modified,
        cve.references.into_iter().map(|r| r.url).collect(),
    )
}

// NVD API response structures

#[derive(Debug, Deserialize)]
struct NvdCpeResponse {
    #[serde(default)]
    products: Vec<NvdProduct>,
}

#[derive(Debug, Deserialize)]
struct NvdProduct {
    cpe: NvdCpe,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdCpe {
    cpe_name: String,
    #[serde(default)]
    created: Option<String>,
    #[serde(default)]
    titles: Vec<NvdTitle>,
    #[serde(default)]
    refs: Vec<NvdCpeRef>,
}

#[derive(Debug, Deserialize)]
struct NvdTitle {
    title: String,
}

#[derive(Debug, Deserialize)]
struct NvdCpeRef {
    #[serde(rename = "ref")]
    reference: String,
}

#[derive(Debug, Deserialize)]
struct NvdCveResponse {
    #[serde(default)]
    vulnerabilities: Vec<NvdCveItem>,
}

#[derive(Debug, Deserialize)]
struct NvdCveItem {
    cve: NvdCve,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdCve {
    id: String,
    #[serde(default)]
    published: Option<String>,
    #[serde(default)]
    last_modified: Option<String>,
    #[serde(default)]
    descriptions: Vec<NvdDescription>,
    #[serde(default)]
    metrics: Option<NvdMetrics>,
    #[serde(default)]
    references: Vec<NvdReference>,
}

#[derive(Debug, Deserialize)]
struct NvdDescription {
    lang: String,
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct NvdMetrics {
    #[serde(rename = "cvssMetricV31", default)]
    cvss_metric_v31: Vec<NvdCvssMetric>,
    #[serde(rename = "cvssMetricV30", default)]
    cvss_metric_v30: Vec<NvdCvssMetric>,
    #[serde(rename = "cvssMetricV2", default)]
    cvss_metric_v2: Vec<NvdCvssMetric>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdCvssMetric {
    cvss_data: NvdCvssData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdCvssData {
    base_score: f64,
}

#[derive(Debug, Deserialize)]
struct NvdReference {
    url: String,
}
