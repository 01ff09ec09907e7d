use crate::application::dto::VersionInfo;
use crate::application::settings::NvdApiKey;
use crate::ports::outbound::NvdRepository;
use crate::sbom_catalog::domain::{ComponentSuggestion, CpeName, CpeProduct, Vulnerability};
use crate::sbom_catalog::policies::{FallbackReason, ManualEntryPolicy};
use crate::shared::error::SbomError;
use crate::shared::Result;
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;

/// Version reported when neither NVD nor the requested CPE names one
const LATEST_VERSION: &str = "latest";

/// LookupNvdUseCase - Component search, version listing and CVE lookup against NVD
///
/// Search never fails once a keyword is given: any NVD problem degrades to manual-entry
/// suggestions. Version and vulnerability lookups surface a missing key or an upstream
/// failure to the caller.
pub struct LookupNvdUseCase {
    nvd_repository: Arc<dyn NvdRepository>,
    api_key: NvdApiKey,
}

impl LookupNvdUseCase {
    pub fn new(nvd_repository: Arc<dyn NvdRepository>, api_key: NvdApiKey) -> Self {
        Self {
            nvd_repository,
            api_key,
        }
    }

    fn require_api_key(&self) -> Result<String> {
        self.api_key
            .get()
            .ok_or_else(|| SbomError::NvdApiKeyMissing.into())
    }

    /// Suggests components matching `keyword`
    pub async fn search(&self, keyword: Option<&str>) -> Result<Vec<ComponentSuggestion>> {
        let keyword = required_param(keyword, "Keyword is required")?;

        if !ManualEntryPolicy::should_query(keyword) {
            return Ok(ManualEntryPolicy::fallback(
                keyword,
                FallbackReason::KeywordTooShort,
            ));
        }

        let Some(api_key) = self.api_key.get() else {
            return Ok(ManualEntryPolicy::fallback(
                keyword,
                FallbackReason::ApiKeyMissing,
            ));
        };

        match self.nvd_repository.search_products(keyword, &api_key).await {
            Ok(products) if products.is_empty() => {
                Ok(ManualEntryPolicy::fallback(keyword, FallbackReason::NoResults))
            }
            Ok(products) => Ok(products.iter().map(ComponentSuggestion::from).collect()),
            Err(e) => {
                tracing::warn!(keyword = %keyword, error = %e, "NVD search failed, offering manual entry");
                Ok(ManualEntryPolicy::fallback(
                    keyword,
                    FallbackReason::UpstreamFailed,
                ))
            }
        }
    }

    /// Lists known versions of the product named by a CPE match string
    pub async fn versions(&self, cpe: Option<&str>) -> Result<Vec<VersionInfo>> {
        let cpe = required_param(cpe, "CPE is required")?;
        let api_key = self.require_api_key()?;

        let products = self.nvd_repository.match_products(cpe, &api_key).await?;
        Ok(version_entries(&products, cpe))
    }

    /// Lists CVEs recorded against a CPE name
    pub async fn vulnerabilities(&self, cpe: Option<&str>) -> Result<Vec<Vulnerability>> {
        let cpe = required_param(cpe, "CPE is required")?;
        let api_key = self.require_api_key()?;

        let vulnerabilities = self
            .nvd_repository
            .fetch_vulnerabilities(cpe, &api_key)
            .await?;
        tracing::debug!(cpe = %cpe, count = vulnerabilities.len(), "fetched vulnerabilities");
        Ok(vulnerabilities)
    }
}

fn required_param<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SbomError::validation(message).into()),
    }
}

/// Shapes dictionary entries into versions, falling back to a single entry for `requested_cpe`
fn version_entries(products: &[CpeProduct], requested_cpe: &str) -> Vec<VersionInfo> {
    let versions: Vec<VersionInfo> = products
        .iter()
        .filter_map(|product| {
            let parsed = product.parsed_cpe().filter(CpeName::has_version)?;
            Some(VersionInfo {
                version: parsed.version().to_string(),
                release_date: product.created().map(str::to_string),
                cpe: Some(product.cpe_name().to_string()),
                references: product.references().to_vec(),
            })
        })
        .collect();

    if !versions.is_empty() {
        return versions;
    }

    let version = CpeName::parse(requested_cpe)
        .filter(CpeName::has_version)
        .map(|cpe| cpe.version().to_string())
        .unwrap_or_else(|| LATEST_VERSION.to_string());

    vec![VersionInfo {
        version,
        release_date: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        cpe: Some(requested_cpe.to_string()),
        references: Vec::new(),
    }]
}
