use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// NewType wrapper for a CVSS base score (0.0 - 10.0)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CvssScore(f64);

impl CvssScore {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 10.0;

    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            anyhow::bail!(
                "CVSS score must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            );
        }
        Ok(Self(value))
    }

    /// Score used when the upstream record carries no metrics
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Qualitative severity derived from a CVSS score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Maps a score onto the four bands: >= 9.0, >= 7.0, >= 4.0, everything else
    pub fn from_cvss_score(score: CvssScore) -> Self {
        Self::from_score(score.value())
    }

    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            Severity::Critical
        } else if score >= 7.0 {
            Severity::High
        } else if score >= 4.0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known CVE affecting a CPE name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    id: String,
    description: String,
    severity: Severity,
    cvss_score: CvssScore,
    published_date: Option<String>,
    last_modified_date: Option<String>,
    references: Vec<String>,
}

impl Vulnerability {
    /// Creates a vulnerability; severity is always derived from the score
    pub fn new(
        id: String,
        description: String,
        cvss_score: CvssScore,
        published_date: Option<String>,
        last_modified_date: Option<String>,
        references: Vec<String>,
    ) -> Result<Self> {
        if id.trim().is_empty() {
            anyhow::bail!("Vulnerability ID cannot be empty");
        }

        Ok(Self {
            id,
            description,
            severity: Severity::from_cvss_score(cvss_score),
            cvss_score,
            published_date,
            last_modified_date,
            references,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn cvss_score(&self) -> CvssScore {
        self.cvss_score
    }

    pub fn published_date(&self) -> Option<&str> {
        self.published_date.as_deref()
    }

    pub fn last_modified_date(&self) -> Option<&str> {
        self.last_modified_date.as_deref()
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(Severity::from_score(9.5), Severity::Critical);
        assert_eq!(Severity::from_score(9.0), Severity::Critical);
        assert_eq!(Severity::from_score(8.9), Severity::High);
        assert_eq!(Severity::from_score(7.0), Severity::High);
        assert_eq!(Severity::from_score(6.9), Severity::Medium);
        assert_eq!(Severity::from_score(4.0), Severity::Medium);
        assert_eq!(Severity::from_score(3.9), Severity::Low);
        assert_eq!(Severity::from_score(0.0), Severity::Low);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_cvss_score_bounds() {
        assert!(CvssScore::new(0.0).is_ok());
        assert!(CvssScore::new(10.0).is_ok());
        assert!(CvssScore::new(-0.1).is_err());
        assert!(CvssScore::new(10.1).is_err());
        assert!(CvssScore::new(f64::NAN).is_err());
    }

    #[test]
    fn test_vulnerability_serialization_shape() {
        let vuln = Vulnerability::new(
            "CVE-2023-25690".to_string(),
            "HTTP request splitting".to_string(),
            CvssScore::new(9.8).unwrap(),
            Some("2023-03-07T16:15:09.520".to_string()),
            Some("2023-11-07T04:09:01.000".to_string()),
            vec!["https://httpd.apache.org/security/vulnerabilities_24.html".to_string()],
        )
        .unwrap();

        let value = serde_json::to_value(&vuln).unwrap();
        assert_eq!(value["id"], json!("CVE-2023-25690"));
        assert_eq!(value["severity"], json!("CRITICAL"));
        assert_eq!(value["cvssScore"], json!(9.8));
        assert_eq!(value["publishedDate"], json!("2023-03-07T16:15:09.520"));
        assert_eq!(value["lastModifiedDate"], json!("2023-11-07T04:09:01.000"));
        assert_eq!(value["references"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_vulnerability_requires_id() {
        let result = Vulnerability::new(
            " ".to_string(),
            String::new(),
            CvssScore::zero(),
            None,
            None,
            vec![],
        );
        assert!(result.is_err());
    }
}
