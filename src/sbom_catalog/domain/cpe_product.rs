use super::cpe::CpeName;

/// Product entry from the NVD CPE dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpeProduct {
    cpe_name: String,
    title: Option<String>,
    created: Option<String>,
    references: Vec<String>,
}

impl CpeProduct {
    pub fn new(
        cpe_name: String,
        title: Option<String>,
        created: Option<String>,
        references: Vec<String>,
    ) -> Self {
        Self {
            cpe_name,
            title,
            created,
            references,
        }
    }

    pub fn cpe_name(&self) -> &str {
        &self.cpe_name
    }

    /// Human-readable title, falling back to the raw CPE name
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.cpe_name)
    }

    pub fn created(&self) -> Option<&str> {
        self.created.as_deref()
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }

    pub fn parsed_cpe(&self) -> Option<CpeName> {
        CpeName::parse(&self.cpe_name)
    }
}
