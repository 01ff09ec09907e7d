/// Wildcard used by CPE 2.3 for an unspecified attribute
const ANY_VALUE: &str = "*";

/// Minimum number of colon-separated fields up to and including the version slot
const MIN_FIELDS: usize = 6;

/// CpeName value object holding the leading attributes of a CPE 2.3 name
///
/// Format: `cpe:2.3:<part>:<vendor>:<product>:<version>:...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpeName {
    part: String,
    vendor: String,
    product: String,
    version: String,
}

impl CpeName {
    /// Parses a CPE 2.3 name, returning `None` when it has fewer than six fields.
    ///
    /// A `*` in the version slot yields an empty version.
    pub fn parse(cpe_name: &str) -> Option<Self> {
        let parts: Vec<&str> = cpe_name.split(':').collect();
        if parts.len() < MIN_FIELDS {
            return None;
        }

        let version = if parts[5] == ANY_VALUE {
            String::new()
        } else {
            parts[5].to_string()
        };

        Some(Self {
            part: parts[2].to_string(),
            vendor: parts[3].to_string(),
            product: parts[4].to_string(),
            version,
        })
    }

    /// `a` (application), `o` (operating system) or `h` (hardware)
    pub fn part(&self) -> &str {
        &self.part
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    /// Empty when the version slot is the `*` wildcard
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn has_version(&self) -> bool {
        !self.version.is_empty()
    }
}
