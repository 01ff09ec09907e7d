use crate::sbom_catalog::domain::ComponentSuggestion;

/// Keywords shorter than this never reach the NVD dictionary
pub const MIN_KEYWORD_LENGTH: usize = 3;

/// Why the NVD dictionary could not supply suggestions for a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    KeywordTooShort,
    NoResults,
    ApiKeyMissing,
    UpstreamFailed,
}

impl FallbackReason {
    /// Explanation shown next to the manual-entry option, if the reason warrants one
    fn explanation(&self) -> Option<&'static str> {
        match self {
            FallbackReason::KeywordTooShort | FallbackReason::NoResults => None,
            FallbackReason::ApiKeyMissing => Some(
                "NVD lookup unavailable: no NVD API key configured (add one under Settings)",
            ),
            FallbackReason::UpstreamFailed => {
                Some("NVD lookup unavailable: the NVD service could not be reached")
            }
        }
    }
}

/// ManualEntryPolicy decides what a component search offers when NVD has nothing to give
///
/// The user can always fall back to the exact text they typed. When the lookup was skipped
/// or failed for a reason the user can act on, a second entry without a CPE explains it.
pub struct ManualEntryPolicy;

impl ManualEntryPolicy {
    pub fn should_query(keyword: &str) -> bool {
        keyword.trim().chars().count() >= MIN_KEYWORD_LENGTH
    }

    pub fn manual_entry(keyword: &str) -> ComponentSuggestion {
        let keyword = keyword.trim();
        ComponentSuggestion::new(
            keyword.to_string(),
            format!("Use \"{}\" (Manual Entry)", keyword),
            None,
        )
    }

    pub fn fallback(keyword: &str, reason: FallbackReason) -> Vec<ComponentSuggestion> {
        let mut suggestions = vec![Self::manual_entry(keyword)];
        if let Some(explanation) = reason.explanation() {
            suggestions.push(ComponentSuggestion::new(
                String::new(),
                explanation.to_string(),
                None,
            ));
        }
        suggestions
    }
}
