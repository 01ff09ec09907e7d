use super::cpe_product::CpeProduct;
use serde::Serialize;

/// Option offered to a user picking a component by name
///
/// Entries backed by the NVD dictionary carry the CPE name; manual-entry
/// and placeholder entries do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSuggestion {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpe: Option<String>,
}

impl ComponentSuggestion {
    pub fn new(value: String, label: String, cpe: Option<String>) -> Self {
        Self { value, label, cpe }
    }

    pub fn is_manual(&self) -> bool {
        self.cpe.is_none()
    }
}

impl From<&CpeProduct> for ComponentSuggestion {
    fn from(product: &CpeProduct) -> Self {
        let name = product.display_name().to_string();
        Self {
            value: name.clone(),
            label: name,
            cpe: Some(product.cpe_name().to_string()),
        }
    }
}
