use crate::sbom_catalog::domain::{Component, InsertSbom, SbomMetadata, SbomPatch};
use crate::shared::error::SbomError;
use crate::shared::Result;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt::Display;

/// Separator between individual violations in the reported message
const VIOLATION_SEPARATOR: &str = "; ";

/// Accumulates field-level violations so a caller sees every problem at once
#[derive(Debug, Default)]
struct Violations(Vec<String>);

impl Violations {
    fn push(&mut self, path: impl Display, message: impl Display) {
        self.0.push(format!("{}: {}", path, message));
    }

    fn check(self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(SbomError::validation(self.0.join(VIOLATION_SEPARATOR)).into())
        }
    }
}

/// SbomValidator - Domain service guarding what reaches storage
///
/// Works on raw JSON so that wrong types, unknown enumeration values and
/// empty required strings are all reported with their field path.
pub struct SbomValidator;

impl SbomValidator {
    /// Validates a complete SBOM payload
    ///
    /// # Errors
    /// Returns `SbomError::Validation` listing every violation when:
    /// - the payload is not a JSON object
    /// - `name`, `version` or `format` is missing or empty
    /// - `components` is not an array of well-formed components
    /// - `metadata` is missing or malformed
    pub fn validate_insert(data: &Value) -> Result<InsertSbom> {
        let object = Self::as_object(data)?;
        let mut violations = Violations::default();

        let name = Self::required_text(object, "name", "SBOM name is required", &mut violations);
        let version = Self::required_text(
            object,
            "version",
            "SBOM version is required",
            &mut violations,
        );
        let format =
            Self::required_text(object, "format", "SBOM format is required", &mut violations);
        let components = match object.get("components") {
            Some(value) => Self::components(value, &mut violations),
            None => {
                violations.push("components", "Required");
                None
            }
        };
        let metadata = match object.get("metadata") {
            Some(value) => Self::metadata(value, &mut violations),
            None => {
                violations.push("metadata", "Required");
                None
            }
        };

        violations.check()?;
        match (name, version, format, components, metadata) {
            (Some(name), Some(version), Some(format), Some(components), Some(metadata)) => {
                Ok(InsertSbom {
                    name,
                    version,
                    format,
                    components,
                    metadata,
                })
            }
            _ => Err(SbomError::validation("Incomplete SBOM payload").into()),
        }
    }

    /// Validates a partial update; absent fields are left untouched
    ///
    /// A present field must satisfy its full shape, so an explicit `null`
    /// or a partially-formed component list is rejected.
    pub fn validate_partial_update(data: &Value) -> Result<SbomPatch> {
        let object = Self::as_object(data)?;
        let mut violations = Violations::default();
        let mut patch = SbomPatch::default();

        if object.contains_key("name") {
            patch.name =
                Self::required_text(object, "name", "SBOM name is required", &mut violations);
        }
        if object.contains_key("version") {
            patch.version = Self::required_text(
                object,
                "version",
                "SBOM version is required",
                &mut violations,
            );
        }
        if object.contains_key("format") {
            patch.format =
                Self::required_text(object, "format", "SBOM format is required", &mut violations);
        }
        if let Some(value) = object.get("components") {
            patch.components = Self::components(value, &mut violations);
        }
        if let Some(value) = object.get("metadata") {
            patch.metadata = Self::metadata(value, &mut violations);
        }

        violations.check()?;
        Ok(patch)
    }

    fn as_object(data: &Value) -> Result<&Map<String, Value>> {
        data.as_object().ok_or_else(|| {
            SbomError::validation(format!(
                "Expected a JSON object, received {}",
                Self::kind_of(data)
            ))
            .into()
        })
    }

    fn kind_of(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }

    fn decode<T: DeserializeOwned>(
        value: &Value,
        path: &str,
        violations: &mut Violations,
    ) -> Option<T> {
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                violations.push(path, e);
                None
            }
        }
    }

    fn required_text(
        object: &Map<String, Value>,
        key: &str,
        empty_message: &str,
        violations: &mut Violations,
    ) -> Option<String> {
        let Some(value) = object.get(key) else {
            violations.push(key, "Required");
            return None;
        };
        let text: String = Self::decode(value, key, violations)?;
        if text.trim().is_empty() {
            violations.push(key, empty_message);
            return None;
        }
        Some(text)
    }

    fn components(value: &Value, violations: &mut Violations) -> Option<Vec<Component>> {
        let Some(items) = value.as_array() else {
            violations.push(
                "components",
                format!("Expected an array, received {}", Self::kind_of(value)),
            );
            return None;
        };

        let before = violations.0.len();
        let mut components = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let path = format!("components[{}]", index);
            if let Some(component) = Self::decode::<Component>(item, &path, violations) {
                Self::check_component(&component, &path, violations);
                components.push(component);
            }
        }

        (violations.0.len() == before).then_some(components)
    }

    fn check_component(component: &Component, path: &str, violations: &mut Violations) {
        if component.name.trim().is_empty() {
            violations.push(format!("{}.name", path), "Component name is required");
        }
        if component.version.trim().is_empty() {
            violations.push(format!("{}.version", path), "Version is required");
        }
    }

    fn metadata(value: &Value, violations: &mut Violations) -> Option<SbomMetadata> {
        Self::decode::<SbomMetadata>(value, "metadata", violations)
    }
}
