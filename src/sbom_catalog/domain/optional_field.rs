use serde::de::{Deserialize, Deserializer, Error};

/// Deserializes a field that may be omitted but must not be `null`
///
/// Pair with `#[serde(default)]`: a missing key stays `None`, while an explicit
/// `null` fails instead of being dropped on the way back out.
pub fn reject_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(D::Error::custom(
            "expected a value, received null; omit optional fields instead",
        )),
    }
}
