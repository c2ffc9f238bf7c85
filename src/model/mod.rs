//! Data model for externally-sourced page content.
//!
//! This module defines the typed representation of the content source's
//! payloads: blocks, rich text spans, page properties and the normalized
//! output document. Deserialization is deliberately forgiving. Missing or
//! malformed fields fall back to their defaults and unknown variants are kept
//! as catch-all values so that callers can skip them.

mod block;
mod document;
mod page;
mod property;
mod rich_text;

pub use block::{
    Block, BlockKind, CalloutBlock, CodeBlock, FileRef, Icon, ImageBlock, TextBlock, ToDoBlock,
};
pub use document::{MetadataFields, MetadataValue, PageDocument, PageMetadata};
pub use page::Page;
pub use property::{PropertyBag, PropertyValue};
pub use rich_text::{Annotations, TextSpan};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a field, treating `null` as the type's default.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a list, dropping elements that don't match `T`.
///
/// A `null` or non-array value yields an empty list.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::debug!("Dropping malformed list element: {}", e);
                None
            }
        })
        .collect())
}

/// Decode an optional payload value, falling back to the default on absence or
/// shape mismatch.
pub(crate) fn payload_or_default<T>(kind: &str, value: Option<Value>) -> T
where
    T: DeserializeOwned + Default,
{
    match value {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            log::debug!("Malformed `{}` payload, using defaults: {}", kind, e);
            T::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "null_default")]
        name: String,
        #[serde(default, deserialize_with = "lenient_vec")]
        numbers: Vec<u32>,
    }

    #[test]
    fn test_null_default() {
        let holder: Holder = serde_json::from_value(json!({ "name": null })).unwrap();
        assert_eq!(holder.name, "");
    }

    #[test]
    fn test_lenient_vec_drops_bad_elements() {
        let holder: Holder =
            serde_json::from_value(json!({ "numbers": [1, "two", 3, null] })).unwrap();
        assert_eq!(holder.numbers, vec![1, 3]);
    }

    #[test]
    fn test_lenient_vec_non_array() {
        let holder: Holder = serde_json::from_value(json!({ "numbers": "nope" })).unwrap();
        assert!(holder.numbers.is_empty());
    }

    #[test]
    fn test_payload_or_default() {
        let holder: Holder = payload_or_default("holder", Some(json!("not an object")));
        assert_eq!(holder.name, "");
        let holder: Holder = payload_or_default("holder", None);
        assert!(holder.numbers.is_empty());
    }
}
