//! Payload shape detection for content-source JSON.

use std::fmt;

use serde_json::Value;

use crate::error::Result;

/// Shape of a raw JSON payload from the content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// A page object (`"object": "page"` or a `properties` map)
    Page,
    /// A single block object
    Block,
    /// A bare JSON array of blocks
    BlockArray,
    /// A paginated list response with `results`
    BlockList,
    /// JSON `null`
    Null,
    /// Anything else
    Unknown,
}

impl PayloadKind {
    /// Check if this payload carries a block sequence.
    pub fn is_block_sequence(&self) -> bool {
        matches!(self, PayloadKind::BlockArray | PayloadKind::BlockList)
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayloadKind::Page => "a page object",
            PayloadKind::Block => "a block object",
            PayloadKind::BlockArray => "a block array",
            PayloadKind::BlockList => "a block list response",
            PayloadKind::Null => "null",
            PayloadKind::Unknown => "an unrecognized payload",
        };
        f.write_str(name)
    }
}

/// Detect the payload shape of a parsed JSON value.
///
/// The explicit `object` tag wins; otherwise the shape is inferred from the
/// keys present.
///
/// # Example
/// ```
/// use serde_json::json;
/// use unnotion::detect::{detect_payload, PayloadKind};
///
/// let kind = detect_payload(&json!({ "object": "list", "results": [] }));
/// assert_eq!(kind, PayloadKind::BlockList);
/// ```
pub fn detect_payload(value: &Value) -> PayloadKind {
    match value {
        Value::Null => PayloadKind::Null,
        Value::Array(_) => PayloadKind::BlockArray,
        Value::Object(map) => match map.get("object").and_then(Value::as_str) {
            Some("page") => PayloadKind::Page,
            Some("block") => PayloadKind::Block,
            Some("list") => PayloadKind::BlockList,
            _ if map.get("results").is_some_and(Value::is_array) => PayloadKind::BlockList,
            _ if map.contains_key("properties") => PayloadKind::Page,
            _ if map.get("type").is_some_and(Value::is_string) => PayloadKind::Block,
            _ => PayloadKind::Unknown,
        },
        _ => PayloadKind::Unknown,
    }
}

/// Detect the payload shape of JSON text.
///
/// # Errors
/// Returns [`crate::Error::Json`] if the text is not valid JSON.
pub fn detect_payload_from_str(json: &str) -> Result<PayloadKind> {
    let value: Value = serde_json::from_str(json)?;
    Ok(detect_payload(&value))
}

/// Check if a value looks like a page object.
pub fn is_page(value: &Value) -> bool {
    detect_payload(value) == PayloadKind::Page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn test_detect_tagged_objects() {
        assert_eq!(detect_payload(&json!({ "object": "page" })), PayloadKind::Page);
        assert_eq!(
            detect_payload(&json!({ "object": "block", "type": "divider" })),
            PayloadKind::Block
        );
        assert_eq!(
            detect_payload(&json!({ "object": "list", "results": [] })),
            PayloadKind::BlockList
        );
    }

    #[test]
    fn test_detect_untagged_objects() {
        assert_eq!(
            detect_payload(&json!({ "id": "x", "properties": {} })),
            PayloadKind::Page
        );
        assert_eq!(
            detect_payload(&json!({ "results": [], "has_more": false })),
            PayloadKind::BlockList
        );
        assert_eq!(
            detect_payload(&json!({ "type": "paragraph" })),
            PayloadKind::Block
        );
        assert_eq!(detect_payload(&json!({ "foo": 1 })), PayloadKind::Unknown);
    }

    #[test]
    fn test_detect_arrays_and_scalars() {
        assert_eq!(detect_payload(&json!([])), PayloadKind::BlockArray);
        assert_eq!(detect_payload(&Value::Null), PayloadKind::Null);
        assert_eq!(detect_payload(&json!(42)), PayloadKind::Unknown);
        assert!(PayloadKind::BlockList.is_block_sequence());
        assert!(!PayloadKind::Page.is_block_sequence());
    }

    #[test]
    fn test_detect_from_str() {
        assert_eq!(
            detect_payload_from_str(r#"{"object": "page", "id": "x"}"#).unwrap(),
            PayloadKind::Page
        );
        assert!(matches!(
            detect_payload_from_str("{not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_is_page() {
        assert!(is_page(&json!({ "object": "page" })));
        assert!(!is_page(&json!([])));
    }

    #[test]
    fn test_display() {
        assert_eq!(PayloadKind::BlockList.to_string(), "a block list response");
    }
}
