//! Page-level types.

use serde::Deserialize;

use super::{null_default, PropertyBag, PropertyValue};

/// A source page: identity, timestamps and properties.
///
/// The page body is not part of this record; blocks are fetched and passed
/// separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Page {
    /// Page identifier
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,

    /// Creation timestamp (ISO-8601)
    #[serde(default, deserialize_with = "null_default")]
    pub created_time: String,

    /// Last edit timestamp (ISO-8601)
    #[serde(default, deserialize_with = "null_default")]
    pub last_edited_time: String,

    /// Public URL of the page
    #[serde(default, deserialize_with = "null_default")]
    pub url: String,

    /// Named, typed properties
    #[serde(default)]
    pub properties: PropertyBag,
}

impl Page {
    /// Create a page with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the creation and last-edit timestamps.
    pub fn with_times(
        mut self,
        created_time: impl Into<String>,
        last_edited_time: impl Into<String>,
    ) -> Self {
        self.created_time = created_time.into();
        self.last_edited_time = last_edited_time.into();
        self
    }

    /// Set the page URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Add a property.
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name, value);
        self
    }
}
