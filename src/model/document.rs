//! Normalized output document.

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::slug::slugify;

/// A converted page: title, rendered body and metadata.
///
/// Built once per source page by [`crate::DocumentBuilder`] and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDocument {
    id: String,
    title: String,
    body: String,
    metadata: PageMetadata,
}

impl PageDocument {
    /// Assemble a document from its parts.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        metadata: PageMetadata,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            metadata,
        }
    }

    /// Source page identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Page title ("Untitled" when the page has none).
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Rendered body in lightweight markup.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Page metadata.
    pub fn metadata(&self) -> &PageMetadata {
        &self.metadata
    }

    /// URL-safe identifier derived from the title.
    ///
    /// May be empty for punctuation-only titles. Distinct pages can share a
    /// slug; callers that write files keyed by slug must handle collisions.
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }

    /// Render the body, optionally preceded by YAML frontmatter.
    pub fn to_markdown(&self, include_frontmatter: bool) -> String {
        if !include_frontmatter {
            return self.body.clone();
        }

        let mut output = self.metadata.to_yaml_frontmatter(&self.title);
        output.push_str(&self.body);
        output
    }
}

/// A metadata value extracted from a page property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Select option name
    Text(String),
    /// Multi-select option names
    List(Vec<String>),
    /// ISO-8601 date string
    Date(String),
}

impl MetadataValue {
    /// Get the value as a string, if it is scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Date(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Get the value as a list, if it is a multi-select.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Text(s) | Self::Date(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        }
    }
}

/// Page metadata: fixed page fields plus property-derived fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    /// Creation timestamp (empty if unknown)
    pub created_time: String,

    /// Last edit timestamp (empty if unknown)
    pub last_edited_time: String,

    /// Page URL (empty if unknown)
    pub url: String,

    /// Property-derived fields keyed by lower-cased property name
    pub properties: MetadataFields,
}

/// Property-derived metadata fields in source order.
///
/// Re-inserting a key replaces its value and keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataFields {
    entries: Vec<(String, MetadataValue)>,
}

impl MetadataFields {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: MetadataValue) -> Option<MetadataValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Iterate over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PageMetadata {
    /// Look up a property-derived field.
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.properties.get(key)
    }

    /// Parse the creation timestamp.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created_time).ok()
    }

    /// Parse the last edit timestamp.
    pub fn last_edited_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.last_edited_time).ok()
    }

    /// Flatten into a single record for template contexts.
    ///
    /// Fixed fields come first. A property whose lower-cased name equals a
    /// fixed field name replaces that field's value.
    pub fn to_context(&self) -> Map<String, Value> {
        let mut context = Map::new();
        context.insert("created_time".into(), Value::String(self.created_time.clone()));
        context.insert(
            "last_edited_time".into(),
            Value::String(self.last_edited_time.clone()),
        );
        context.insert("url".into(), Value::String(self.url.clone()));

        for (key, value) in self.properties.iter() {
            context.insert(key.to_string(), value.to_json());
        }
        context
    }

    /// Convert metadata to YAML frontmatter format.
    ///
    /// `title` is always the document title; a property that lower-cases to
    /// `title` is left out. Keys that are not plain scalars are quoted.
    pub fn to_yaml_frontmatter(&self, title: &str) -> String {
        let mut lines = vec!["---".to_string()];
        lines.push(format!("title: \"{}\"", escape_yaml(title)));

        for (key, value) in self.to_context() {
            if key == "title" {
                log::debug!("Omitting `title` property from frontmatter");
                continue;
            }

            let rendered = match value {
                Value::Array(items) => {
                    let items: Vec<String> = items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(|s| format!("\"{}\"", escape_yaml(s)))
                        .collect();
                    format!("[{}]", items.join(", "))
                }
                Value::String(s) => format!("\"{}\"", escape_yaml(&s)),
                other => other.to_string(),
            };
            lines.push(format!("{}: {}", yaml_key(&key), rendered));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

impl Serialize for PageMetadata {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_context().serialize(serializer)
    }
}

/// Render a mapping key, quoting it unless it is a plain word.
fn yaml_key(key: &str) -> String {
    let plain = !key.is_empty()
        && !key.starts_with('-')
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');

    if plain {
        key.to_string()
    } else {
        format!("\"{}\"", escape_yaml(key))
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
