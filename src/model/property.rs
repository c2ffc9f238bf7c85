//! Page properties.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::{lenient_vec, null_default, payload_or_default, TextSpan};

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Title text
    Title(Vec<TextSpan>),
    /// Single select option name (`None` when unset)
    Select(Option<String>),
    /// Multi-select option names
    MultiSelect(Vec<String>),
    /// ISO-8601 start date (`None` when unset)
    Date(Option<String>),
    /// Any other property type
    Unknown {
        /// The original type tag
        property_type: String,
    },
}

impl PropertyValue {
    /// Build a property value from its type tag and raw payload.
    pub fn from_payload(property_type: &str, payload: Option<Value>) -> Self {
        match property_type {
            "title" => {
                let spans: TitlePayload = payload_or_default(property_type, payload);
                Self::Title(spans.0)
            }
            "select" => {
                let option: Option<SelectOption> = payload_or_default(property_type, payload);
                Self::Select(option.map(|o| o.name))
            }
            "multi_select" => {
                let options: MultiSelectPayload = payload_or_default(property_type, payload);
                Self::MultiSelect(options.0.into_iter().map(|o| o.name).collect())
            }
            "date" => {
                let date: Option<DatePayload> = payload_or_default(property_type, payload);
                Self::Date(date.and_then(|d| d.start))
            }
            other => Self::Unknown {
                property_type: other.to_string(),
            },
        }
    }

    /// The wire-format type tag.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Title(_) => "title",
            Self::Select(_) => "select",
            Self::MultiSelect(_) => "multi_select",
            Self::Date(_) => "date",
            Self::Unknown { property_type } => property_type,
        }
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut raw = RawProperty::deserialize(deserializer)?;
        let payload = raw.payloads.remove(&raw.property_type);
        Ok(Self::from_payload(&raw.property_type, payload))
    }
}

#[derive(Deserialize)]
struct RawProperty {
    #[serde(default, rename = "type", deserialize_with = "null_default")]
    property_type: String,
    #[serde(flatten)]
    payloads: Map<String, Value>,
}

#[derive(Deserialize, Default)]
struct TitlePayload(#[serde(deserialize_with = "lenient_vec")] Vec<TextSpan>);

#[derive(Deserialize, Default)]
struct MultiSelectPayload(#[serde(deserialize_with = "lenient_vec")] Vec<SelectOption>);

#[derive(Deserialize)]
struct SelectOption {
    #[serde(default, deserialize_with = "null_default")]
    name: String,
}

#[derive(Deserialize)]
struct DatePayload {
    #[serde(default, deserialize_with = "null_default")]
    start: Option<String>,
}

/// A page's named properties, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBag {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property. Duplicate names are kept; lookups return the first.
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.entries.push((name.into(), value));
    }

    /// Builder-style [`PropertyBag::insert`].
    pub fn with(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a property by exact name.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Iterate over properties in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for PropertyBag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BagVisitor;

        impl<'de> Visitor<'de> for BagVisitor {
            type Value = PropertyBag;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of property names to property values")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(PropertyBag::new())
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut bag = PropertyBag::new();
                while let Some((name, value)) = map.next_entry::<String, Value>()? {
                    match serde_json::from_value::<PropertyValue>(value) {
                        Ok(property) => bag.insert(name, property),
                        Err(e) => log::debug!("Skipping malformed property `{}`: {}", name, e),
                    }
                }
                Ok(bag)
            }
        }

        deserializer.deserialize_any(BagVisitor)
    }
}
