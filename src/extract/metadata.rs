//! Metadata extraction from a page's property bag.

use crate::model::{MetadataValue, Page, PageMetadata, PropertyValue};
use crate::render::plain_text;

/// Title used when a page has no usable title property.
pub const UNTITLED: &str = "Untitled";

/// Property names checked for the page title, in order.
const TITLE_PROPERTIES: [&str; 2] = ["Name", "Title"];

/// Extract the page title.
pub fn extract_title(page: &Page) -> String {
    MetadataExtractor.extract_title(page)
}

/// Extract page metadata.
pub fn extract_metadata(page: &Page) -> PageMetadata {
    MetadataExtractor.extract_metadata(page)
}

/// Extracts titles and metadata from pages.
///
/// Extraction never fails. Missing properties fall back to defaults and
/// property types without a metadata mapping are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Title from the "Name" property, falling back to "Title".
    ///
    /// The first of those present decides: if it is not a title-type value,
    /// the result is [`UNTITLED`].
    pub fn extract_title(&self, page: &Page) -> String {
        let property = TITLE_PROPERTIES
            .iter()
            .find_map(|name| page.properties.get(name));

        match property {
            Some(PropertyValue::Title(spans)) => plain_text(spans),
            _ => UNTITLED.to_string(),
        }
    }

    /// Fixed page fields plus select, multi-select and date properties.
    ///
    /// Property fields are keyed by lower-cased name. When two properties
    /// lower-case to the same key, the later one in the bag wins.
    pub fn extract_metadata(&self, page: &Page) -> PageMetadata {
        let mut metadata = PageMetadata {
            created_time: page.created_time.clone(),
            last_edited_time: page.last_edited_time.clone(),
            url: page.url.clone(),
            ..Default::default()
        };

        for (name, property) in page.properties.iter() {
            let value = match property {
                PropertyValue::Select(option) => {
                    MetadataValue::Text(option.clone().unwrap_or_default())
                }
                PropertyValue::MultiSelect(options) => MetadataValue::List(options.clone()),
                PropertyValue::Date(start) => MetadataValue::Date(start.clone().unwrap_or_default()),
                PropertyValue::Title(_) | PropertyValue::Unknown { .. } => {
                    log::trace!(
                        "Ignoring property `{}` of type `{}`",
                        name,
                        property.type_name()
                    );
                    continue;
                }
            };

            let key = name.to_lowercase();
            if metadata.properties.insert(key, value).is_some() {
                log::debug!("Property `{}` overwrote an earlier metadata field", name);
            }
        }

        metadata
    }
}
