//! Title and metadata extraction from page properties.

mod metadata;

pub use metadata::{extract_metadata, extract_title, MetadataExtractor, UNTITLED};
