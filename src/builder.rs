//! Assembly of converted documents from pages and their blocks.

use rayon::prelude::*;
use serde_json::Value;

use crate::detect::{detect_payload, PayloadKind};
use crate::error::{Error, Result};
use crate::extract::MetadataExtractor;
use crate::model::{Block, Page, PageDocument};
use crate::render::{BlockProcessor, RenderOptions};

/// Builds [`PageDocument`]s from a page and its block sequence.
///
/// # Example
///
/// ```
/// use unnotion::model::{Block, Page, PropertyValue, TextSpan};
/// use unnotion::DocumentBuilder;
///
/// let page = Page::new("p1")
///     .with_property("Name", PropertyValue::Title(vec![TextSpan::new("Hello")]));
/// let blocks = vec![Block::paragraph(vec![TextSpan::bold("Hi")])];
///
/// let doc = DocumentBuilder::new().build(&page, &blocks);
/// assert_eq!(doc.title(), "Hello");
/// assert_eq!(doc.body(), "**Hi**\n\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    processor: BlockProcessor,
    extractor: MetadataExtractor,
}

impl DocumentBuilder {
    /// Create a builder with default render options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with the given render options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            processor: BlockProcessor::new(options),
            extractor: MetadataExtractor,
        }
    }

    /// The render options used for block bodies.
    pub fn options(&self) -> &RenderOptions {
        self.processor.options()
    }

    /// Build one document.
    pub fn build(&self, page: &Page, blocks: &[Block]) -> PageDocument {
        let title = self.extractor.extract_title(page);
        let metadata = self.extractor.extract_metadata(page);
        let body = self.processor.render(blocks);

        log::debug!(
            "Built page `{}` ({} blocks, {} bytes)",
            page.id,
            blocks.len(),
            body.len()
        );

        PageDocument::new(page.id.clone(), title, body, metadata)
    }

    /// Build documents for many pages in parallel, preserving input order.
    pub fn build_all(&self, pages: &[(Page, Vec<Block>)]) -> Vec<PageDocument> {
        pages
            .par_iter()
            .map(|(page, blocks)| self.build(page, blocks))
            .collect()
    }

    /// Build a document from raw JSON payloads.
    ///
    /// `blocks_json` may be a block array or a paginated list response.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, a page payload that is not an object, or a
    /// block payload that is `null` or not a block list.
    pub fn build_from_json(&self, page_json: &str, blocks_json: &str) -> Result<PageDocument> {
        let page_value: Value = serde_json::from_str(page_json)?;
        let blocks_value: Value = serde_json::from_str(blocks_json)?;
        self.build_from_values(&page_value, Some(&blocks_value))
    }

    /// Build a document from already-parsed JSON values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingBlocks`] when `blocks` is absent or `null`.
    pub fn build_from_values(&self, page: &Value, blocks: Option<&Value>) -> Result<PageDocument> {
        let page = parse_page(page)?;
        let blocks = parse_blocks(blocks.ok_or(Error::MissingBlocks)?)?;
        Ok(self.build(&page, &blocks))
    }
}

/// Parse a page payload.
///
/// # Errors
///
/// Returns [`Error::InvalidPage`] unless the payload is a JSON object.
pub fn parse_page(value: &Value) -> Result<Page> {
    if !value.is_object() {
        return Err(Error::InvalidPage(format!(
            "expected an object, found {}",
            json_type_name(value)
        )));
    }
    serde_json::from_value(value.clone()).map_err(|e| Error::InvalidPage(e.to_string()))
}

/// Parse a block payload: a JSON array of blocks or a list response.
///
/// Elements that are not block objects are dropped.
///
/// # Errors
///
/// Returns [`Error::MissingBlocks`] for `null` and [`Error::InvalidBlocks`]
/// for anything that is not a block sequence.
pub fn parse_blocks(value: &Value) -> Result<Vec<Block>> {
    let items = match detect_payload(value) {
        PayloadKind::Null => return Err(Error::MissingBlocks),
        PayloadKind::BlockArray => value.as_array(),
        PayloadKind::BlockList => value.get("results").and_then(Value::as_array),
        PayloadKind::Block => {
            return Err(Error::InvalidBlocks(
                "expected a block sequence, found a single block".into(),
            ))
        }
        other => {
            return Err(Error::InvalidBlocks(format!(
                "expected a block sequence, found {}",
                other
            )))
        }
    };

    let items = items.ok_or_else(|| {
        Error::InvalidBlocks("list response without a results array".into())
    })?;

    Ok(items
        .iter()
        .filter_map(|item| match serde_json::from_value::<Block>(item.clone()) {
            Ok(block) => Some(block),
            Err(e) => {
                log::debug!("Dropping malformed block: {}", e);
                None
            }
        })
        .collect())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
