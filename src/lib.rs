//! # unnotion
//!
//! Conversion of Notion-style pages and content blocks into normalized
//! documents for Rust.
//!
//! This library takes a page object (a flat property bag plus timestamps) and
//! its block tree, and produces a [`PageDocument`]: a title, a Markdown body,
//! and structured metadata ready for templating.
//!
//! ## Quick Start
//!
//! ```
//! use unnotion::from_json;
//!
//! fn main() -> unnotion::Result<()> {
//!     let page = r#"{
//!         "id": "abc",
//!         "properties": {
//!             "Name": { "type": "title", "title": [{ "plain_text": "My Page" }] }
//!         }
//!     }"#;
//!     let blocks = r#"[
//!         { "type": "heading_2", "heading_2": { "rich_text": [{ "plain_text": "Intro" }] } }
//!     ]"#;
//!
//!     let doc = from_json(page, blocks)?;
//!     assert_eq!(doc.title(), "My Page");
//!     assert_eq!(doc.slug(), "my-page");
//!     assert_eq!(doc.body(), "## Intro\n\n");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Block rendering**: Paragraphs, headings, lists, to-dos, code, images,
//!   quotes, dividers and callouts to Markdown
//! - **Rich text**: Bold, italic, strikethrough and inline code annotations
//! - **Metadata**: Select, multi-select and date properties flattened by name
//! - **Lenient input**: Unknown block and property types are skipped
//! - **Parallel processing**: Uses Rayon for batches of pages

pub mod builder;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod slug;

// Re-export commonly used types
pub use builder::{parse_blocks, parse_page, DocumentBuilder};
pub use detect::{detect_payload, PayloadKind};
pub use error::{Error, Result};
pub use extract::{extract_metadata, extract_title, MetadataExtractor};
pub use model::{
    Annotations, Block, BlockKind, MetadataValue, Page, PageDocument, PageMetadata, PropertyBag,
    PropertyValue, TextSpan,
};
pub use render::{render_blocks, render_rich_text, JsonFormat, RenderOptions};
pub use slug::slugify;

use std::path::Path;

/// Build a document from a typed page and its blocks with default options.
pub fn build_document(page: &Page, blocks: &[Block]) -> PageDocument {
    DocumentBuilder::new().build(page, blocks)
}

/// Build a document from raw page and block JSON.
///
/// # Errors
///
/// Fails on malformed JSON or a payload with the wrong shape.
pub fn from_json(page_json: &str, blocks_json: &str) -> Result<PageDocument> {
    DocumentBuilder::new().build_from_json(page_json, blocks_json)
}

/// Build a document from JSON files on disk.
///
/// # Example
///
/// ```no_run
/// let doc = unnotion::from_files("page.json", "blocks.json")?;
/// println!("{}", doc.to_markdown(true));
/// # Ok::<(), unnotion::Error>(())
/// ```
pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
    page_path: P,
    blocks_path: Q,
) -> Result<PageDocument> {
    from_files_with_options(page_path, blocks_path, RenderOptions::default())
}

/// Build a document from JSON files on disk with custom render options.
pub fn from_files_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    page_path: P,
    blocks_path: Q,
    options: RenderOptions,
) -> Result<PageDocument> {
    let page_json = std::fs::read_to_string(page_path)?;
    let blocks_json = std::fs::read_to_string(blocks_path)?;
    DocumentBuilder::with_options(options).build_from_json(&page_json, &blocks_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_document_defaults() {
        let doc = build_document(&Page::new("p1"), &[]);
        assert_eq!(doc.id(), "p1");
        assert_eq!(doc.title(), "Untitled");
        assert_eq!(doc.body(), "");
    }

    #[test]
    fn test_from_json_rejects_null_blocks() {
        let result = from_json(r#"{"id": "p1"}"#, "null");
        assert!(matches!(result, Err(Error::MissingBlocks)));
    }

    #[test]
    fn test_from_json_rejects_page_array() {
        let result = from_json("[]", "[]");
        assert!(matches!(result, Err(Error::InvalidPage(_))));
    }

    #[test]
    fn test_from_files_missing_file() {
        let result = from_files("/nonexistent/page.json", "/nonexistent/blocks.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
