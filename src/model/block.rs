//! Content blocks.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::{lenient_vec, null_default, payload_or_default, TextSpan};

/// One node of page content.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Block identifier from the content source
    pub id: String,

    /// Block type and its payload
    pub kind: BlockKind,

    /// Nested blocks (e.g., items under a toggle or list item)
    pub children: Vec<Block>,
}

impl Block {
    /// Create a block without an identifier or children.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: String::new(),
            kind,
            children: Vec::new(),
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(spans: Vec<TextSpan>) -> Self {
        Self::new(BlockKind::Paragraph(TextBlock::new(spans)))
    }

    /// Create a heading block. Levels outside 1-3 are clamped.
    pub fn heading(level: u8, spans: Vec<TextSpan>) -> Self {
        let payload = TextBlock::new(spans);
        Self::new(match level {
            0 | 1 => BlockKind::Heading1(payload),
            2 => BlockKind::Heading2(payload),
            _ => BlockKind::Heading3(payload),
        })
    }

    /// Create a bulleted list item.
    pub fn bulleted(spans: Vec<TextSpan>) -> Self {
        Self::new(BlockKind::BulletedListItem(TextBlock::new(spans)))
    }

    /// Create a numbered list item.
    pub fn numbered(spans: Vec<TextSpan>) -> Self {
        Self::new(BlockKind::NumberedListItem(TextBlock::new(spans)))
    }

    /// Create a to-do item.
    pub fn to_do(spans: Vec<TextSpan>, checked: bool) -> Self {
        Self::new(BlockKind::ToDo(ToDoBlock {
            rich_text: spans,
            checked,
        }))
    }

    /// Set the block identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach nested blocks.
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    /// The wire-format type tag of this block.
    pub fn block_type(&self) -> &str {
        self.kind.type_name()
    }

    /// Check if this block has a recognized type.
    pub fn is_supported(&self) -> bool {
        !matches!(self.kind, BlockKind::Unsupported { .. })
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut raw = RawBlock::deserialize(deserializer)?;
        let payload = raw.payloads.remove(&raw.block_type);
        let kind = BlockKind::from_payload(&raw.block_type, payload);

        Ok(Block {
            id: raw.id,
            kind,
            children: raw.children,
        })
    }
}

/// Wire shape of a block: a `type` tag plus a same-named payload object.
#[derive(Deserialize)]
struct RawBlock {
    #[serde(default, deserialize_with = "null_default")]
    id: String,
    #[serde(default, rename = "type", deserialize_with = "null_default")]
    block_type: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    children: Vec<Block>,
    #[serde(flatten)]
    payloads: Map<String, Value>,
}

/// Block type together with its type-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    /// Plain paragraph
    Paragraph(TextBlock),
    /// Level 1 heading
    Heading1(TextBlock),
    /// Level 2 heading
    Heading2(TextBlock),
    /// Level 3 heading
    Heading3(TextBlock),
    /// Bulleted list item
    BulletedListItem(TextBlock),
    /// Numbered list item
    NumberedListItem(TextBlock),
    /// Checkbox item
    ToDo(ToDoBlock),
    /// Fenced code
    Code(CodeBlock),
    /// Image with caption
    Image(ImageBlock),
    /// Block quote
    Quote(TextBlock),
    /// Horizontal rule
    Divider,
    /// Callout with optional emoji icon
    Callout(CalloutBlock),
    /// Any type tag this crate doesn't render
    Unsupported {
        /// The original type tag
        block_type: String,
    },
}

impl BlockKind {
    /// Build a block kind from its type tag and raw payload.
    ///
    /// Never fails: unknown tags map to [`BlockKind::Unsupported`] and
    /// malformed payloads to their defaults.
    pub fn from_payload(block_type: &str, payload: Option<Value>) -> Self {
        match block_type {
            "paragraph" => Self::Paragraph(payload_or_default(block_type, payload)),
            "heading_1" => Self::Heading1(payload_or_default(block_type, payload)),
            "heading_2" => Self::Heading2(payload_or_default(block_type, payload)),
            "heading_3" => Self::Heading3(payload_or_default(block_type, payload)),
            "bulleted_list_item" => {
                Self::BulletedListItem(payload_or_default(block_type, payload))
            }
            "numbered_list_item" => {
                Self::NumberedListItem(payload_or_default(block_type, payload))
            }
            "to_do" => Self::ToDo(payload_or_default(block_type, payload)),
            "code" => Self::Code(payload_or_default(block_type, payload)),
            "image" => Self::Image(payload_or_default(block_type, payload)),
            "quote" => Self::Quote(payload_or_default(block_type, payload)),
            "divider" => Self::Divider,
            "callout" => Self::Callout(payload_or_default(block_type, payload)),
            other => Self::Unsupported {
                block_type: other.to_string(),
            },
        }
    }

    /// The wire-format type tag.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Paragraph(_) => "paragraph",
            Self::Heading1(_) => "heading_1",
            Self::Heading2(_) => "heading_2",
            Self::Heading3(_) => "heading_3",
            Self::BulletedListItem(_) => "bulleted_list_item",
            Self::NumberedListItem(_) => "numbered_list_item",
            Self::ToDo(_) => "to_do",
            Self::Code(_) => "code",
            Self::Image(_) => "image",
            Self::Quote(_) => "quote",
            Self::Divider => "divider",
            Self::Callout(_) => "callout",
            Self::Unsupported { block_type } => block_type,
        }
    }

    /// The main rich text of this block, if it has any.
    ///
    /// For images this is the caption.
    pub fn rich_text(&self) -> &[TextSpan] {
        match self {
            Self::Paragraph(b)
            | Self::Heading1(b)
            | Self::Heading2(b)
            | Self::Heading3(b)
            | Self::BulletedListItem(b)
            | Self::NumberedListItem(b)
            | Self::Quote(b) => &b.rich_text,
            Self::ToDo(b) => &b.rich_text,
            Self::Code(b) => &b.rich_text,
            Self::Image(b) => &b.caption,
            Self::Callout(b) => &b.rich_text,
            Self::Divider | Self::Unsupported { .. } => &[],
        }
    }
}

/// Payload of text-only blocks (paragraph, headings, list items, quote).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TextBlock {
    /// Block text
    #[serde(alias = "text", deserialize_with = "lenient_vec")]
    pub rich_text: Vec<TextSpan>,
}

impl TextBlock {
    /// Create a text payload.
    pub fn new(rich_text: Vec<TextSpan>) -> Self {
        Self { rich_text }
    }
}

/// Payload of a to-do block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToDoBlock {
    /// Item text
    #[serde(alias = "text", deserialize_with = "lenient_vec")]
    pub rich_text: Vec<TextSpan>,

    /// Whether the item is checked
    #[serde(deserialize_with = "null_default")]
    pub checked: bool,
}

/// Payload of a code block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodeBlock {
    /// Source code
    #[serde(alias = "text", deserialize_with = "lenient_vec")]
    pub rich_text: Vec<TextSpan>,

    /// Language tag (e.g., "rust", "plain text")
    #[serde(deserialize_with = "null_default")]
    pub language: String,

    /// Caption (not rendered)
    #[serde(deserialize_with = "lenient_vec")]
    pub caption: Vec<TextSpan>,
}

/// Payload of an image block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageBlock {
    /// Uploaded file hosted by the content source
    #[serde(deserialize_with = "null_default")]
    pub file: Option<FileRef>,

    /// Externally hosted file
    #[serde(deserialize_with = "null_default")]
    pub external: Option<FileRef>,

    /// Image caption
    #[serde(deserialize_with = "lenient_vec")]
    pub caption: Vec<TextSpan>,
}

impl ImageBlock {
    /// Create an image payload pointing at an external URL.
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            external: Some(FileRef { url: url.into() }),
            ..Default::default()
        }
    }

    /// Resolve the image URL: uploaded file first, then external.
    ///
    /// Empty URLs are treated as absent.
    pub fn url(&self) -> Option<&str> {
        [&self.file, &self.external]
            .into_iter()
            .flatten()
            .map(|f| f.url.as_str())
            .find(|url| !url.is_empty())
    }
}

/// Reference to a file by URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileRef {
    /// File URL
    #[serde(deserialize_with = "null_default")]
    pub url: String,
}

/// Payload of a callout block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalloutBlock {
    /// Callout text
    #[serde(alias = "text", deserialize_with = "lenient_vec")]
    pub rich_text: Vec<TextSpan>,

    /// Callout icon
    #[serde(deserialize_with = "null_default")]
    pub icon: Option<Icon>,
}

impl CalloutBlock {
    /// The emoji icon, or an empty string.
    pub fn emoji(&self) -> &str {
        self.icon
            .as_ref()
            .and_then(|icon| icon.emoji.as_deref())
            .unwrap_or("")
    }
}

/// Block icon. Only emoji icons carry renderable content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Icon {
    /// Emoji character(s)
    #[serde(deserialize_with = "null_default")]
    pub emoji: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn span(text: &str) -> Value {
        json!({ "type": "text", "text": { "content": text }, "plain_text": text })
    }

    #[test]
    fn test_deserialize_paragraph() {
        let block: Block = serde_json::from_value(json!({
            "object": "block",
            "id": "b1",
            "type": "paragraph",
            "paragraph": { "rich_text": [span("Hello")], "color": "default" }
        }))
        .unwrap();

        assert_eq!(block.id, "b1");
        assert_eq!(block.block_type(), "paragraph");
        assert_eq!(block.kind.rich_text()[0].plain_text, "Hello");
    }

    #[test]
    fn test_deserialize_unknown_type() {
        let block: Block = serde_json::from_value(json!({
            "id": "b2",
            "type": "synced_block",
            "synced_block": { "synced_from": null }
        }))
        .unwrap();

        assert!(!block.is_supported());
        assert_eq!(block.block_type(), "synced_block");
    }

    #[test]
    fn test_deserialize_missing_payload() {
        let block: Block = serde_json::from_value(json!({ "id": "b3", "type": "quote" })).unwrap();
        assert_eq!(block.kind, BlockKind::Quote(TextBlock::default()));
    }

    #[test]
    fn test_deserialize_malformed_payload() {
        let block: Block = serde_json::from_value(json!({
            "type": "to_do",
            "to_do": "checked"
        }))
        .unwrap();
        assert_eq!(block.kind, BlockKind::ToDo(ToDoBlock::default()));
    }

    #[test]
    fn test_deserialize_legacy_text_field() {
        let block: Block = serde_json::from_value(json!({
            "type": "heading_2",
            "heading_2": { "text": [span("Intro")] }
        }))
        .unwrap();
        assert_eq!(block.kind.rich_text()[0].plain_text, "Intro");
    }

    #[test]
    fn test_deserialize_children() {
        let block: Block = serde_json::from_value(json!({
            "type": "bulleted_list_item",
            "bulleted_list_item": { "rich_text": [span("parent")] },
            "children": [
                { "type": "paragraph", "paragraph": { "rich_text": [span("child")] } }
            ]
        }))
        .unwrap();
        assert_eq!(block.children.len(), 1);
        assert_eq!(block.children[0].block_type(), "paragraph");
    }

    #[test]
    fn test_image_url_prefers_file() {
        let image: ImageBlock = serde_json::from_value(json!({
            "type": "file",
            "file": { "url": "https://files.example/a.png", "expiry_time": "2024-01-01T00:00:00Z" },
            "external": { "url": "https://cdn.example/b.png" }
        }))
        .unwrap();
        assert_eq!(image.url(), Some("https://files.example/a.png"));
    }

    #[test]
    fn test_image_url_falls_back_to_external() {
        let image = ImageBlock::external("https://cdn.example/b.png");
        assert_eq!(image.url(), Some("https://cdn.example/b.png"));

        let image: ImageBlock =
            serde_json::from_value(json!({ "file": { "url": "" }, "external": null })).unwrap();
        assert_eq!(image.url(), None);
    }

    #[test]
    fn test_callout_emoji() {
        let callout: CalloutBlock = serde_json::from_value(json!({
            "rich_text": [span("Note")],
            "icon": { "type": "emoji", "emoji": "💡" }
        }))
        .unwrap();
        assert_eq!(callout.emoji(), "💡");

        let callout: CalloutBlock = serde_json::from_value(json!({
            "icon": { "type": "external", "external": { "url": "https://x" } }
        }))
        .unwrap();
        assert_eq!(callout.emoji(), "");
    }

    #[test]
    fn test_heading_constructor_clamps() {
        assert_eq!(Block::heading(0, vec![]).block_type(), "heading_1");
        assert_eq!(Block::heading(2, vec![]).block_type(), "heading_2");
        assert_eq!(Block::heading(6, vec![]).block_type(), "heading_3");
    }
}
