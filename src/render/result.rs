//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::BlockKind;

/// Result of rendering blocks, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content
    pub content: String,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: ExtractionStats) -> Self {
        Self { content, stats }
    }
}

/// Statistics collected while rendering blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Total number of blocks visited (including children)
    pub block_count: u32,

    /// Number of paragraphs rendered
    pub paragraph_count: u32,

    /// Number of headings rendered
    pub heading_count: u32,

    /// Number of bulleted and numbered list items rendered
    pub list_item_count: u32,

    /// Number of to-do items rendered
    pub todo_count: u32,

    /// Number of code blocks rendered
    pub code_count: u32,

    /// Number of images rendered
    pub image_count: u32,

    /// Number of quotes and callouts rendered
    pub quote_count: u32,

    /// Number of dividers rendered
    pub divider_count: u32,

    /// Number of blocks that produced no output (unsupported or unresolvable)
    pub skipped_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rendered block by kind.
    pub fn add_block(&mut self, kind: &BlockKind) {
        self.block_count += 1;
        match kind {
            BlockKind::Paragraph(_) => self.paragraph_count += 1,
            BlockKind::Heading1(_) | BlockKind::Heading2(_) | BlockKind::Heading3(_) => {
                self.heading_count += 1
            }
            BlockKind::BulletedListItem(_) | BlockKind::NumberedListItem(_) => {
                self.list_item_count += 1
            }
            BlockKind::ToDo(_) => self.todo_count += 1,
            BlockKind::Code(_) => self.code_count += 1,
            BlockKind::Image(_) => self.image_count += 1,
            BlockKind::Quote(_) | BlockKind::Callout(_) => self.quote_count += 1,
            BlockKind::Divider => self.divider_count += 1,
            BlockKind::Unsupported { .. } => self.skipped_count += 1,
        }
    }

    /// Record a block that was visited but produced no output.
    pub fn add_skipped(&mut self) {
        self.block_count += 1;
        self.skipped_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
