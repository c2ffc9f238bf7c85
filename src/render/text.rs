//! Plain text rendering for blocks.

use crate::model::{Block, BlockKind};

use super::rich_text::plain_text;
use super::RenderOptions;

/// Convert blocks to plain text without any markup.
///
/// Each block with text becomes one paragraph; dividers, unsupported blocks
/// and blocks without text are omitted.
pub fn to_text(blocks: &[Block], options: &RenderOptions) -> String {
    let mut paragraphs = Vec::new();
    collect_text(blocks, options, &mut paragraphs);
    paragraphs.join("\n\n")
}

fn collect_text(blocks: &[Block], options: &RenderOptions, paragraphs: &mut Vec<String>) {
    for block in blocks {
        let text = match &block.kind {
            BlockKind::Divider | BlockKind::Unsupported { .. } => String::new(),
            kind => plain_text(kind.rich_text()),
        };
        if !text.trim().is_empty() {
            paragraphs.push(text);
        }

        if options.include_children {
            collect_text(&block.children, options, paragraphs);
        }
    }
}
