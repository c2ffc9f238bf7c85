//! Block rendering to lightweight Markdown.

use crate::model::{Block, BlockKind, CalloutBlock, CodeBlock, ImageBlock, TextSpan, ToDoBlock};

use super::rich_text::render_rich_text;
use super::visitor::{BlockVisitor, DefaultVisitor, VisitorAction};
use super::{ExtractionStats, RenderOptions, RenderResult};

/// Render blocks with default options.
pub fn render_blocks(blocks: &[Block]) -> String {
    BlockProcessor::default().render(blocks)
}

/// Render blocks and collect statistics.
pub fn render_blocks_with_stats(blocks: &[Block], options: &RenderOptions) -> RenderResult {
    BlockProcessor::new(options.clone()).render_with_stats(blocks)
}

/// Renders block sequences to a body string.
///
/// Holds only immutable options, so one processor can be shared across
/// threads and reused for any number of pages.
#[derive(Debug, Clone, Default)]
pub struct BlockProcessor {
    options: RenderOptions,
}

/// Per-call rendering state.
struct RenderState {
    output: String,
    stats: ExtractionStats,
    collect_stats: bool,
}

impl BlockProcessor {
    /// Create a new block processor.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// The options this processor renders with.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render blocks in order and concatenate their fragments.
    pub fn render(&self, blocks: &[Block]) -> String {
        self.render_with_visitor(blocks, &mut DefaultVisitor)
    }

    /// Render blocks, offering each one to `visitor` first.
    pub fn render_with_visitor(&self, blocks: &[Block], visitor: &mut dyn BlockVisitor) -> String {
        self.render_internal(blocks, visitor, false).output
    }

    /// Render blocks with extraction statistics.
    pub fn render_with_stats(&self, blocks: &[Block]) -> RenderResult {
        let state = self.render_internal(blocks, &mut DefaultVisitor, true);
        let mut stats = state.stats;
        stats.count_text(&state.output);
        RenderResult::new(state.output, stats)
    }

    fn render_internal(
        &self,
        blocks: &[Block],
        visitor: &mut dyn BlockVisitor,
        collect_stats: bool,
    ) -> RenderState {
        let mut state = RenderState {
            output: String::new(),
            stats: ExtractionStats::new(),
            collect_stats,
        };
        self.render_sequence(&mut state, blocks, visitor);
        state
    }

    fn render_sequence(
        &self,
        state: &mut RenderState,
        blocks: &[Block],
        visitor: &mut dyn BlockVisitor,
    ) {
        let mut ordinal = 0u32;

        for block in blocks {
            ordinal = match block.kind {
                BlockKind::NumberedListItem(_) => ordinal + 1,
                _ => 0,
            };

            match visitor.visit_block(block) {
                VisitorAction::Skip => {
                    if state.collect_stats {
                        state.stats.add_skipped();
                    }
                    continue;
                }
                VisitorAction::Replace(content) => {
                    if state.collect_stats {
                        state.stats.block_count += 1;
                    }
                    state.output.push_str(&content);
                }
                VisitorAction::Continue => self.render_block(state, block, ordinal),
            }

            if self.options.include_children && !block.children.is_empty() {
                self.render_sequence(state, &block.children, visitor);
            }
        }
    }

    fn render_block(&self, state: &mut RenderState, block: &Block, ordinal: u32) {
        let output = &mut state.output;
        let rendered = match &block.kind {
            BlockKind::Paragraph(b) => {
                push_line(output, "", &b.rich_text, "\n\n");
                true
            }
            BlockKind::Heading1(b) => {
                push_line(output, "# ", &b.rich_text, "\n\n");
                true
            }
            BlockKind::Heading2(b) => {
                push_line(output, "## ", &b.rich_text, "\n\n");
                true
            }
            BlockKind::Heading3(b) => {
                push_line(output, "### ", &b.rich_text, "\n\n");
                true
            }
            BlockKind::BulletedListItem(b) => {
                push_line(output, "* ", &b.rich_text, "\n");
                true
            }
            BlockKind::NumberedListItem(b) => {
                let number = if self.options.numbered_lists { ordinal } else { 1 };
                push_line(output, &format!("{}. ", number), &b.rich_text, "\n");
                true
            }
            BlockKind::ToDo(todo) => {
                render_to_do(output, todo);
                true
            }
            BlockKind::Code(code) => {
                render_code(output, code);
                true
            }
            BlockKind::Image(image) => render_image(output, image, &block.id),
            BlockKind::Quote(b) => {
                push_line(output, "> ", &b.rich_text, "\n\n");
                true
            }
            BlockKind::Divider => {
                output.push_str("---\n\n");
                true
            }
            BlockKind::Callout(callout) => {
                render_callout(output, callout);
                true
            }
            BlockKind::Unsupported { block_type } => {
                log::debug!("Skipping unsupported block `{}` ({})", block.id, block_type);
                false
            }
        };

        if state.collect_stats {
            if rendered {
                state.stats.add_block(&block.kind);
            } else {
                state.stats.add_skipped();
            }
        }
    }
}

fn push_line(output: &mut String, prefix: &str, spans: &[TextSpan], suffix: &str) {
    output.push_str(prefix);
    output.push_str(&render_rich_text(spans));
    output.push_str(suffix);
}

fn render_to_do(output: &mut String, todo: &ToDoBlock) {
    let marker = if todo.checked { "- [x] " } else { "- [ ] " };
    push_line(output, marker, &todo.rich_text, "\n");
}

fn render_code(output: &mut String, code: &CodeBlock) {
    output.push_str("```");
    output.push_str(&code.language);
    output.push('\n');
    output.push_str(&render_rich_text(&code.rich_text));
    output.push_str("\n```\n\n");
}

fn render_image(output: &mut String, image: &ImageBlock, block_id: &str) -> bool {
    let Some(url) = image.url() else {
        log::debug!("Skipping image `{}` without a resolvable URL", block_id);
        return false;
    };

    output.push_str(&format!(
        "![{}]({})\n\n",
        render_rich_text(&image.caption),
        url
    ));
    true
}

fn render_callout(output: &mut String, callout: &CalloutBlock) {
    let prefix = format!("> {} ", callout.emoji());
    push_line(output, &prefix, &callout.rich_text, "\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Annotations, FileRef, Icon, TextBlock};
    use crate::render::visitor::SkipImagesVisitor;

    fn text(s: &str) -> Vec<TextSpan> {
        vec![TextSpan::new(s)]
    }

    #[test]
    fn test_paragraph_bold() {
        let blocks = vec![Block::paragraph(vec![TextSpan::bold("Hello")])];
        assert_eq!(render_blocks(&blocks), "**Hello**\n\n");
    }

    #[test]
    fn test_headings() {
        let blocks = vec![
            Block::heading(1, text("Title")),
            Block::heading(2, text("Intro")),
            Block::heading(3, text("Detail")),
        ];
        assert_eq!(
            render_blocks(&blocks),
            "# Title\n\n## Intro\n\n### Detail\n\n"
        );
    }

    #[test]
    fn test_bulleted_list() {
        let blocks = vec![Block::bulleted(text("one")), Block::bulleted(text("two"))];
        assert_eq!(render_blocks(&blocks), "* one\n* two\n");
    }

    #[test]
    fn test_numbered_list_always_one() {
        let blocks = vec![
            Block::numbered(text("first")),
            Block::numbered(text("second")),
            Block::numbered(text("third")),
        ];
        assert_eq!(
            render_blocks(&blocks),
            "1. first\n1. second\n1. third\n"
        );
    }

    #[test]
    fn test_numbered_list_with_counter() {
        let blocks = vec![
            Block::numbered(text("a")),
            Block::numbered(text("b")),
            Block::paragraph(text("break")),
            Block::numbered(text("c")),
        ];
        let processor = BlockProcessor::new(RenderOptions::new().with_numbered_lists(true));
        assert_eq!(
            processor.render(&blocks),
            "1. a\n2. b\nbreak\n\n1. c\n"
        );
    }

    #[test]
    fn test_to_do() {
        let blocks = vec![
            Block::to_do(text("Buy milk"), true),
            Block::to_do(text("Walk dog"), false),
        ];
        assert_eq!(
            render_blocks(&blocks),
            "- [x] Buy milk\n- [ ] Walk dog\n"
        );
    }

    #[test]
    fn test_code() {
        let blocks = vec![Block::new(BlockKind::Code(CodeBlock {
            rich_text: text("fn main() {}"),
            language: "rust".into(),
            caption: vec![],
        }))];
        assert_eq!(render_blocks(&blocks), "```rust\nfn main() {}\n```\n\n");
    }

    #[test]
    fn test_image_with_caption() {
        let image = ImageBlock {
            caption: text("A cat"),
            ..ImageBlock::external("https://cdn.example/cat.png")
        };
        let blocks = vec![Block::new(BlockKind::Image(image))];
        assert_eq!(
            render_blocks(&blocks),
            "![A cat](https://cdn.example/cat.png)\n\n"
        );
    }

    #[test]
    fn test_image_prefers_uploaded_file() {
        let image = ImageBlock {
            file: Some(FileRef {
                url: "https://files.example/a.png".into(),
            }),
            ..ImageBlock::external("https://cdn.example/b.png")
        };
        let blocks = vec![Block::new(BlockKind::Image(image))];
        assert_eq!(render_blocks(&blocks), "![](https://files.example/a.png)\n\n");
    }

    #[test]
    fn test_image_without_url_is_empty() {
        let blocks = vec![Block::new(BlockKind::Image(ImageBlock::default()))];
        assert_eq!(render_blocks(&blocks), "");
    }

    #[test]
    fn test_quote_divider_callout() {
        let blocks = vec![
            Block::new(BlockKind::Quote(TextBlock::new(text("wise")))),
            Block::new(BlockKind::Divider),
            Block::new(BlockKind::Callout(CalloutBlock {
                rich_text: text("Note"),
                icon: Some(Icon {
                    emoji: Some("💡".into()),
                }),
            })),
            Block::new(BlockKind::Callout(CalloutBlock {
                rich_text: text("Plain"),
                icon: None,
            })),
        ];
        assert_eq!(
            render_blocks(&blocks),
            "> wise\n\n---\n\n> 💡 Note\n\n>  Plain\n\n"
        );
    }

    #[test]
    fn test_unsupported_block_skipped() {
        let blocks = vec![
            Block::paragraph(text("before")),
            Block::new(BlockKind::Unsupported {
                block_type: "table".into(),
            }),
            Block::paragraph(text("after")),
        ];
        assert_eq!(render_blocks(&blocks), "before\n\nafter\n\n");
    }

    #[test]
    fn test_styled_span_in_list() {
        let span = TextSpan::new("done").with_annotations(Annotations {
            strikethrough: true,
            ..Default::default()
        });
        let blocks = vec![Block::bulleted(vec![TextSpan::new("task "), span])];
        assert_eq!(render_blocks(&blocks), "* task ~~done~~\n");
    }

    #[test]
    fn test_children_render_after_parent() {
        let blocks = vec![
            Block::bulleted(text("parent")).with_children(vec![Block::bulleted(text("child"))]),
            Block::paragraph(text("next")),
        ];
        assert_eq!(render_blocks(&blocks), "* parent\n* child\nnext\n\n");

        let processor = BlockProcessor::new(RenderOptions::new().with_children(false));
        assert_eq!(processor.render(&blocks), "* parent\nnext\n\n");
    }

    #[test]
    fn test_visitor_skip_and_replace() {
        struct Shout;
        impl BlockVisitor for Shout {
            fn visit_heading(&mut self, _level: u8, spans: &[TextSpan]) -> VisitorAction {
                let text: String = spans.iter().map(|s| s.plain_text.to_uppercase()).collect();
                VisitorAction::Replace(format!("!! {} !!\n\n", text))
            }
        }

        let blocks = vec![
            Block::heading(1, text("loud")),
            Block::new(BlockKind::Image(ImageBlock::external("https://x/y.png"))),
        ];
        let processor = BlockProcessor::default();
        assert_eq!(
            processor.render_with_visitor(&blocks, &mut Shout),
            "!! LOUD !!\n\n![](https://x/y.png)\n\n"
        );
        assert_eq!(
            processor.render_with_visitor(&blocks, &mut SkipImagesVisitor),
            "# loud\n\n"
        );
    }

    #[test]
    fn test_render_with_stats() {
        let blocks = vec![
            Block::heading(1, text("Title")),
            Block::paragraph(text("Hello world")),
            Block::new(BlockKind::Image(ImageBlock::default())),
            Block::new(BlockKind::Unsupported {
                block_type: "embed".into(),
            }),
        ];
        let result = render_blocks_with_stats(&blocks, &RenderOptions::default());

        assert_eq!(result.content, "# Title\n\nHello world\n\n");
        assert_eq!(result.stats.block_count, 4);
        assert_eq!(result.stats.heading_count, 1);
        assert_eq!(result.stats.paragraph_count, 1);
        assert_eq!(result.stats.image_count, 0);
        assert_eq!(result.stats.skipped_count, 2);
        assert_eq!(result.stats.word_count, 4);
    }

    #[test]
    fn test_processor_render_with_stats_counts_blocks() {
        let blocks = vec![
            Block::paragraph(text("a b")),
            Block::heading(2, text("h")),
        ];
        let result = BlockProcessor::default().render_with_stats(&blocks);

        assert_eq!(result.stats.block_count, 2);
        assert_eq!(result.stats.paragraph_count, 1);
        assert_eq!(result.stats.heading_count, 1);
        assert_eq!(result.stats.word_count, 4);
    }

    #[test]
    fn test_plain_render_matches_stats_render() {
        let blocks = vec![Block::bulleted(text("x")), Block::to_do(text("y"), true)];
        let processor = BlockProcessor::default();
        assert_eq!(processor.render(&blocks), processor.render_with_stats(&blocks).content);
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(render_blocks(&[]), "");
    }
}
