//! Visitor pattern for customizing block rendering.
//!
//! A visitor sees every block before the default renderer does and can
//! replace or drop its output. Unsupported block types are offered too, so a
//! visitor can render types this crate otherwise skips.
//!
//! # Example
//!
//! ```
//! use unnotion::render::visitor::{BlockVisitor, VisitorAction};
//!
//! struct TocMarker;
//!
//! impl BlockVisitor for TocMarker {
//!     fn visit_unsupported(&mut self, block_type: &str) -> VisitorAction {
//!         if block_type == "table_of_contents" {
//!             VisitorAction::Replace("[TOC]\n\n".to_string())
//!         } else {
//!             VisitorAction::Continue
//!         }
//!     }
//! }
//! ```

use crate::model::{Block, BlockKind, CodeBlock, ImageBlock, TextSpan};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the block with custom output.
    Replace(String),

    /// Skip this block and its children entirely.
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the block should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting blocks during rendering.
///
/// All methods return `VisitorAction::Continue` by default. Override
/// [`BlockVisitor::visit_block`] to intercept every block, or one of the
/// typed hooks it dispatches to.
pub trait BlockVisitor: Send + Sync {
    /// Called before rendering any block.
    fn visit_block(&mut self, block: &Block) -> VisitorAction {
        match &block.kind {
            BlockKind::Heading1(b) => self.visit_heading(1, &b.rich_text),
            BlockKind::Heading2(b) => self.visit_heading(2, &b.rich_text),
            BlockKind::Heading3(b) => self.visit_heading(3, &b.rich_text),
            BlockKind::Image(image) => self.visit_image(image),
            BlockKind::Code(code) => self.visit_code(code),
            BlockKind::Unsupported { block_type } => self.visit_unsupported(block_type),
            _ => VisitorAction::Continue,
        }
    }

    /// Called before rendering a heading.
    fn visit_heading(&mut self, level: u8, spans: &[TextSpan]) -> VisitorAction {
        let _ = (level, spans);
        VisitorAction::Continue
    }

    /// Called before rendering an image.
    fn visit_image(&mut self, image: &ImageBlock) -> VisitorAction {
        let _ = image;
        VisitorAction::Continue
    }

    /// Called before rendering a code block.
    fn visit_code(&mut self, code: &CodeBlock) -> VisitorAction {
        let _ = code;
        VisitorAction::Continue
    }

    /// Called for a block whose type has no default rendering.
    fn visit_unsupported(&mut self, block_type: &str) -> VisitorAction {
        let _ = block_type;
        VisitorAction::Continue
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl BlockVisitor for DefaultVisitor {}

/// Visitor that skips all images.
#[derive(Debug, Clone, Default)]
pub struct SkipImagesVisitor;

impl BlockVisitor for SkipImagesVisitor {
    fn visit_image(&mut self, _image: &ImageBlock) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn BlockVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: BlockVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockVisitor for CompositeVisitor {
    fn visit_block(&mut self, block: &Block) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit_block(block);
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visitor_action_default() {
        let action = VisitorAction::default();
        assert!(matches!(action, VisitorAction::Continue));
    }

    #[test]
    fn test_visitor_action_replacement() {
        assert!(VisitorAction::Continue.replacement().is_none());
        assert!(VisitorAction::Skip.replacement().is_none());
        assert_eq!(
            VisitorAction::Replace("hello".into()).replacement(),
            Some("hello")
        );
    }

    #[test]
    fn test_default_visitor() {
        let mut visitor = DefaultVisitor::new();
        let block = Block::paragraph(vec![TextSpan::new("x")]);
        assert_eq!(visitor.visit_block(&block), VisitorAction::Continue);
    }

    #[test]
    fn test_skip_images_visitor() {
        let mut visitor = SkipImagesVisitor;
        let block = Block::new(BlockKind::Image(ImageBlock::external("https://x/y.png")));
        assert!(visitor.visit_block(&block).should_skip());
    }

    #[test]
    fn test_composite_visitor() {
        let mut composite = CompositeVisitor::new()
            .with_visitor(SkipImagesVisitor)
            .with_visitor(DefaultVisitor);

        let image = Block::new(BlockKind::Image(ImageBlock::default()));
        assert!(composite.visit_block(&image).should_skip());

        let para = Block::paragraph(vec![]);
        assert_eq!(composite.visit_block(&para), VisitorAction::Continue);
    }
}
