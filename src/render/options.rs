//! Rendering options and configuration.

/// Options for rendering block content.
///
/// Built once with the `with_*` methods and passed by reference; rendering
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render nested child blocks after their parent
    pub include_children: bool,

    /// Number ordered list items 1, 2, 3, ... instead of always "1."
    pub numbered_lists: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable rendering of nested blocks.
    pub fn with_children(mut self, include: bool) -> Self {
        self.include_children = include;
        self
    }

    /// Enable or disable running ordinals for numbered list items.
    ///
    /// Disabled by default: every item renders as `1.` and ordinal numbering is
    /// left to the downstream Markdown renderer.
    pub fn with_numbered_lists(mut self, enable: bool) -> Self {
        self.numbered_lists = enable;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_children: true,
            numbered_lists: false,
        }
    }
}
