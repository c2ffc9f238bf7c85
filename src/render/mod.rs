//! Rendering module for converting blocks to Markdown, text and JSON.

mod blocks;
mod json;
mod options;
mod result;
mod rich_text;
mod text;
pub mod visitor;

pub use blocks::{render_blocks, render_blocks_with_stats, BlockProcessor};
pub use json::{to_json, to_json_all, JsonFormat};
pub use options::RenderOptions;
pub use result::{ExtractionStats, RenderResult};
pub use rich_text::{plain_text, render_rich_text};
pub use text::to_text;
pub use visitor::{BlockVisitor, CompositeVisitor, DefaultVisitor, VisitorAction};
