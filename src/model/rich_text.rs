//! Rich text spans.

use serde::{Deserialize, Serialize};

use super::null_default;

/// A run of text with independent style flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSpan")]
pub struct TextSpan {
    /// The unstyled text content
    pub plain_text: String,

    /// Style flags and color
    pub annotations: Annotations,
}

impl TextSpan {
    /// Create a new span with default annotations.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            annotations: Annotations::default(),
        }
    }

    /// Create a bold span.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text).with_annotations(Annotations {
            bold: true,
            ..Default::default()
        })
    }

    /// Create an italic span.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text).with_annotations(Annotations {
            italic: true,
            ..Default::default()
        })
    }

    /// Create an inline code span.
    pub fn code(text: impl Into<String>) -> Self {
        Self::new(text).with_annotations(Annotations {
            code: true,
            ..Default::default()
        })
    }

    /// Replace the annotations of this span.
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Check if this span is empty.
    pub fn is_empty(&self) -> bool {
        self.plain_text.is_empty()
    }
}

/// Style annotations attached to a span.
///
/// `underline` and `color` are carried for completeness but have no Markdown
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    /// Bold text
    #[serde(deserialize_with = "null_default")]
    pub bold: bool,

    /// Italic text
    #[serde(deserialize_with = "null_default")]
    pub italic: bool,

    /// Strikethrough text
    #[serde(deserialize_with = "null_default")]
    pub strikethrough: bool,

    /// Underlined text
    #[serde(deserialize_with = "null_default")]
    pub underline: bool,

    /// Inline code
    #[serde(deserialize_with = "null_default")]
    pub code: bool,

    /// Color name (e.g., "default", "red", "blue_background")
    #[serde(deserialize_with = "null_default")]
    pub color: String,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: "default".to_string(),
        }
    }
}

impl Annotations {
    /// Check if any Markdown-visible styling is applied.
    pub fn has_markup(&self) -> bool {
        self.bold || self.italic || self.strikethrough || self.code
    }
}

/// Wire shape of a span. `plain_text` wins; `text.content` is the fallback.
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawSpan {
    #[serde(deserialize_with = "null_default")]
    plain_text: Option<String>,
    #[serde(deserialize_with = "null_default")]
    text: Option<RawTextContent>,
    #[serde(deserialize_with = "null_default")]
    annotations: Annotations,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawTextContent {
    #[serde(deserialize_with = "null_default")]
    content: String,
}

impl From<RawSpan> for TextSpan {
    fn from(raw: RawSpan) -> Self {
        let plain_text = raw
            .plain_text
            .or_else(|| raw.text.map(|t| t.content))
            .unwrap_or_default();

        Self {
            plain_text,
            annotations: raw.annotations,
        }
    }
}
