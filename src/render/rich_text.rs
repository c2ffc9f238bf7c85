//! Inline rendering of rich text spans.

use crate::model::{Annotations, TextSpan};

/// Render spans to inline markup, concatenated in order.
///
/// Each span is wrapped code innermost, then strikethrough, italic, and bold
/// outermost. Underline and color have no markup.
pub fn render_rich_text(spans: &[TextSpan]) -> String {
    let mut output = String::new();
    for span in spans {
        output.push_str(&apply_annotations(&span.plain_text, &span.annotations));
    }
    output
}

/// Concatenate the unstyled text of spans.
pub fn plain_text(spans: &[TextSpan]) -> String {
    spans.iter().map(|s| s.plain_text.as_str()).collect()
}

fn apply_annotations(text: &str, annotations: &Annotations) -> String {
    let mut result = text.to_string();

    // Innermost first
    if annotations.code {
        result = format!("`{}`", result);
    }
    if annotations.strikethrough {
        result = format!("~~{}~~", result);
    }
    if annotations.italic {
        result = format!("*{}*", result);
    }
    if annotations.bold {
        result = format!("**{}**", result);
    }

    result
}
