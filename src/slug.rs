//! URL-safe identifiers derived from titles.

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_-]+").unwrap());
static EDGE_HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-+|-+$").unwrap());

/// Derive a slug from a title.
///
/// Lower-cases and trims the input, deletes anything that is not a word
/// character, whitespace or hyphen, collapses runs of whitespace, underscores
/// and hyphens into a single hyphen, and strips hyphens from both ends.
///
/// Idempotent. Returns an empty string for inputs without word characters.
///
/// # Example
///
/// ```
/// use unnotion::slugify;
///
/// assert_eq!(slugify("My Page"), "my-page");
/// assert_eq!(slugify("  Hello, World! "), "hello-world");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned = DISALLOWED.replace_all(lowered.trim(), "");
    let collapsed = SEPARATORS.replace_all(&cleaned, "-");
    EDGE_HYPHENS.replace_all(&collapsed, "").into_owned()
}
