
use std::sync::LazyLock;

use fancy_regex::Regex;

static COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--[\s\S]*?-->").expect("valid regex"));

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

static ANGLE_ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&lt;|&gt;").expect("valid regex"));

static NON_LETTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\s]").expect("valid regex"));

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Reduce serialized HTML to single-spaced plain text for full-text indexing.
///
/// The passes run in a fixed order: comments go before tags so commented-out
/// markup disappears whole, and tags become a space so text from adjacent
/// elements never fuses into one word. Everything that is not a letter or
/// whitespace is dropped afterwards. Malformed input never fails, it just
/// yields whatever text survives.
#[inline]
pub fn sanitize_text(html: &str) -> String {
    let text = COMMENT_REGEX.replace_all(html, "");
    let text = TAG_REGEX.replace_all(&text, " ");
    let text = ANGLE_ENTITY_REGEX.replace_all(&text, "");
    let text = NON_LETTER_REGEX.replace_all(&text, "");
    let text = WHITESPACE_REGEX.replace_all(&text, " ");
    text.trim().to_string()
}
