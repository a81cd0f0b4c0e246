//! Paragraph wrapping and final cleanup.

use std::sync::LazyLock;

use regex::Regex;

/// Elements that already form a block and must not be wrapped.
const BLOCK_TAGS: &str = "h[1-6]|ul|ol|li|pre|div|table|thead|tbody|tr|blockquote|hr|ink-block";

static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

static BLOCK_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^</?(?:{BLOCK_TAGS})\b")).unwrap());

static EMPTY_PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p>\s*</p>").unwrap());

static P_BEFORE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"<p>\s*(</?(?:{BLOCK_TAGS})\b)")).unwrap());

static P_AFTER_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(</(?:{BLOCK_TAGS})>)\s*</p>")).unwrap());

static EXTRA_NEWLINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Split on blank lines and wrap every block that is not already a block
/// element in `<p>`.
pub(crate) fn paragraph_pass(text: &str) -> String {
    BLANK_LINES_RE
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            if BLOCK_START_RE.is_match(block) {
                block.to_owned()
            } else {
                format!("<p>{block}</p>")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove empty paragraphs and paragraph tags hugging a block element.
pub(crate) fn cleanup_pass(html: &str) -> String {
    let html = EMPTY_PARAGRAPH_RE.replace_all(html, "");
    let html = P_BEFORE_BLOCK_RE.replace_all(&html, "${1}");
    let html = P_AFTER_BLOCK_RE.replace_all(&html, "${1}");
    let html = EXTRA_NEWLINES_RE.replace_all(&html, "\n");
    html.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_single_paragraph() {
        assert_eq!(paragraph_pass("just text"), "<p>just text</p>");
    }

    #[test]
    fn test_blank_line_separates_paragraphs() {
        assert_eq!(
            paragraph_pass("one\nline two\n\n  \nthree"),
            "<p>one\nline two</p>\n<p>three</p>"
        );
    }

    #[test]
    fn test_block_elements_not_wrapped() {
        assert_eq!(
            paragraph_pass("<h2>T</h2>\n\n<ul>\n<li>a</li>\n</ul>\n\n<ink-block data-slot=\"0\"></ink-block>"),
            "<h2>T</h2>\n<ul>\n<li>a</li>\n</ul>\n<ink-block data-slot=\"0\"></ink-block>"
        );
    }

    #[test]
    fn test_inline_slot_is_wrapped() {
        let inline = r#"<ink-inline data-slot="0"></ink-inline> tail"#;
        assert_eq!(paragraph_pass(inline), format!("<p>{inline}</p>"));
    }

    #[test]
    fn test_inline_markup_start_is_wrapped() {
        assert_eq!(
            paragraph_pass("<strong>Note</strong> text"),
            "<p><strong>Note</strong> text</p>"
        );
    }

    #[test]
    fn test_cleanup_removes_empty_paragraphs() {
        assert_eq!(cleanup_pass("<p>a</p>\n<p> </p>\n<p>b</p>"), "<p>a</p>\n<p>b</p>");
    }

    #[test]
    fn test_cleanup_unwraps_block_markers() {
        assert_eq!(
            cleanup_pass("<p><div class=\"x\">inner</div></p>"),
            "<div class=\"x\">inner</div>"
        );
    }

    #[test]
    fn test_cleanup_trims() {
        assert_eq!(cleanup_pass("\n\n<p>x</p>\n\n"), "<p>x</p>");
    }
}
