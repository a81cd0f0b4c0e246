//! Fenced code blocks.
//!
//! A fence opens with a line of three backticks and an optional language tag
//! and closes at the next line holding only three backticks. An opener with
//! no closer anywhere after it is not a fence: it stays literal text and the
//! lines after it parse normally.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::markup::escape_html;
use crate::slots::{Slots, between_blocks};

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^```([A-Za-z0-9_+#.-]*)[ \t]*\n((?s:.*?))^```[ \t]*$").unwrap()
});

static OPENER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^```").unwrap());

/// Byte ranges of every closed fence in `text`.
///
/// Used by the passes that run before fences are resolved, so that `:::` or
/// `|` lines inside a code sample are left alone. A fence never spans a block
/// placeholder.
pub(crate) fn fenced_ranges(text: &str) -> Vec<Range<usize>> {
    between_blocks(text)
        .into_iter()
        .flat_map(|gap| {
            FENCE_RE
                .find_iter(&text[gap.clone()])
                .map(move |m| gap.start + m.start()..gap.start + m.end())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Whether `pos` falls strictly inside one of `ranges`.
pub(crate) fn inside_fence(ranges: &[Range<usize>], pos: usize) -> bool {
    ranges.iter().any(|r| r.start < pos && pos < r.end)
}

/// Replace closed fences with preformatted blocks.
///
/// Block placeholders already in `text` bound the search, so a fence cannot
/// swallow a callout frame or table. Returns the rewritten text and the
/// number of unterminated openers left behind as literal text.
pub(crate) fn fenced_code_pass(text: &str, slots: &mut Slots) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for gap in between_blocks(text) {
        out.push_str(&text[last..gap.start]);
        let rendered = FENCE_RE.replace_all(&text[gap.clone()], |caps: &Captures<'_>| {
            let lang = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());
            let body = body.strip_suffix('\n').unwrap_or(body);
            slots.block(code_block(lang, body))
        });
        out.push_str(&rendered);
        last = gap.end;
    }
    let unterminated = OPENER_RE.find_iter(&out).count();
    (out, unterminated)
}

fn code_block(lang: &str, content: &str) -> String {
    if lang.is_empty() {
        format!("<pre><code>{}</code></pre>", escape_html(content))
    } else {
        format!(
            r#"<pre data-language="{lang}"><code class="language-{lang}">{}</code></pre>"#,
            escape_html(content)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(text: &str) -> (String, usize) {
        let mut slots = Slots::new();
        let (out, unterminated) = fenced_code_pass(text, &mut slots);
        (slots.restore(&out).trim().to_owned(), unterminated)
    }

    #[test]
    fn test_code_block_with_language() {
        let (out, unterminated) = run("```rust\nfn main() {}\n```");
        assert_eq!(
            out,
            r#"<pre data-language="rust"><code class="language-rust">fn main() {}</code></pre>"#
        );
        assert_eq!(unterminated, 0);
    }

    #[test]
    fn test_code_block_without_language() {
        let (out, _) = run("```\nplain code\n```");
        assert_eq!(out, "<pre><code>plain code</code></pre>");
    }

    #[test]
    fn test_empty_code_block() {
        let (out, _) = run("```\n```");
        assert_eq!(out, "<pre><code></code></pre>");
    }

    #[test]
    fn test_content_is_escaped_and_kept_verbatim() {
        let (out, _) = run("```html\n<b>*x*</b>\n\n`y`\n```");
        assert_eq!(
            out,
            "<pre data-language=\"html\"><code class=\"language-html\">&lt;b&gt;*x*&lt;/b&gt;\n\n`y`</code></pre>"
        );
    }

    #[test]
    fn test_first_closer_ends_block() {
        let (out, _) = run("```\na\n```\nbetween\n```\nb\n```");
        assert_eq!(out.matches("<pre>").count(), 2);
        assert!(out.contains("between"));
    }

    #[test]
    fn test_language_line_is_not_a_closer() {
        let (out, _) = run("```\na\n```py\nb\n```");
        assert_eq!(out, "<pre><code>a\n```py\nb</code></pre>");
    }

    #[test]
    fn test_unterminated_opener_left_literal() {
        let (out, unterminated) = run("```rust\nfn main() {}\n## Heading");
        assert_eq!(out, "```rust\nfn main() {}\n## Heading");
        assert_eq!(unterminated, 1);
    }

    #[test]
    fn test_fence_does_not_span_block_placeholder() {
        let mut slots = Slots::new();
        let frame = slots.block("<div>");
        let text = format!("```\na{frame}```\nb\n```");

        let (out, unterminated) = fenced_code_pass(&text, &mut slots);
        let out = slots.restore(&out);

        assert!(out.starts_with("```\na\n\n<div>\n\n"));
        assert!(out.contains("<pre><code>b</code></pre>"));
        assert!(!out.contains("&lt;"));
        assert_eq!(unterminated, 1);
        assert_eq!(fenced_ranges(&text).len(), 1);
    }

    #[test]
    fn test_fenced_ranges_and_inside() {
        let text = "a\n```\n:::info\n```\nb";
        let ranges = fenced_ranges(text);
        assert_eq!(ranges.len(), 1);
        let pos = text.find(":::").unwrap();
        assert!(inside_fence(&ranges, pos));
        assert!(!inside_fence(&ranges, 0));
        assert!(!inside_fence(&ranges, ranges[0].start));
    }
}
