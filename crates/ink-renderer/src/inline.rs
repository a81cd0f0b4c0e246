//! Inline code and emphasis.
//!
//! Emphasis runs in three passes whose order matters: combined bold+italic
//! first, then bold, then italic. Running italic first would eat one marker
//! out of every `**` and `***` run.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::markup::escape_html;
use crate::slots::Slots;

static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

static BOLD_ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\*\*\*(\S(?:.*?\S)?)\*\*\*|\*\*_(\S(?:[^_\n]*?\S)?)_\*\*|_\*\*(\S(?:[^*\n]*?\S)?)\*\*_",
    )
    .unwrap()
});

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(\S(?:.*?\S)?)\*\*").unwrap());

static ITALIC_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(\S(?:[^*\n]*?\S)?)\*").unwrap());

// `\b` before the opening underscore keeps snake_case identifiers intact.
static ITALIC_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b_(\S(?:[^_\n]*?\S)?)_\b").unwrap());

/// Render the content of an inline code span.
pub(crate) fn code_span(content: &str) -> String {
    format!("<code>{}</code>", escape_html(content))
}

/// Replace inline code spans with slotted `<code>` elements.
pub(crate) fn inline_code_pass(text: &str, slots: &mut Slots) -> String {
    INLINE_CODE_RE
        .replace_all(text, |caps: &Captures<'_>| slots.inline(code_span(&caps[1])))
        .into_owned()
}

/// `***x***`, `**_x_**` and `_**x**_`.
pub(crate) fn bold_italic_pass(text: &str) -> String {
    BOLD_ITALIC_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let inner = (1..=3)
                .find_map(|i| caps.get(i))
                .map_or("", |m| m.as_str());
            format!("<strong><em>{inner}</em></strong>")
        })
        .into_owned()
}

/// `**x**`.
pub(crate) fn bold_pass(text: &str) -> String {
    BOLD_RE
        .replace_all(text, "<strong>${1}</strong>")
        .into_owned()
}

/// `*x*` and `_x_`.
pub(crate) fn italic_pass(text: &str) -> String {
    let starred = ITALIC_STAR_RE.replace_all(text, "<em>${1}</em>");
    ITALIC_UNDERSCORE_RE
        .replace_all(&starred, "<em>${1}</em>")
        .into_owned()
}

/// All three emphasis passes in their fixed order.
pub(crate) fn emphasis(text: &str) -> String {
    italic_pass(&bold_pass(&bold_italic_pass(text)))
}

/// Split `text` around inline code spans.
///
/// Calls `plain` for text outside code spans and `code` for the content of
/// each span, concatenating the results. Used where code must stay opaque to
/// other inline rewrites without going through slots.
pub(crate) fn map_outside_code(
    text: &str,
    mut plain: impl FnMut(&str) -> String,
    mut code: impl FnMut(&str) -> String,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in INLINE_CODE_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&plain(&text[last..whole.start()]));
        out.push_str(&code(&caps[1]));
        last = whole.end();
    }
    out.push_str(&plain(&text[last..]));
    out
}
