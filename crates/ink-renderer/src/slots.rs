//! Placeholder slots for already-rendered markup.
//!
//! Passes that emit final markup (code, tables, callout frames) park it in a
//! slot and leave a placeholder element in the document stream. Later passes
//! only ever see the placeholder, so they cannot rewrite characters inside
//! it. [`Slots::restore`] swaps every placeholder back in a single pass.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Tag name of block-level placeholders (treated as a block marker).
pub(crate) const BLOCK_SLOT_TAG: &str = "ink-block";

/// Tag name of inline placeholders (wrapped in paragraphs like plain text).
const INLINE_SLOT_TAG: &str = "ink-inline";

static SLOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<ink-(?:block|inline) data-slot="(\d+)"></ink-(?:block|inline)>"#).unwrap()
});

static BLOCK_SLOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<ink-block data-slot="\d+"></ink-block>"#).unwrap());

/// Byte ranges of `text` between block placeholders.
///
/// Always returns at least one range; the placeholders themselves are the
/// gaps between consecutive ranges.
pub(crate) fn between_blocks(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut last = 0;
    for placeholder in BLOCK_SLOT_RE.find_iter(text) {
        ranges.push(last..placeholder.start());
        last = placeholder.end();
    }
    ranges.push(last..text.len());
    ranges
}

/// Collects rendered fragments and hands out placeholders for them.
///
/// # Example
///
/// ```text
/// slots.block("<pre><code>x</code></pre>")  -> <ink-block data-slot="0"></ink-block>
/// slots.inline("<code>y</code>")            -> <ink-inline data-slot="1"></ink-inline>
/// ```
#[derive(Debug, Default)]
pub(crate) struct Slots {
    items: Vec<String>,
}

impl Slots {
    /// Park a block-level fragment.
    ///
    /// The placeholder is surrounded by blank lines so it always forms a
    /// block of its own.
    pub(crate) fn block(&mut self, html: impl Into<String>) -> String {
        let idx = self.push(html.into());
        format!("\n\n<{BLOCK_SLOT_TAG} data-slot=\"{idx}\"></{BLOCK_SLOT_TAG}>\n\n")
    }

    /// Park an inline fragment.
    pub(crate) fn inline(&mut self, html: impl Into<String>) -> String {
        let idx = self.push(html.into());
        format!("<{INLINE_SLOT_TAG} data-slot=\"{idx}\"></{INLINE_SLOT_TAG}>")
    }

    fn push(&mut self, html: String) -> usize {
        self.items.push(html);
        self.items.len() - 1
    }

    /// Replace every placeholder with its fragment.
    ///
    /// Unknown slot indices are left untouched.
    pub(crate) fn restore(&self, html: &str) -> String {
        if self.items.is_empty() {
            return html.to_owned();
        }
        SLOT_RE
            .replace_all(html, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| self.items.get(idx))
                    .map_or_else(|| caps[0].to_owned(), Clone::clone)
            })
            .into_owned()
    }

    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}
