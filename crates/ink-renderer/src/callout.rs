//! Callout containers: `:::info`, `:::warning`, `:::tip` ... `:::`.
//!
//! Only the frame is emitted here. The enclosed content goes back into the
//! document stream between the opening and closing frame, so every later pass
//! still processes it.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::fence::{fenced_ranges, inside_fence};
use crate::slots::Slots;

// SVG icons (GitHub Octicons-style, 16x16)
const SVG_INFO: &str = r#"<svg class="callout-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M0 8a8 8 0 1 1 16 0A8 8 0 0 1 0 8Zm8-6.5a6.5 6.5 0 1 0 0 13 6.5 6.5 0 0 0 0-13ZM6.5 7.75A.75.75 0 0 1 7.25 7h1a.75.75 0 0 1 .75.75v2.75h.25a.75.75 0 0 1 0 1.5h-2a.75.75 0 0 1 0-1.5h.25v-2h-.25a.75.75 0 0 1-.75-.75ZM8 6a1 1 0 1 1 0-2 1 1 0 0 1 0 2Z"></path></svg>"#;
const SVG_ALERT: &str = r#"<svg class="callout-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M6.457 1.047c.659-1.234 2.427-1.234 3.086 0l6.082 11.378A1.75 1.75 0 0 1 14.082 15H1.918a1.75 1.75 0 0 1-1.543-2.575Zm1.763.707a.25.25 0 0 0-.44 0L1.698 13.132a.25.25 0 0 0 .22.368h12.164a.25.25 0 0 0 .22-.368Zm.53 3.996v2.5a.75.75 0 0 1-1.5 0v-2.5a.75.75 0 0 1 1.5 0ZM9 11a1 1 0 1 1-2 0 1 1 0 0 1 2 0Z"></path></svg>"#;
const SVG_LIGHTBULB: &str = r#"<svg class="callout-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M8 1.5c-2.363 0-4 1.69-4 3.75 0 .984.424 1.625.984 2.304l.214.253c.223.264.47.556.673.848.284.411.537.896.621 1.49a.75.75 0 0 1-1.484.211c-.04-.282-.163-.547-.37-.847a8.456 8.456 0 0 0-.542-.68c-.084-.1-.173-.205-.268-.32C3.201 7.75 2.5 6.766 2.5 5.25 2.5 2.31 4.863 0 8 0s5.5 2.31 5.5 5.25c0 1.516-.701 2.5-1.328 3.259-.095.115-.184.22-.268.319-.207.245-.383.453-.541.681-.208.3-.33.565-.37.847a.751.751 0 0 1-1.485-.212c.084-.593.337-1.078.621-1.489.203-.292.45-.584.673-.848.075-.088.147-.173.213-.253.561-.679.985-1.32.985-2.304 0-2.06-1.637-3.75-4-3.75ZM5.75 12h4.5a.75.75 0 0 1 0 1.5h-4.5a.75.75 0 0 1 0-1.5ZM6 15.25a.75.75 0 0 1 .75-.75h2.5a.75.75 0 0 1 0 1.5h-2.5a.75.75 0 0 1-.75-.75Z"></path></svg>"#;

static OPENER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^:::[ \t]*(info|warning|tip)[ \t]*$").unwrap());

static CLOSER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^:::[ \t]*$").unwrap());

/// Kind of callout container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CalloutKind {
    Info,
    Warning,
    Tip,
}

impl CalloutKind {
    /// Parse the keyword after `:::`.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "tip" => Some(Self::Tip),
            _ => None,
        }
    }

    /// CSS class suffix and keyword.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Tip => "tip",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Info => SVG_INFO,
            Self::Warning => SVG_ALERT,
            Self::Tip => SVG_LIGHTBULB,
        }
    }

    fn open_html(self) -> String {
        format!(
            r#"<div class="callout callout-{}"><div class="callout-icon-wrap">{}</div><div class="callout-content">"#,
            self.keyword(),
            self.icon()
        )
    }
}

/// Replace callout delimiters with container frames.
///
/// Openers and closers inside a closed code fence are ignored, so a callout
/// may document `:::` syntax in a code sample. The first bare `:::` outside a
/// fence closes the callout; an opener inside an open callout stays literal.
/// Returns the rewritten text and the number of openers left as literal text.
pub(crate) fn callout_pass(text: &str, slots: &mut Slots) -> (String, usize) {
    let fences = fenced_ranges(text);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut unclosed = 0;

    for caps in OPENER_RE.captures_iter(text) {
        let Some(opener) = caps.get(0) else {
            continue;
        };
        if inside_fence(&fences, opener.start()) {
            continue;
        }
        if opener.start() < last {
            unclosed += 1;
            continue;
        }
        let Some(kind) = CalloutKind::from_keyword(&caps[1]) else {
            continue;
        };
        let body_start = (opener.end() + 1).min(text.len());
        let Some(closer) = find_closer(text, body_start, &fences) else {
            unclosed += 1;
            continue;
        };

        let body = &text[body_start..closer.start];
        let body = body.strip_suffix('\n').unwrap_or(body);
        out.push_str(&text[last..opener.start()]);
        out.push_str(&slots.block(kind.open_html()));
        out.push_str(body);
        out.push_str(&slots.block("</div></div>"));
        last = closer.end;
    }
    out.push_str(&text[last..]);
    (out, unclosed)
}

/// First bare `:::` line at or after `from` that is not inside a fence.
fn find_closer(text: &str, from: usize, fences: &[Range<usize>]) -> Option<Range<usize>> {
    CLOSER_RE
        .find_iter(&text[from..])
        .map(|m| from + m.start()..from + m.end())
        .find(|closer| !inside_fence(fences, closer.start))
}
