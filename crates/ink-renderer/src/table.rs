//! Pipe tables.
//!
//! A table is a header row, a separator row of dashes and colons, and at
//! least one body row. Cell content gets its inline formatting here, because
//! the finished table is parked in a slot and no later pass sees it.
//!
//! Header cells get bold/italic only. Body cells also get inline code and
//! links, all links in the external form. The two sets differ on purpose.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::fence::{fenced_ranges, inside_fence};
use crate::inline::{code_span, emphasis, map_outside_code};
use crate::link::generic_pass;
use crate::slots::Slots;

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^([ \t]*\|.*\|)[ \t]*\n([ \t]*\|[ \t:|-]*-[ \t:|-]*\|)[ \t]*\n((?:[ \t]*\|.*\|[ \t]*(?:\n|\z))+)",
    )
    .unwrap()
});

static BODYLESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\|.*\|[ \t]*\n[ \t]*\|[ \t:|-]*-[ \t:|-]*\|[ \t]*$").unwrap()
});

/// Column alignment from the separator row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Align {
    None,
    Left,
    Center,
    Right,
}

impl Align {
    fn from_separator(cell: &str) -> Self {
        let cell = cell.trim();
        match (cell.starts_with(':'), cell.len() > 1 && cell.ends_with(':')) {
            (true, true) => Self::Center,
            (true, false) => Self::Left,
            (false, true) => Self::Right,
            (false, false) => Self::None,
        }
    }

    fn style_attr(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Left => r#" style="text-align: left""#,
            Self::Center => r#" style="text-align: center""#,
            Self::Right => r#" style="text-align: right""#,
        }
    }
}

/// Split a row into trimmed cells.
///
/// Only the empty cells produced by the leading and trailing pipe are
/// dropped; empty cells in the middle are kept.
fn split_cells(row: &str) -> Vec<&str> {
    let row = row.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    row.split('|').map(str::trim).collect()
}

fn header_cell(text: &str) -> String {
    emphasis(text)
}

fn body_cell(text: &str) -> String {
    map_outside_code(text, |plain| generic_pass(&emphasis(plain)), code_span)
}

fn render_table(header: &str, separator: &str, body: &str) -> String {
    let aligns: Vec<Align> = split_cells(separator)
        .into_iter()
        .map(Align::from_separator)
        .collect();
    let align_at = |idx: usize| aligns.get(idx).copied().unwrap_or(Align::None);

    let mut out = String::from("<table>\n<thead>\n<tr>");
    for (idx, cell) in split_cells(header).into_iter().enumerate() {
        write!(out, "<th{}>{}</th>", align_at(idx).style_attr(), header_cell(cell)).unwrap();
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in body.lines().filter(|l| !l.trim().is_empty()) {
        out.push_str("<tr>");
        for (idx, cell) in split_cells(row).into_iter().enumerate() {
            write!(out, "<td{}>{}</td>", align_at(idx).style_attr(), body_cell(cell)).unwrap();
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>");
    out
}

/// Replace pipe tables with slotted `<table>` markup.
///
/// Tables starting inside a closed code fence are left alone. Returns the
/// rewritten text and the number of header/separator pairs with no body row.
pub(crate) fn table_pass(text: &str, slots: &mut Slots) -> (String, usize) {
    let fences = fenced_ranges(text);
    let out = TABLE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let start = caps.get(0).map_or(0, |m| m.start());
            if inside_fence(&fences, start) {
                return caps[0].to_owned();
            }
            slots.block(render_table(&caps[1], &caps[2], &caps[3]))
        })
        .into_owned();

    let fences = fenced_ranges(&out);
    let bodyless = BODYLESS_RE
        .find_iter(&out)
        .filter(|m| !inside_fence(&fences, m.start()))
        .count();
    (out, bodyless)
}
