//! List state machine.
//!
//! Lists are built line by line. Each line is classified as an ordered item,
//! an unordered item, or anything else, and [`transition`] decides which list
//! tags to close and open before the line is emitted. A change of kind closes
//! the current list before opening the next; any other line closes it.

use std::sync::LazyLock;

use regex::Regex;

static ORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\.\s+(.+)$").unwrap());

static UNORDERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*-\s+(.+)$").unwrap());

/// Kind of list container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn state(self) -> ListState {
        match self {
            Self::Ordered => ListState::InOrdered,
            Self::Unordered => ListState::InUnordered,
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            Self::Ordered => "</ol>",
            Self::Unordered => "</ul>",
        }
    }
}

/// Which list, if any, is currently open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum ListState {
    #[default]
    None,
    InOrdered,
    InUnordered,
}

impl ListState {
    fn open_kind(self) -> Option<ListKind> {
        match self {
            Self::None => None,
            Self::InOrdered => Some(ListKind::Ordered),
            Self::InUnordered => Some(ListKind::Unordered),
        }
    }
}

/// Classification of one source line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LineKind {
    Item(ListKind),
    Other,
}

/// Tags to emit before the current line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Emission {
    pub(crate) close: Option<ListKind>,
    pub(crate) open: Option<ListKind>,
}

/// Advance the state machine by one line.
pub(crate) fn transition(state: ListState, line: LineKind) -> (ListState, Emission) {
    match (state.open_kind(), line) {
        (None, LineKind::Other) => (ListState::None, Emission::default()),
        (None, LineKind::Item(kind)) => (
            kind.state(),
            Emission {
                close: None,
                open: Some(kind),
            },
        ),
        (Some(current), LineKind::Item(kind)) if current == kind => (state, Emission::default()),
        (Some(current), LineKind::Item(kind)) => (
            kind.state(),
            Emission {
                close: Some(current),
                open: Some(kind),
            },
        ),
        (Some(current), LineKind::Other) => (
            ListState::None,
            Emission {
                close: Some(current),
                open: None,
            },
        ),
    }
}

/// List to close at end of input.
pub(crate) fn finish(state: ListState) -> Option<ListKind> {
    state.open_kind()
}

/// A parsed list item line.
#[derive(Debug, PartialEq, Eq)]
struct Item<'a> {
    kind: ListKind,
    number: Option<u64>,
    content: &'a str,
}

fn parse_item(line: &str) -> Option<Item<'_>> {
    if let Some(caps) = ORDERED_RE.captures(line) {
        return Some(Item {
            kind: ListKind::Ordered,
            number: caps.get(1).and_then(|m| m.as_str().parse().ok()),
            content: caps.get(2).map_or("", |m| m.as_str().trim_end()),
        });
    }
    UNORDERED_RE.captures(line).map(|caps| Item {
        kind: ListKind::Unordered,
        number: None,
        content: caps.get(1).map_or("", |m| m.as_str().trim_end()),
    })
}

fn open_tag(item: &Item<'_>) -> String {
    match (item.kind, item.number) {
        (ListKind::Ordered, Some(start)) if start != 1 => format!(r#"<ol start="{start}">"#),
        (ListKind::Ordered, _) => "<ol>".to_owned(),
        (ListKind::Unordered, _) => "<ul>".to_owned(),
    }
}

fn push_close(out: &mut Vec<String>, kind: ListKind) {
    out.push(kind.close_tag().to_owned());
    out.push(String::new());
}

/// Group item lines into `<ol>` / `<ul>` containers.
///
/// Every list is surrounded by blank lines so the paragraph pass sees it as a
/// block of its own.
pub(crate) fn list_pass(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut state = ListState::default();

    for line in text.split('\n') {
        let item = parse_item(line);
        let kind = item.as_ref().map_or(LineKind::Other, |i| LineKind::Item(i.kind));
        let (next, emission) = transition(state, kind);

        if let Some(closed) = emission.close {
            push_close(&mut out, closed);
        }
        match item {
            Some(item) => {
                if emission.open.is_some() {
                    out.push(String::new());
                    out.push(open_tag(&item));
                }
                out.push(format!("<li>{}</li>", item.content));
            }
            None => out.push(line.to_owned()),
        }
        state = next;
    }

    if let Some(kind) = finish(state) {
        push_close(&mut out, kind);
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ORDERED: LineKind = LineKind::Item(ListKind::Ordered);
    const UNORDERED: LineKind = LineKind::Item(ListKind::Unordered);

    #[test]
    fn test_transition_from_none() {
        assert_eq!(
            transition(ListState::None, ORDERED),
            (
                ListState::InOrdered,
                Emission {
                    close: None,
                    open: Some(ListKind::Ordered)
                }
            )
        );
        assert_eq!(
            transition(ListState::None, LineKind::Other),
            (ListState::None, Emission::default())
        );
    }

    #[test]
    fn test_transition_same_kind_continues() {
        assert_eq!(
            transition(ListState::InUnordered, UNORDERED),
            (ListState::InUnordered, Emission::default())
        );
    }

    #[test]
    fn test_transition_kind_change_closes_then_opens() {
        assert_eq!(
            transition(ListState::InOrdered, UNORDERED),
            (
                ListState::InUnordered,
                Emission {
                    close: Some(ListKind::Ordered),
                    open: Some(ListKind::Unordered)
                }
            )
        );
    }

    #[test]
    fn test_transition_other_line_closes() {
        assert_eq!(
            transition(ListState::InOrdered, LineKind::Other),
            (
                ListState::None,
                Emission {
                    close: Some(ListKind::Ordered),
                    open: None
                }
            )
        );
    }

    #[test]
    fn test_finish() {
        assert_eq!(finish(ListState::None), None);
        assert_eq!(finish(ListState::InUnordered), Some(ListKind::Unordered));
    }

    #[test]
    fn test_parse_item() {
        assert_eq!(
            parse_item("  3. Third"),
            Some(Item {
                kind: ListKind::Ordered,
                number: Some(3),
                content: "Third"
            })
        );
        assert_eq!(
            parse_item("- point"),
            Some(Item {
                kind: ListKind::Unordered,
                number: None,
                content: "point"
            })
        );
        assert_eq!(parse_item("-no space"), None);
        assert_eq!(parse_item("---"), None);
        assert_eq!(parse_item("2.5 is a number"), None);
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            list_pass("- a\n- b").trim(),
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn test_ordered_start_attribute() {
        assert_eq!(
            list_pass("3. c\n4. d").trim(),
            "<ol start=\"3\">\n<li>c</li>\n<li>d</li>\n</ol>"
        );
        assert!(list_pass("1. a").contains("<ol>"));
    }

    #[test]
    fn test_alternating_kinds_make_three_lists() {
        let out = list_pass("1. a\n- b\n2. c");
        assert_eq!(out.matches("<ol>").count(), 1);
        assert_eq!(out.matches("<ol start=\"2\">").count(), 1);
        assert_eq!(out.matches("<ul>").count(), 1);
        assert_eq!(out.matches("</ol>").count(), 2);
        assert_eq!(out.matches("</ul>").count(), 1);
    }

    #[test]
    fn test_text_line_closes_list() {
        assert_eq!(
            list_pass("- a\nafter"),
            "\n<ul>\n<li>a</li>\n</ul>\n\nafter"
        );
    }

    #[test]
    fn test_list_closed_at_end_of_input() {
        let out = list_pass("intro\n- a");
        assert!(out.ends_with("</ul>\n"));
    }

    #[test]
    fn test_blank_line_splits_list() {
        let out = list_pass("- a\n\n- b");
        assert_eq!(out.matches("<ul>").count(), 2);
    }
}
