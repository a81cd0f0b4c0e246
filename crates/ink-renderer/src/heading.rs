//! ATX headings, three levels.

use std::sync::LazyLock;

use regex::Regex;

static H3_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^###[ \t]+(.+?)[ \t]*$").unwrap());
static H2_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##[ \t]+(.+?)[ \t]*$").unwrap());
static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+?)[ \t]*$").unwrap());

/// Replace heading lines, deepest level first.
///
/// `###` has to go before `##` and `#`, since the shorter markers would
/// otherwise match the start of the longer ones. Each heading becomes a
/// block of its own.
pub(crate) fn heading_pass(text: &str) -> String {
    let text = H3_RE.replace_all(text, "\n\n<h3>${1}</h3>\n\n");
    let text = H2_RE.replace_all(&text, "\n\n<h2>${1}</h2>\n\n");
    H1_RE.replace_all(&text, "\n\n<h1>${1}</h1>\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_three_levels() {
        let out = heading_pass("# One\n## Two\n### Three");
        let blocks: Vec<&str> = out.split("\n\n").map(str::trim).filter(|b| !b.is_empty()).collect();
        assert_eq!(blocks, vec!["<h1>One</h1>", "<h2>Two</h2>", "<h3>Three</h3>"]);
    }

    #[test]
    fn test_marker_needs_space() {
        assert_eq!(heading_pass("#hashtag"), "#hashtag");
    }

    #[test]
    fn test_four_hashes_not_a_heading_level() {
        assert_eq!(heading_pass("#### Deep").trim(), "#### Deep");
    }

    #[test]
    fn test_heading_not_mid_line() {
        assert_eq!(heading_pass("issue ## 4"), "issue ## 4");
    }

    #[test]
    fn test_trailing_space_trimmed() {
        assert_eq!(heading_pass("## Setup  ").trim(), "<h2>Setup</h2>");
    }
}
