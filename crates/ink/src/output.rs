//! Colored terminal output utilities.

use std::path::Path;

use console::{Style, Term};
use ink_site::{BrokenLink, BuildReport, Locale, NAV_LINK_SOURCE};

/// Terminal output formatter. Everything goes to stderr; stdout is reserved
/// for rendered markup.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a secondary detail line (dimmed).
    pub(crate) fn detail(&self, msg: &str) {
        let _ = self.term.write_line(&self.dim.apply_to(msg).to_string());
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print renderer warnings, one per line.
    pub(crate) fn render_warnings(&self, warnings: &[String]) {
        for warning in warnings {
            self.warning(&format!("Warning: {warning}"));
        }
    }

    /// Print the outcome of a site build.
    ///
    /// Broken links are always shown; renderer warnings only when asked.
    pub(crate) fn build_report(
        &self,
        report: &BuildReport,
        locale: Locale,
        out_dir: &Path,
        show_warnings: bool,
    ) {
        if show_warnings {
            self.render_warnings(&report.warnings);
        }
        for link in &report.broken_links {
            self.warning(&broken_link_line(link));
        }
        if let Some(path) = &report.not_found {
            self.detail(&format!("Not-found page: {}", path.display()));
        }
        self.success(&summary_line(report, locale, out_dir));
    }
}

fn broken_link_line(link: &BrokenLink) -> String {
    if link.page == NAV_LINK_SOURCE {
        format!("Broken link in navigation: {}", link.target)
    } else {
        format!("Broken link in {}: {}", link.page, link.target)
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn summary_line(report: &BuildReport, locale: Locale, out_dir: &Path) -> String {
    let mut line = format!(
        "Built {} ({locale}) to {}",
        plural(report.written.len(), "page"),
        out_dir.display()
    );
    if !report.broken_links.is_empty() {
        line.push_str(&format!(", {}", plural(report.broken_links.len(), "broken link")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_broken_link_line() {
        let in_page = BrokenLink {
            page: "sdk/python".to_owned(),
            target: "/docs/gone".to_owned(),
        };
        let in_nav = BrokenLink {
            page: NAV_LINK_SOURCE.to_owned(),
            target: "/docs/missing".to_owned(),
        };
        assert_eq!(broken_link_line(&in_page), "Broken link in sdk/python: /docs/gone");
        assert_eq!(broken_link_line(&in_nav), "Broken link in navigation: /docs/missing");
    }

    #[test]
    fn test_summary_line() {
        let mut report = BuildReport {
            written: vec![PathBuf::from("out/index.html")],
            ..BuildReport::default()
        };
        assert_eq!(
            summary_line(&report, Locale::Zh, Path::new("out")),
            "Built 1 page (zh) to out"
        );

        report.written.push(PathBuf::from("out/faq.html"));
        report.broken_links = vec![
            BrokenLink {
                page: "faq".to_owned(),
                target: "/docs/a".to_owned(),
            },
            BrokenLink {
                page: "faq".to_owned(),
                target: "/docs/b".to_owned(),
            },
        ];
        assert_eq!(
            summary_line(&report, Locale::En, Path::new("out")),
            "Built 2 pages (en) to out, 2 broken links"
        );
    }
}
