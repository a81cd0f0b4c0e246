//! Fixed-order rewrite pipeline.

use std::sync::LazyLock;

use crate::callout::callout_pass;
use crate::fence::fenced_code_pass;
use crate::heading::heading_pass;
use crate::inline::{bold_italic_pass, bold_pass, inline_code_pass, italic_pass};
use crate::link::{LinkPasses, external_pass, generic_pass};
use crate::list::list_pass;
use crate::markup::Markup;
use crate::paragraph::{cleanup_pass, paragraph_pass};
use crate::slots::Slots;
use crate::table::table_pass;

/// Default documentation root path.
pub const DEFAULT_DOCS_ROOT: &str = "/docs";

static DEFAULT_RENDERER: LazyLock<Renderer> = LazyLock::new(Renderer::default);

/// One stage of the rendering pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pass {
    Callout,
    Table,
    FencedCode,
    InlineCode,
    BoldItalic,
    Bold,
    Italic,
    InternalLink,
    ExternalLink,
    GenericLink,
    Heading,
    List,
    Paragraph,
    Cleanup,
}

/// The passes in the order they run.
///
/// Reordering changes output: italic before bold breaks `**x**`, and the
/// generic link pass before the internal one loses the internal marker.
pub const PIPELINE: [Pass; 14] = [
    Pass::Callout,
    Pass::Table,
    Pass::FencedCode,
    Pass::InlineCode,
    Pass::BoldItalic,
    Pass::Bold,
    Pass::Italic,
    Pass::InternalLink,
    Pass::ExternalLink,
    Pass::GenericLink,
    Pass::Heading,
    Pass::List,
    Pass::Paragraph,
    Pass::Cleanup,
];

/// Renderer settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RendererConfig {
    /// Path prefix that marks a link as internal.
    pub docs_root: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            docs_root: DEFAULT_DOCS_ROOT.to_owned(),
        }
    }
}

impl RendererConfig {
    #[must_use]
    pub fn new(docs_root: impl Into<String>) -> Self {
        Self {
            docs_root: docs_root.into(),
        }
    }
}

/// Result of rendering one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered markup.
    pub markup: Markup,
    /// Constructs that degraded to literal text.
    pub warnings: Vec<String>,
}

/// Per-call scratch state threaded through the passes.
#[derive(Debug, Default)]
struct RenderState {
    slots: Slots,
    warnings: Vec<String>,
}

impl RenderState {
    fn warn(&mut self, count: usize, what: &str) {
        match count {
            0 => {}
            1 => self.warnings.push(format!("{what} left as literal text")),
            n => self.warnings.push(format!("{what} left as literal text ({n} occurrences)")),
        }
    }
}

/// Markdown-subset renderer.
///
/// Stateless between calls and `Send + Sync`, so one instance can be shared
/// across threads.
///
/// # Example
///
/// ```
/// use ink_renderer::{Renderer, RendererConfig};
///
/// let renderer = Renderer::new(RendererConfig::new("/help"));
/// let result = renderer.render_document("See [faq](/help/faq.md).");
/// assert_eq!(result.markup.internal_paths(), vec!["/help/faq"]);
/// assert!(result.warnings.is_empty());
/// ```
#[derive(Debug)]
pub struct Renderer {
    config: RendererConfig,
    links: LinkPasses,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

impl Renderer {
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        let links = LinkPasses::new(&config.docs_root);
        Self { config, links }
    }

    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Render a document and collect warnings about degraded constructs.
    #[must_use]
    pub fn render_document(&self, content: &str) -> RenderResult {
        let mut state = RenderState::default();
        let mut text = normalize_line_endings(content);
        for pass in PIPELINE {
            text = self.apply(pass, &text, &mut state);
        }
        RenderResult {
            markup: Markup::new(state.slots.restore(&text)),
            warnings: state.warnings,
        }
    }

    /// Render a document, discarding warnings.
    #[must_use]
    pub fn render(&self, content: &str) -> Markup {
        self.render_document(content).markup
    }

    fn apply(&self, pass: Pass, text: &str, state: &mut RenderState) -> String {
        match pass {
            Pass::Callout => {
                let (out, unclosed) = callout_pass(text, &mut state.slots);
                state.warn(unclosed, "unclosed callout");
                out
            }
            Pass::Table => {
                let (out, bodyless) = table_pass(text, &mut state.slots);
                state.warn(bodyless, "table separator without body rows");
                out
            }
            Pass::FencedCode => {
                let (out, unterminated) = fenced_code_pass(text, &mut state.slots);
                state.warn(unterminated, "unterminated code fence");
                out
            }
            Pass::InlineCode => inline_code_pass(text, &mut state.slots),
            Pass::BoldItalic => bold_italic_pass(text),
            Pass::Bold => bold_pass(text),
            Pass::Italic => italic_pass(text),
            Pass::InternalLink => self.links.internal_pass(text),
            Pass::ExternalLink => external_pass(text),
            Pass::GenericLink => generic_pass(text),
            Pass::Heading => heading_pass(text),
            Pass::List => list_pass(text),
            Pass::Paragraph => paragraph_pass(text),
            Pass::Cleanup => cleanup_pass(text),
        }
    }
}

/// Render with the default documentation root (`/docs`).
///
/// # Example
///
/// ```
/// assert_eq!(ink_renderer::render("Hello, world.").as_str(), "<p>Hello, world.</p>");
/// ```
#[must_use]
pub fn render(content: &str) -> Markup {
    DEFAULT_RENDERER.render(content)
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}
