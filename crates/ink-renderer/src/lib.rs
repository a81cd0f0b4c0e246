//! Markdown-subset renderer for documentation sections.
//!
//! Turns one section body into markup through a fixed sequence of rewrite
//! passes (see [`PIPELINE`]). Rendering never fails: unmatched or partial
//! constructs stay literal text, and [`Renderer::render_document`] reports
//! them as warnings.
//!
//! Supported syntax:
//! - callouts: `:::info`, `:::warning`, `:::tip` closed by `:::`
//! - pipe tables with optional column alignment
//! - fenced code blocks with an optional language tag, and inline code
//! - `***bold italic***`, `**bold**`, `*italic*`, `_italic_`
//! - links: internal (under the documentation root), external, generic
//! - `#`, `##`, `###` headings
//! - ordered (`1.`) and unordered (`-`) lists
//!
//! Internal links carry their resolved path in [`INTERNAL_LINK_ATTR`]; the
//! [`router`] module turns activations on them into navigation calls.
//!
//! # Example
//!
//! ```
//! let markup = ink_renderer::render("## Setup\n\nRun `npm install`.");
//! assert_eq!(
//!     markup.as_str(),
//!     "<h2>Setup</h2>\n<p>Run <code>npm install</code>.</p>"
//! );
//! ```

mod callout;
mod fence;
mod heading;
mod inline;
mod link;
mod list;
mod markup;
mod paragraph;
mod renderer;
pub mod router;
mod slots;
mod table;

pub use callout::CalloutKind;
pub use link::{INTERNAL_LINK_ATTR, LinkKind, classify_link, resolve_internal_path};
pub use markup::{Markup, escape_html};
pub use renderer::{
    DEFAULT_DOCS_ROOT, PIPELINE, Pass, RenderResult, Renderer, RendererConfig, render,
};
pub use router::{Activation, ClickRouter, Element, LinkRegion, Routed};
