//! Format-neutral tabbed content.
//!
//! Tab blocks are parsed into a neutral intermediate tree that carries no
//! format-specific markup. Resolution happens once the target format is
//! known: each [`TabGroup`] is replaced in place with an interactive widget
//! (HTML) or with plain titled sections (every other format).
//!
//! # Architecture
//!
//! - [`directive`]: authoring syntax, parses markdown into a [`Document`]
//! - [`build_group`]: validates a block and produces a [`TabGroup`]
//! - [`Resolver`]: walks a document and resolves every group for a [`TargetFormat`]
//! - [`Stylesheet`]: theme CSS sized by the largest group seen in a build
//! - [`render_html`] / [`render_text`]: serialize resolved documents
//!
//! # Example
//!
//! ```
//! use ft_tabs::directive::parse_document;
//! use ft_tabs::{Resolver, StyleState, TargetFormat, render_html};
//!
//! let source = "::: filter-tabs\n::: tab Python\nprint()\n:::\n::: tab Rust\nprintln!()\n:::\n:::\n";
//! let mut parsed = parse_document("index", source);
//!
//! let styles = StyleState::new();
//! let report = Resolver::new(TargetFormat::Html, &styles).resolve(&mut parsed.document);
//! assert_eq!(report.resolved, 1);
//!
//! let html = render_html(&parsed.document);
//! assert!(html.contains("sft-radio-group"));
//! ```

mod args;
mod builder;
mod capacity;
mod collapsible;
pub mod directive;
mod error;
mod fallback;
mod html;
mod ids;
mod interactive;
mod legend;
mod markdown;
mod node;
mod resolver;
mod style;
mod text;

pub use args::TabArgument;
pub use builder::{GroupBuild, build_group};
pub use capacity::{Capacity, HARD_CAP, WARN_THRESHOLD};
pub use collapsible::{DEFAULT_SUMMARY, expand_collapsible};
pub use error::TabsError;
pub use fallback::render_fallback;
pub use html::{escape_html, nodes_to_html, render_html};
pub use ids::{IdNamespace, ResolutionContext};
pub use interactive::{GENERAL_FILTER, render_interactive};
pub use legend::{FALLBACK_CONTENT_TYPE, infer_content_type, infer_legend};
pub use markdown::{parse_markdown, parser_options};
pub use node::{
    Attrs, Document, Element, Node, PanelKind, ResolvedPanel, ResolvedSelector, Section, TabGroup,
    TabSlot, TabsWidget,
};
pub use resolver::{ResolveReport, Resolver, TargetFormat};
pub use style::{DEFAULT_HIGHLIGHT_COLOR, StyleState, Stylesheet, THEME_FILENAME, is_safe_color};
pub use text::render_text;
