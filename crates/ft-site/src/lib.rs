//! Static site builder for filter-tabs documents.
//!
//! Walks a source directory for markdown files, resolves every tab group for
//! the configured output format and writes the result, together with the
//! widget and theme stylesheets for HTML builds:
//!
//! ```text
//! _build/
//!   index.html
//!   guide/install.html
//!   _static/filter_tabs.css
//!   _static/filter_tabs_theme.css
//! ```

mod builder;
mod page;
mod scanner;

pub use builder::{BuildError, BuildReport, PageReport, SiteBuilder};
pub use page::{BASE_CSS_FILENAME, STATIC_DIR};
