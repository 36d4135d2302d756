//! Static site builder.
//!
//! Documents are parsed, resolved and written in parallel. The theme
//! stylesheet depends on the largest tab group in the whole build, so it is
//! emitted once after every document has been resolved.

use std::fs;
use std::path::{Path, PathBuf};

use ft_config::Config;
use ft_tabs::directive::{DirectiveError, parse_document};
use ft_tabs::{
    DEFAULT_HIGHLIGHT_COLOR, Resolver, StyleState, Stylesheet, THEME_FILENAME, TargetFormat,
    expand_collapsible, render_html, render_text,
};
use rayon::prelude::*;

use crate::page::{BASE_CSS, BASE_CSS_FILENAME, STATIC_DIR, page_title, render_page};
use crate::scanner::{Scanner, SourceRef};

/// Error returned by the site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of building one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// Document key.
    pub key: String,
    /// Written output file.
    pub output: PathBuf,
    /// Tab groups resolved.
    pub groups: usize,
    /// Tab blocks dropped because of authoring errors.
    pub errors: Vec<DirectiveError>,
    /// Advisory warnings.
    pub warnings: Vec<String>,
}

/// Outcome of a whole build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Per-document reports, sorted by key.
    pub pages: Vec<PageReport>,
    /// Theme stylesheet, written for HTML builds only.
    pub stylesheet: Option<Stylesheet>,
}

impl BuildReport {
    /// Total tab groups resolved.
    #[must_use]
    pub fn groups(&self) -> usize {
        self.pages.iter().map(|p| p.groups).sum()
    }

    /// Total authoring errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.pages.iter().map(|p| p.errors.len()).sum()
    }

    /// Total warnings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.pages.iter().map(|p| p.warnings.len()).sum()
    }
}

/// Builds a site from a directory of markdown sources.
///
/// # Example
///
/// ```no_run
/// use ft_site::SiteBuilder;
/// use ft_tabs::TargetFormat;
///
/// let report = SiteBuilder::new("docs".into(), "_build".into())
///     .with_format(TargetFormat::Text)
///     .build()?;
/// println!("{} pages", report.pages.len());
/// # Ok::<(), ft_site::BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    source_dir: PathBuf,
    output_dir: PathBuf,
    format: TargetFormat,
    highlight_color: String,
    debug: bool,
    collapsible_admonitions: bool,
}

impl SiteBuilder {
    /// Create a builder with default options.
    #[must_use]
    pub fn new(source_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            source_dir,
            output_dir,
            format: TargetFormat::default(),
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_owned(),
            debug: false,
            collapsible_admonitions: true,
        }
    }

    /// Create a builder from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let build = &config.build_resolved;
        Self::new(build.source_dir.clone(), build.output_dir.clone())
            .with_format(build.format)
            .with_highlight_color(config.tabs.highlight_color.clone())
            .with_debug(config.tabs.debug)
            .with_collapsible_admonitions(config.tabs.collapsible_admonitions)
    }

    /// Set the output format.
    #[must_use]
    pub fn with_format(mut self, format: TargetFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the theme highlight color.
    #[must_use]
    pub fn with_highlight_color(mut self, color: String) -> Self {
        self.highlight_color = color;
        self
    }

    /// Log every resolved group at info level.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Render `collapsible` admonitions as `<details>` in HTML output.
    #[must_use]
    pub fn with_collapsible_admonitions(mut self, enabled: bool) -> Self {
        self.collapsible_admonitions = enabled;
        self
    }

    /// Build every document and write the output tree.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::SourceNotFound` if the source directory is
    /// missing, or `BuildError::Io` if a file cannot be read or written.
    /// Authoring errors in documents do not fail the build; they are
    /// collected in the report.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        if !self.source_dir.is_dir() {
            return Err(BuildError::SourceNotFound(self.source_dir.clone()));
        }

        let sources = Scanner::new(self.source_dir.clone()).scan();
        tracing::info!(
            documents = sources.len(),
            format = %self.format,
            "Building site"
        );

        fs::create_dir_all(&self.output_dir)?;
        let styles = StyleState::new();
        let pages = sources
            .par_iter()
            .map(|source| self.build_page(source, &styles))
            .collect::<Result<Vec<_>, BuildError>>()?;

        let stylesheet = if self.format.is_interactive() {
            Some(self.write_styles(&styles)?)
        } else {
            None
        };

        Ok(BuildReport { pages, stylesheet })
    }

    fn build_page(&self, source: &SourceRef, styles: &StyleState) -> Result<PageReport, BuildError> {
        let content = fs::read_to_string(&source.path)?;
        let mut parsed = parse_document(&source.key, &content);

        let mut report = Resolver::new(self.format, styles)
            .with_debug(self.debug)
            .resolve(&mut parsed.document);

        let rendered = if self.format.is_interactive() {
            if self.collapsible_admonitions {
                expand_collapsible(&mut parsed.document);
            }
            let title = page_title(&parsed.document);
            render_page(&source.key, &title, &render_html(&parsed.document))
        } else {
            render_text(&parsed.document)
        };

        let output = self
            .output_dir
            .join(format!("{}.{}", source.key, self.format.extension()));
        write_file(&output, &rendered)?;
        tracing::debug!(
            key = %source.key,
            groups = report.resolved,
            output = %output.display(),
            "Wrote page"
        );

        let mut warnings = parsed.warnings;
        warnings.append(&mut report.warnings);
        Ok(PageReport {
            key: source.key.clone(),
            output,
            groups: report.resolved,
            errors: parsed.errors,
            warnings,
        })
    }

    fn write_styles(&self, styles: &StyleState) -> Result<Stylesheet, BuildError> {
        let static_dir = self.output_dir.join(STATIC_DIR);
        let stylesheet = Stylesheet::emit(styles, &self.highlight_color);

        write_file(&static_dir.join(BASE_CSS_FILENAME), BASE_CSS)?;
        write_file(&static_dir.join(THEME_FILENAME), &stylesheet.css)?;
        tracing::debug!(rules = stylesheet.rule_count, "Wrote theme stylesheet");

        Ok(stylesheet)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
