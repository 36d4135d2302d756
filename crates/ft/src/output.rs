//! Build status and diagnostics on stderr.

use console::{Style, Term};
use ft_site::BuildReport;

/// How a diagnostic line is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Error,
    Warning,
}

/// Writes build progress and per-page diagnostics to the terminal.
pub(crate) struct Output {
    term: Term,
    label: Style,
    page: Style,
    done: Style,
    error: Style,
    warning: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
            page: Style::new().cyan().bold(),
            done: Style::new().green(),
            error: Style::new().red(),
            warning: Style::new().yellow(),
        }
    }

    /// Print one resolved build setting, e.g. `Format: html`.
    pub(crate) fn setting(&self, label: &str, value: impl std::fmt::Display) {
        let label = self.label.apply_to(format!("{label}:"));
        let _ = self.term.write_line(&format!("{label} {value}"));
    }

    pub(crate) fn done(&self, msg: &str) {
        let _ = self.term.write_line(&self.done.apply_to(msg).to_string());
    }

    /// Print a fatal error that aborts the command.
    pub(crate) fn fatal(&self, err: &dyn std::error::Error) {
        let _ = self
            .term
            .write_line(&self.error.apply_to(format!("Error: {err}")).to_string());
    }

    /// Print every page that has errors or warnings, followed by its entries.
    pub(crate) fn diagnostics(&self, report: &BuildReport) {
        for (key, entries) in diagnostic_lines(report) {
            let _ = self.term.write_line(&self.page.apply_to(key).to_string());
            for (severity, line) in entries {
                let style = match severity {
                    Severity::Error => &self.error,
                    Severity::Warning => &self.warning,
                };
                let _ = self
                    .term
                    .write_line(&style.apply_to(format!("  {line}")).to_string());
            }
        }
    }
}

/// Group report entries by page, errors first. Clean pages are skipped.
fn diagnostic_lines(report: &BuildReport) -> Vec<(&str, Vec<(Severity, String)>)> {
    report
        .pages
        .iter()
        .filter(|page| !page.errors.is_empty() || !page.warnings.is_empty())
        .map(|page| {
            let errors = page
                .errors
                .iter()
                .map(|error| (Severity::Error, error.to_string()));
            let warnings = page
                .warnings
                .iter()
                .map(|warning| (Severity::Warning, warning.clone()));
            (page.key.as_str(), errors.chain(warnings).collect())
        })
        .collect()
}
