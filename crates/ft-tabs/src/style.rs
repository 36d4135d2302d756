//! Build-wide stylesheet generation.
//!
//! Panel visibility is driven purely by CSS: for each tab index a rule shows
//! the panel whose radio input is checked. The rules use the child combinator
//! (`>`) so a group never toggles panels of a group nested inside it.

use std::fmt::Write;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use regex::Regex;

use crate::HARD_CAP;

/// Highlight color used when none is configured.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#007bff";

/// Output filename of the generated stylesheet.
pub const THEME_FILENAME: &str = "filter_tabs_theme.css";

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?[a-zA-Z0-9\s,().%]+$").unwrap());

/// Check that a color value cannot break out of its CSS declaration.
#[must_use]
pub fn is_safe_color(color: &str) -> bool {
    COLOR_RE.is_match(color) && !color.contains(';') && !color.contains('}')
}

/// Maximum tab count observed across every group resolved in a build.
///
/// Shared by all concurrently resolved documents; read once by
/// [`Stylesheet::emit`] after resolution has finished.
#[derive(Debug, Default)]
pub struct StyleState {
    max_slots: AtomicUsize,
}

impl StyleState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved group's tab count.
    pub fn observe(&self, slot_count: usize) {
        self.max_slots.fetch_max(slot_count, Ordering::Relaxed);
    }

    /// Largest tab count observed so far.
    #[must_use]
    pub fn max_slots(&self) -> usize {
        self.max_slots.load(Ordering::Relaxed)
    }
}

/// Generated theme stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    /// Highlight color written to the `--sft-highlight-color` property.
    pub color: String,
    /// Number of tab indices with a visibility rule.
    pub rule_count: usize,
    /// Stylesheet text.
    pub css: String,
}

impl Stylesheet {
    /// Emit the stylesheet for everything observed in `state`.
    ///
    /// Rules are generated for indices `0..min(max_slots, HARD_CAP)`. With no
    /// observed groups only the header and color variable are written. An
    /// unsafe color is replaced by [`DEFAULT_HIGHLIGHT_COLOR`].
    #[must_use]
    pub fn emit(state: &StyleState, color: &str) -> Self {
        let color = if is_safe_color(color) {
            color
        } else {
            tracing::warn!(
                color,
                "filter-tabs: invalid highlight color, reverting to {DEFAULT_HIGHLIGHT_COLOR}"
            );
            DEFAULT_HIGHLIGHT_COLOR
        };
        let rule_count = state.max_slots().min(HARD_CAP);

        let mut css = String::new();
        css.push_str("/* filter-tabs: generated theme, do not edit by hand */\n");
        let _ = writeln!(css, ":root {{ --sft-highlight-color: {color}; }}");

        if rule_count > 0 {
            let selectors: Vec<String> = (0..rule_count).map(panel_selector).collect();
            css.push('\n');
            css.push_str("/* Panel visibility, scoped with the child combinator (>) */\n");
            css.push_str(&selectors.join(",\n"));
            css.push_str(" {\n    display: block;\n}\n");
        }

        Self {
            color: color.to_owned(),
            rule_count,
            css,
        }
    }
}

/// Selector showing the panel at `index` when its radio input is checked.
fn panel_selector(index: usize) -> String {
    format!(
        ".sft-radio-group input[type=\"radio\"][data-tab-index=\"{index}\"]:checked \
         ~ .sft-content > .sft-panel[data-tab-index=\"{index}\"]"
    )
}
