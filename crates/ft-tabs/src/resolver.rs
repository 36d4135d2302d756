//! Write-time resolution of neutral tab groups.
//!
//! The resolver walks a finished document, visits every [`Node::TabGroup`]
//! exactly once and replaces it in place with output for the target format.

use std::fmt;
use std::str::FromStr;

use crate::{
    Capacity, Document, HARD_CAP, IdNamespace, Node, ResolutionContext, StyleState, TabGroup,
    WARN_THRESHOLD, infer_legend, render_fallback, render_interactive,
};

/// Output format a document is being resolved for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    /// Interactive HTML with radio selectors.
    #[default]
    Html,
    /// Plain text: every tab rendered as a titled section.
    Text,
}

impl TargetFormat {
    /// Whether groups render as interactive widgets in this format.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Html)
    }

    /// Output file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Text => "txt",
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => f.write_str("html"),
            Self::Text => f.write_str("text"),
        }
    }
}

impl FromStr for TargetFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "text" | "txt" => Ok(Self::Text),
            other => Err(format!("unknown output format '{other}' (expected html or text)")),
        }
    }
}

/// Outcome of resolving one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Groups replaced with rendered output.
    pub resolved: usize,
    /// Malformed groups and stray tabs removed from the tree.
    pub rejected: usize,
    /// Largest tab count among resolved groups.
    pub max_slots: usize,
    /// Capacity problems found while resolving, for display to the author.
    pub warnings: Vec<String>,
}

/// Replaces neutral tab groups with format-specific output.
///
/// # Example
///
/// ```
/// use ft_tabs::{Document, Node, Resolver, StyleState, TabGroup, TabSlot, TargetFormat};
///
/// let group = TabGroup {
///     slots: vec![TabSlot::new("Python", vec![Node::text("pip install")])],
///     ..Default::default()
/// };
/// let mut doc = Document::new("index", vec![Node::TabGroup(group)]);
///
/// let styles = StyleState::new();
/// let report = Resolver::new(TargetFormat::Html, &styles).resolve(&mut doc);
///
/// assert_eq!(report.resolved, 1);
/// assert!(matches!(doc.children[0], Node::Tabs(_)));
/// assert_eq!(styles.max_slots(), 1);
/// ```
#[derive(Debug)]
pub struct Resolver<'a> {
    format: TargetFormat,
    styles: &'a StyleState,
    debug: bool,
}

impl<'a> Resolver<'a> {
    /// Create a resolver for `format` that records group sizes in `styles`.
    #[must_use]
    pub fn new(format: TargetFormat, styles: &'a StyleState) -> Self {
        Self {
            format,
            styles,
            debug: false,
        }
    }

    /// Log every resolved group at info level.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Resolve every tab group in `doc` in place.
    ///
    /// Groups are numbered in document order, an outer group before the
    /// groups nested inside it.
    pub fn resolve(&self, doc: &mut Document) -> ResolveReport {
        let mut ctx = ResolutionContext::new(&doc.key);
        let mut report = ResolveReport::default();
        self.resolve_nodes(&mut doc.children, &doc.key, &mut ctx, &mut report);
        report
    }

    fn resolve_nodes(
        &self,
        nodes: &mut Vec<Node>,
        key: &str,
        ctx: &mut ResolutionContext,
        report: &mut ResolveReport,
    ) {
        for node in std::mem::take(nodes) {
            match node {
                Node::TabGroup(mut group) => {
                    if let Err(reason) = validate(&group) {
                        tracing::error!(document = key, "filter-tabs: {reason}");
                        report.rejected += 1;
                        continue;
                    }

                    let ids = ctx.next_group();
                    self.resolve_nodes(&mut group.general, key, ctx, report);
                    for slot in &mut group.slots {
                        self.resolve_nodes(&mut slot.body, key, ctx, report);
                    }

                    nodes.extend(self.render(&group, &ids, key, report));
                    report.resolved += 1;
                    report.max_slots = report.max_slots.max(group.slots.len());
                }
                Node::TabSlot(slot) => {
                    tracing::error!(
                        document = key,
                        tab = %slot.name,
                        "filter-tabs: tab found outside of a tab group, removing"
                    );
                    report.rejected += 1;
                }
                mut other => {
                    for list in other.child_lists_mut() {
                        self.resolve_nodes(list, key, ctx, report);
                    }
                    nodes.push(other);
                }
            }
        }
    }

    fn render(
        &self,
        group: &TabGroup,
        ids: &IdNamespace,
        key: &str,
        report: &mut ResolveReport,
    ) -> Vec<Node> {
        let count = group.slots.len();
        match Capacity::classify(count) {
            Capacity::Ok => {}
            Capacity::Warn => {
                tracing::warn!(
                    document = key,
                    group = ids.group_id(),
                    tabs = count,
                    "filter-tabs: group has more than {WARN_THRESHOLD} tabs"
                );
                report.warnings.push(format!(
                    "Tab group {} has {count} tabs (more than {WARN_THRESHOLD}); consider splitting it.",
                    ids.group_id()
                ));
            }
            Capacity::Capped => {
                tracing::error!(
                    document = key,
                    group = ids.group_id(),
                    tabs = count,
                    "filter-tabs: group exceeds {HARD_CAP} tabs; tabs past the limit cannot be selected"
                );
                report.warnings.push(format!(
                    "Tab group {} has {count} tabs; only the first {HARD_CAP} can be selected.",
                    ids.group_id()
                ));
            }
        }

        if self.debug {
            tracing::info!(
                document = key,
                group = ids.group_id(),
                format = %self.format,
                "filter-tabs: resolving group"
            );
        }

        self.styles.observe(count);

        if self.format.is_interactive() {
            let legend = group
                .legend
                .clone()
                .unwrap_or_else(|| infer_legend(&group.names()));
            vec![render_interactive(group, ids, legend).into()]
        } else {
            render_fallback(group)
        }
    }
}

/// Structural check repeated at write time, after arbitrary tree rewriting.
fn validate(group: &TabGroup) -> Result<(), String> {
    if group.slots.is_empty() {
        return Err("tab group has no tabs, removing".to_owned());
    }
    if let Some(i) = group.slots.iter().position(|slot| slot.name.trim().is_empty()) {
        return Err(format!("tab {i} of group has no name, removing"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::para;
    use crate::{Element, PanelKind, Section, TabSlot, TabsWidget};

    fn group(names: &[&str]) -> TabGroup {
        TabGroup {
            legend: None,
            general: Vec::new(),
            slots: names
                .iter()
                .map(|name| TabSlot::new(*name, vec![para(name)]))
                .collect(),
        }
    }

    fn widgets(doc: &Document) -> Vec<&TabsWidget> {
        let mut found = Vec::new();
        doc.walk(&mut |node| {
            if let Node::Tabs(widget) = node {
                found.push(widget);
            }
        });
        found
    }

    #[test]
    fn test_replaces_group_in_place() {
        let mut doc = Document::new(
            "index",
            vec![para("before"), Node::TabGroup(group(&["A", "B"])), para("after")],
        );
        let styles = StyleState::new();
        let report = Resolver::new(TargetFormat::Html, &styles).resolve(&mut doc);

        assert_eq!(report.resolved, 1);
        assert_eq!(doc.children.len(), 3);
        assert_eq!(doc.children[0], para("before"));
        assert!(matches!(doc.children[1], Node::Tabs(_)));
        assert_eq!(doc.children[2], para("after"));
    }

    #[test]
    fn test_no_neutral_nodes_remain() {
        let mut inner_slot = TabSlot::new("Outer", vec![Node::TabGroup(group(&["X", "Y"]))]);
        inner_slot.is_default = true;
        let outer = TabGroup {
            legend: None,
            general: vec![Node::TabGroup(group(&["G1"]))],
            slots: vec![inner_slot],
        };
        let section = Section::titled("Note", vec![Node::TabGroup(group(&["Z"]))]);
        let mut doc = Document::new(
            "index",
            vec![Node::TabGroup(outer), Node::Section(section)],
        );

        let styles = StyleState::new();
        let report = Resolver::new(TargetFormat::Html, &styles).resolve(&mut doc);

        assert_eq!(report.resolved, 4);
        assert_eq!(
            doc.count(|n| matches!(n, Node::TabGroup(_) | Node::TabSlot(_))),
            0
        );
    }

    #[test]
    fn test_nested_groups_get_distinct_ids() {
        let outer = TabGroup {
            legend: None,
            general: Vec::new(),
            slots: vec![
                TabSlot::new("A", vec![Node::TabGroup(group(&["X", "Y"]))]),
                TabSlot::new("B", vec![Node::TabGroup(group(&["X", "Y"]))]),
            ],
        };
        let mut doc = Document::new(
            "guide/setup",
            vec![Node::TabGroup(outer), Node::TabGroup(group(&["C"]))],
        );

        let styles = StyleState::new();
        Resolver::new(TargetFormat::Html, &styles).resolve(&mut doc);

        let ids: Vec<&str> = widgets(&doc).into_iter().map(|w| w.group_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "group-guide-setup-1",
                "group-guide-setup-2",
                "group-guide-setup-3",
                "group-guide-setup-4",
            ]
        );

        let mut radios = HashSet::new();
        for widget in widgets(&doc) {
            for selector in &widget.selectors {
                assert!(radios.insert(selector.radio_id.clone()));
            }
        }
        assert_eq!(radios.len(), 7);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let build = || Document::new("a/b", vec![Node::TabGroup(group(&["A", "B"]))]);
        let styles = StyleState::new();
        let resolver = Resolver::new(TargetFormat::Html, &styles);

        let mut first = build();
        let mut second = build();
        resolver.resolve(&mut first);
        resolver.resolve(&mut second);

        assert_eq!(first, second);
    }

    #[test]
    fn test_fallback_format() {
        let mut g = group(&["A", "B"]);
        g.general = vec![para("intro")];
        let mut doc = Document::new("index", vec![Node::TabGroup(g)]);

        let styles = StyleState::new();
        let report = Resolver::new(TargetFormat::Text, &styles).resolve(&mut doc);

        assert_eq!(report.resolved, 1);
        assert_eq!(
            doc.children,
            vec![
                para("intro"),
                Node::Section(Section::titled("A", vec![para("A")])),
                Node::Section(Section::titled("B", vec![para("B")])),
            ]
        );
        assert_eq!(doc.count(|n| matches!(n, Node::Tabs(_))), 0);
    }

    #[test]
    fn test_invalid_groups_removed() {
        let mut unnamed = group(&["A"]);
        unnamed.slots[0].name = "  ".to_owned();
        let mut doc = Document::new(
            "index",
            vec![
                Node::TabGroup(TabGroup::default()),
                Node::TabGroup(unnamed),
                Node::TabSlot(TabSlot::new("stray", vec![])),
                para("kept"),
            ],
        );

        let styles = StyleState::new();
        let report = Resolver::new(TargetFormat::Html, &styles).resolve(&mut doc);

        assert_eq!(report.rejected, 3);
        assert_eq!(report.resolved, 0);
        assert_eq!(doc.children, vec![para("kept")]);
        assert_eq!(styles.max_slots(), 0);
    }

    #[test]
    fn test_legend_override_and_inference() {
        let mut explicit = group(&["Python", "Rust"]);
        explicit.legend = Some("Pick one".to_owned());
        let mut doc = Document::new(
            "index",
            vec![
                Node::TabGroup(explicit),
                Node::TabGroup(group(&["Python", "Rust"])),
            ],
        );

        let styles = StyleState::new();
        Resolver::new(TargetFormat::Html, &styles).resolve(&mut doc);

        let legends: Vec<&str> = widgets(&doc).into_iter().map(|w| w.legend.as_str()).collect();
        assert_eq!(
            legends,
            vec!["Pick one", "Choose programming language: Python, Rust"]
        );
    }

    #[test]
    fn test_records_max_slots() {
        let names: Vec<String> = (0..21).map(|i| format!("Tab {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut doc = Document::new(
            "index",
            vec![Node::TabGroup(group(&refs)), Node::TabGroup(group(&["A"]))],
        );

        let styles = StyleState::new();
        let report = Resolver::new(TargetFormat::Html, &styles).resolve(&mut doc);

        assert_eq!(report.max_slots, 21);
        assert_eq!(styles.max_slots(), 21);
        assert_eq!(
            report.warnings,
            vec!["Tab group group-index-1 has 21 tabs; only the first 20 can be selected."]
        );

        let widget = widgets(&doc)[0];
        assert_eq!(widget.selectors.len(), 21);
        let tab_panels = widget
            .panels
            .iter()
            .filter(|p| matches!(p.kind, PanelKind::Tab { .. }))
            .count();
        assert_eq!(tab_panels, 21);
    }

    #[test]
    fn test_large_group_reported() {
        let names: Vec<String> = (0..16).map(|i| format!("Tab {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut doc = Document::new(
            "index",
            vec![Node::TabGroup(group(&["A", "B"])), Node::TabGroup(group(&refs))],
        );

        let styles = StyleState::new();
        let report = Resolver::new(TargetFormat::Text, &styles).resolve(&mut doc);

        assert_eq!(report.resolved, 2);
        assert_eq!(
            report.warnings,
            vec!["Tab group group-index-2 has 16 tabs (more than 15); consider splitting it."]
        );
    }

    #[test]
    fn test_groups_inside_elements_resolved() {
        let list = Element::new("li").with_child(Node::TabGroup(group(&["A"])));
        let mut doc = Document::new("index", vec![Element::new("ul").with_child(list.into()).into()]);

        let styles = StyleState::new();
        let report = Resolver::new(TargetFormat::Html, &styles).resolve(&mut doc);

        assert_eq!(report.resolved, 1);
        assert_eq!(doc.count(|n| matches!(n, Node::Tabs(_))), 1);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("html".parse::<TargetFormat>(), Ok(TargetFormat::Html));
        assert_eq!("TEXT".parse::<TargetFormat>(), Ok(TargetFormat::Text));
        assert!("pdf".parse::<TargetFormat>().is_err());
        assert_eq!(TargetFormat::Text.to_string(), "text");
    }
}
