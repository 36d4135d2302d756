//! Interactive rendering: radio selectors plus declaratively toggled panels.

use crate::{IdNamespace, Node, PanelKind, ResolvedPanel, ResolvedSelector, TabGroup, TabsWidget};

/// Filter key of the general panel.
pub const GENERAL_FILTER: &str = "General";

/// Render a tab group as an interactive widget.
///
/// Tab bodies and general content are deep-copied; `group` is left untouched.
#[must_use]
pub fn render_interactive(group: &TabGroup, ids: &IdNamespace, legend: String) -> TabsWidget {
    let default_index = group.default_index();

    let selectors = group
        .slots
        .iter()
        .enumerate()
        .map(|(i, slot)| ResolvedSelector {
            name: slot.name.clone(),
            tab_index: i,
            group_id: ids.group_id().to_owned(),
            radio_id: ids.radio_id(i),
            label_id: ids.label_id(i),
            desc_id: ids.desc_id(i),
            panel_id: ids.panel_id(i),
            description: format!("Show content for {}", slot.name),
            aria_label: slot.aria_label.clone(),
            checked: i == default_index,
        })
        .collect();

    let mut panels = Vec::with_capacity(group.slots.len() + 1);
    if !group.general.is_empty() {
        panels.push(ResolvedPanel {
            kind: PanelKind::General,
            body: group.general.clone(),
        });
    }
    panels.extend(group.slots.iter().enumerate().map(|(i, slot)| ResolvedPanel {
        kind: PanelKind::Tab {
            panel_id: ids.panel_id(i),
            tab_index: i,
            slug: slugify(&slot.name),
            labelled_by: ids.radio_id(i),
        },
        body: slot.body.clone(),
    }));

    TabsWidget {
        group_id: ids.group_id().to_owned(),
        legend_id: ids.legend_id(),
        legend,
        selectors,
        panels,
    }
}

/// Lowercase a tab name and replace spaces with hyphens.
fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

impl From<TabsWidget> for Node {
    fn from(widget: TabsWidget) -> Self {
        Self::Tabs(widget)
    }
}
