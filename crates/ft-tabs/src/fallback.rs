//! Fallback rendering for non-interactive output formats.

use crate::{Node, Section, TabGroup};

/// Render a tab group as general content followed by one titled section per tab.
///
/// No identifiers or accessibility metadata are produced. Content is
/// deep-copied; `group` is left untouched.
#[must_use]
pub fn render_fallback(group: &TabGroup) -> Vec<Node> {
    let mut nodes = group.general.clone();
    nodes.extend(
        group
            .slots
            .iter()
            .map(|slot| Node::Section(Section::titled(slot.name.clone(), slot.body.clone()))),
    );
    nodes
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::TabSlot;
    use crate::node::para;

    #[test]
    fn test_general_first_then_sections_in_order() {
        let group = TabGroup {
            legend: Some("ignored".to_owned()),
            general: vec![para("intro")],
            slots: vec![
                TabSlot::new("A", vec![para("a")]),
                TabSlot::new("B", vec![para("b1"), para("b2")]).with_default(true),
            ],
        };

        assert_eq!(
            render_fallback(&group),
            vec![
                para("intro"),
                Node::Section(Section::titled("A", vec![para("a")])),
                Node::Section(Section::titled("B", vec![para("b1"), para("b2")])),
            ]
        );
    }

    #[test]
    fn test_preserves_all_text() {
        let group = TabGroup {
            legend: None,
            general: vec![para("g")],
            slots: vec![TabSlot::new("X", vec![para("x")])],
        };
        let text: String = render_fallback(&group).iter().map(Node::text_content).collect();
        assert_eq!(text, "gx");
    }
}
