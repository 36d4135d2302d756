//! Construction of neutral tab groups from parsed block content.

use std::collections::HashSet;

use crate::{Node, TabGroup, TabsError};

/// A validated tab group plus the advisory warnings raised while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBuild {
    /// The neutral container, ready to be placed in the document tree.
    pub group: TabGroup,
    /// Non-fatal problems found in the block.
    pub warnings: Vec<String>,
}

/// Build a neutral tab group from the parsed children of a tab block.
///
/// Children that are [`Node::TabSlot`]s become tabs; everything else is
/// general content. Relative order is kept within each partition. When no tab
/// is marked default the first one is promoted; when several are, only the
/// first keeps the mark.
///
/// # Example
///
/// ```
/// use ft_tabs::{Node, TabSlot, build_group};
///
/// let children = vec![
///     Node::TabSlot(TabSlot::new("Linux", vec![Node::text("apt install")])),
///     Node::TabSlot(TabSlot::new("macOS", vec![Node::text("brew install")])),
/// ];
/// let built = build_group(children, None).unwrap();
/// assert!(built.group.slots[0].is_default);
/// assert!(built.warnings.is_empty());
/// ```
pub fn build_group(children: Vec<Node>, legend: Option<String>) -> Result<GroupBuild, TabsError> {
    let mut general = Vec::new();
    let mut slots = Vec::new();
    for child in children {
        match child {
            Node::TabSlot(slot) => slots.push(slot),
            other => general.push(other),
        }
    }

    if slots.is_empty() {
        return Err(TabsError::Structure {
            has_content: !general.is_empty(),
        });
    }

    let mut warnings = Vec::new();
    let mut seen = HashSet::new();
    for slot in &slots {
        if !seen.insert(slot.name.as_str()) {
            return Err(TabsError::DuplicateName {
                name: slot.name.clone(),
            });
        }
        if slot.body.is_empty() {
            warnings.push(format!("Tab '{}' has no content.", slot.name));
        }
    }

    let defaults: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_default)
        .map(|(i, _)| i)
        .collect();
    match defaults.as_slice() {
        [] => slots[0].is_default = true,
        [_] => {}
        [first, rest @ ..] => {
            let claimants: Vec<&str> = defaults.iter().map(|&i| slots[i].name.as_str()).collect();
            warnings.push(format!(
                "Multiple tabs marked as default: {}. Using first default: '{}'",
                claimants.join(", "),
                slots[*first].name
            ));
            for &i in rest {
                slots[i].is_default = false;
            }
        }
    }

    for warning in &warnings {
        tracing::warn!("filter-tabs: {warning}");
    }

    Ok(GroupBuild {
        group: TabGroup {
            legend,
            general,
            slots,
        },
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::TabSlot;
    use crate::node::para;

    fn slot(name: &str) -> Node {
        Node::TabSlot(TabSlot::new(name, vec![para(name)]))
    }

    fn default_slot(name: &str) -> Node {
        Node::TabSlot(TabSlot::new(name, vec![para(name)]).with_default(true))
    }

    #[test]
    fn test_partitions_preserving_order() {
        let children = vec![para("intro"), slot("A"), para("between"), slot("B")];
        let built = build_group(children, Some("Pick".to_owned())).unwrap();

        assert_eq!(built.group.general, vec![para("intro"), para("between")]);
        assert_eq!(built.group.names(), vec!["A", "B"]);
        assert_eq!(built.group.legend.as_deref(), Some("Pick"));
    }

    #[test]
    fn test_no_children_is_structure_error() {
        let err = build_group(vec![], None).unwrap_err();
        assert_eq!(err, TabsError::Structure { has_content: false });
    }

    #[test]
    fn test_content_without_tabs_is_structure_error() {
        let err = build_group(vec![para("stray")], None).unwrap_err();
        assert_eq!(err, TabsError::Structure { has_content: true });
    }

    #[test]
    fn test_duplicate_name() {
        let err = build_group(vec![slot("A"), slot("B"), slot("A")], None).unwrap_err();
        assert_eq!(
            err,
            TabsError::DuplicateName {
                name: "A".to_owned()
            }
        );
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let built = build_group(vec![slot("a"), slot("A")], None).unwrap();
        assert_eq!(built.group.slots.len(), 2);
    }

    #[test]
    fn test_first_promoted_when_no_default() {
        let built = build_group(vec![slot("A"), slot("B")], None).unwrap();
        let defaults: Vec<bool> = built.group.slots.iter().map(|s| s.is_default).collect();
        assert_eq!(defaults, vec![true, false]);
        assert!(built.warnings.is_empty());
    }

    #[test]
    fn test_single_default_kept() {
        let built = build_group(vec![slot("A"), default_slot("B")], None).unwrap();
        assert_eq!(built.group.default_index(), 1);
        assert!(built.warnings.is_empty());
    }

    #[test]
    fn test_multiple_defaults_first_wins() {
        let children = vec![slot("A"), default_slot("B"), default_slot("C")];
        let built = build_group(children, None).unwrap();

        let defaults: Vec<bool> = built.group.slots.iter().map(|s| s.is_default).collect();
        assert_eq!(defaults, vec![false, true, false]);
        assert_eq!(built.warnings.len(), 1);
        assert!(built.warnings[0].contains("B, C"));
        assert!(built.warnings[0].contains("'B'"));
    }

    #[test]
    fn test_empty_tab_warns() {
        let children = vec![slot("A"), Node::TabSlot(TabSlot::new("Empty", vec![]))];
        let built = build_group(children, None).unwrap();

        assert_eq!(built.warnings, vec!["Tab 'Empty' has no content.".to_owned()]);
    }
}
