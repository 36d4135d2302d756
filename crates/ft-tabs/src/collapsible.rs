//! Collapsible admonitions.
//!
//! An admonition carrying the `collapsible` class becomes a
//! `<details>`/`<summary>` element in interactive output. The `expanded`
//! class renders it open.

use crate::{Document, Element, Node, Section};

/// Summary text for collapsible admonitions without a title.
pub const DEFAULT_SUMMARY: &str = "Details";

/// Replace every collapsible admonition in `doc` with a details element.
///
/// Returns the number of admonitions converted.
pub fn expand_collapsible(doc: &mut Document) -> usize {
    expand_nodes(&mut doc.children)
}

fn expand_nodes(nodes: &mut [Node]) -> usize {
    let mut converted = 0;
    for node in nodes.iter_mut() {
        for list in node.child_lists_mut() {
            converted += expand_nodes(list);
        }
        if let Node::Section(section) = node
            && section.has_class("collapsible")
        {
            let section = std::mem::take(section);
            *node = details(section);
            converted += 1;
        }
    }
    converted
}

fn details(section: Section) -> Node {
    let mut details = Element::new("details").with_attr("class", "collapsible-section");
    if section.has_class("expanded") {
        details = details.with_attr("open", "open");
    }

    let summary_text = section.title.unwrap_or_else(|| DEFAULT_SUMMARY.to_owned());
    let summary = Element::new("summary")
        .with_child(
            Element::new("span")
                .with_attr("class", "custom-arrow")
                .with_child(Node::text("\u{25b6}"))
                .into(),
        )
        .with_child(Node::text(summary_text));
    let content = Element::new("div")
        .with_attr("class", "collapsible-content")
        .with_children(section.children);

    details
        .with_child(summary.into())
        .with_child(content.into())
        .into()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::para;
    use crate::nodes_to_html;

    fn admonition(title: Option<&str>, classes: &[&str], body: Vec<Node>) -> Node {
        Node::Section(Section {
            title: title.map(str::to_owned),
            classes: classes.iter().map(|c| (*c).to_owned()).collect(),
            children: body,
        })
    }

    #[test]
    fn test_collapsible_becomes_details() {
        let mut doc = Document::new(
            "index",
            vec![admonition(Some("More"), &["note", "collapsible"], vec![para("hidden")])],
        );

        assert_eq!(expand_collapsible(&mut doc), 1);
        assert_eq!(
            nodes_to_html(&doc.children),
            "<details class=\"collapsible-section\"><summary><span class=\"custom-arrow\">\u{25b6}</span>More</summary>\
             <div class=\"collapsible-content\"><p>hidden</p></div></details>"
        );
    }

    #[test]
    fn test_expanded_is_open_and_default_summary() {
        let mut doc = Document::new(
            "index",
            vec![admonition(None, &["collapsible", "expanded"], vec![])],
        );
        expand_collapsible(&mut doc);

        let html = nodes_to_html(&doc.children);
        assert!(html.starts_with("<details class=\"collapsible-section\" open=\"open\">"));
        assert!(html.contains("</span>Details</summary>"));
    }

    #[test]
    fn test_plain_admonition_untouched() {
        let original = admonition(Some("Note"), &["note"], vec![para("x")]);
        let mut doc = Document::new("index", vec![original.clone()]);

        assert_eq!(expand_collapsible(&mut doc), 0);
        assert_eq!(doc.children, vec![original]);
    }

    #[test]
    fn test_nested_collapsible_keeps_own_title() {
        let inner = admonition(Some("Inner"), &["collapsible"], vec![para("deep")]);
        let outer = admonition(Some("Outer"), &["collapsible"], vec![inner]);
        let mut doc = Document::new("index", vec![outer]);

        assert_eq!(expand_collapsible(&mut doc), 2);
        let html = nodes_to_html(&doc.children);
        assert!(html.contains("</span>Outer</summary>"));
        assert!(html.contains("</span>Inner</summary>"));
        assert_eq!(html.matches("<details").count(), 2);
    }
}
