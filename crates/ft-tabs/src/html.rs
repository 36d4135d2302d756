//! HTML output for resolved documents.

use std::fmt::Write;

use crate::{Document, Element, Node, PanelKind, ResolvedSelector, Section, TabsWidget};

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input"];

/// Escape special HTML characters.
///
/// # Example
///
/// ```
/// use ft_tabs::escape_html;
///
/// assert_eq!(escape_html("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Render a resolved document body as HTML.
///
/// Neutral nodes left in the tree are not rendered.
#[must_use]
pub fn render_html(doc: &Document) -> String {
    let mut out = String::new();
    write_nodes(&mut out, &doc.children);
    out
}

/// Render a list of nodes as HTML.
#[must_use]
pub fn nodes_to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    write_nodes(&mut out, nodes);
    out
}

fn write_nodes(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        write_node(out, node);
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(&escape_html(text)),
        Node::Raw(markup) => out.push_str(markup),
        Node::Element(element) => write_element(out, element),
        Node::Section(section) => write_section(out, section),
        Node::Tabs(widget) => write_widget(out, widget),
        Node::TabGroup(_) | Node::TabSlot(_) => {
            tracing::debug!("skipping unresolved tab node in HTML output");
        }
    }
}

fn write_open(out: &mut String, tag: &str, attrs: &[(&str, &str)]) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attrs {
        let _ = write!(out, " {name}=\"{}\"", escape_html(value));
    }
    out.push('>');
}

fn write_element(out: &mut String, element: &Element) {
    let attrs: Vec<(&str, &str)> = element
        .attrs
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    write_open(out, &element.tag, &attrs);
    if VOID_TAGS.contains(&element.tag.as_str()) {
        return;
    }
    write_nodes(out, &element.children);
    let _ = write!(out, "</{}>", element.tag);
}

fn write_section(out: &mut String, section: &Section) {
    let class = std::iter::once("admonition")
        .chain(section.classes.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    write_open(out, "div", &[("class", class.as_str())]);
    if let Some(title) = &section.title {
        let _ = write!(
            out,
            "<p class=\"admonition-title\">{}</p>",
            escape_html(title)
        );
    }
    write_nodes(out, &section.children);
    out.push_str("</div>");
}

fn write_widget(out: &mut String, widget: &TabsWidget) {
    write_open(
        out,
        "div",
        &[
            ("class", "sft-container"),
            ("role", "region"),
            ("aria-labelledby", widget.legend_id.as_str()),
        ],
    );
    write_open(
        out,
        "fieldset",
        &[("class", "sft-fieldset"), ("role", "radiogroup")],
    );
    write_open(
        out,
        "legend",
        &[("class", "sft-legend"), ("id", widget.legend_id.as_str())],
    );
    out.push_str(&escape_html(&widget.legend));
    out.push_str("</legend>");

    write_open(out, "div", &[("class", "sft-radio-group")]);
    for selector in &widget.selectors {
        write_selector(out, selector);
    }

    write_open(out, "div", &[("class", "sft-content")]);
    for panel in &widget.panels {
        match &panel.kind {
            PanelKind::General => write_open(
                out,
                "div",
                &[
                    ("class", "sft-panel"),
                    ("role", "region"),
                    ("data-filter", crate::GENERAL_FILTER),
                    ("aria-label", "General information"),
                ],
            ),
            PanelKind::Tab {
                panel_id,
                tab_index,
                slug,
                labelled_by,
            } => {
                let index = tab_index.to_string();
                write_open(
                    out,
                    "div",
                    &[
                        ("class", "sft-panel"),
                        ("id", panel_id.as_str()),
                        ("role", "tabpanel"),
                        ("tabindex", "0"),
                        ("data-tab", slug.as_str()),
                        ("data-tab-index", index.as_str()),
                        ("aria-labelledby", labelled_by.as_str()),
                    ],
                );
            }
        }
        write_nodes(out, &panel.body);
        out.push_str("</div>");
    }
    // .sft-content, .sft-radio-group
    out.push_str("</div></div>");
    out.push_str("</fieldset></div>");
}

fn write_selector(out: &mut String, selector: &ResolvedSelector) {
    let index = selector.tab_index.to_string();
    let mut attrs = vec![
        ("type", "radio"),
        ("class", "sr-only"),
        ("id", selector.radio_id.as_str()),
        ("name", selector.group_id.as_str()),
        ("aria-describedby", selector.desc_id.as_str()),
        ("aria-controls", selector.panel_id.as_str()),
        ("data-tab-index", index.as_str()),
    ];
    if let Some(label) = &selector.aria_label {
        attrs.push(("aria-label", label.as_str()));
    }
    if selector.checked {
        attrs.push(("checked", "checked"));
    }
    write_open(out, "input", &attrs);

    write_open(
        out,
        "label",
        &[
            ("for", selector.radio_id.as_str()),
            ("id", selector.label_id.as_str()),
        ],
    );
    out.push_str(&escape_html(&selector.name));
    out.push_str("</label>");

    write_open(
        out,
        "div",
        &[("class", "sr-only"), ("id", selector.desc_id.as_str())],
    );
    out.push_str(&escape_html(&selector.description));
    out.push_str("</div>");
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::para;
    use crate::{ResolutionContext, TabGroup, TabSlot, render_interactive};

    fn widget_html(group: &TabGroup) -> String {
        let ids = ResolutionContext::new("index").next_group();
        let widget = render_interactive(group, &ids, "Choose".to_owned());
        nodes_to_html(&[Node::Tabs(widget)])
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b's"), "a &amp; b&#x27;s");
    }

    #[test]
    fn test_element() {
        let node: Node = Element::new("p")
            .with_attr("class", "x\"y")
            .with_child(Node::text("1 < 2"))
            .into();
        assert_eq!(nodes_to_html(&[node]), "<p class=\"x&quot;y\">1 &lt; 2</p>");
    }

    #[test]
    fn test_void_element() {
        let node: Node = Element::new("hr").into();
        assert_eq!(nodes_to_html(&[node]), "<hr>");
    }

    #[test]
    fn test_raw_passthrough() {
        assert_eq!(nodes_to_html(&[Node::raw("<kbd>X</kbd>")]), "<kbd>X</kbd>");
    }

    #[test]
    fn test_section() {
        let mut section = Section::titled("Note", vec![para("body")]);
        section.classes.push("note".to_owned());
        assert_eq!(
            nodes_to_html(&[Node::Section(section)]),
            "<div class=\"admonition note\"><p class=\"admonition-title\">Note</p><p>body</p></div>"
        );
    }

    #[test]
    fn test_unresolved_nodes_skipped() {
        let nodes = [
            Node::TabGroup(TabGroup::default()),
            Node::TabSlot(TabSlot::new("A", vec![])),
            para("kept"),
        ];
        assert_eq!(nodes_to_html(&nodes), "<p>kept</p>");
    }

    #[test]
    fn test_widget_structure() {
        let group = TabGroup {
            legend: None,
            general: vec![para("intro")],
            slots: vec![
                TabSlot::new("A", vec![para("a")]).with_aria_label("Option A"),
                TabSlot::new("B", vec![para("b")]),
            ],
        };
        let html = widget_html(&group);

        assert!(html.starts_with(
            "<div class=\"sft-container\" role=\"region\" aria-labelledby=\"group-index-1-legend\">\
             <fieldset class=\"sft-fieldset\" role=\"radiogroup\">\
             <legend class=\"sft-legend\" id=\"group-index-1-legend\">Choose</legend>\
             <div class=\"sft-radio-group\">"
        ));
        assert!(html.contains(
            "<input type=\"radio\" class=\"sr-only\" id=\"group-index-1-radio-0\" \
             name=\"group-index-1\" aria-describedby=\"group-index-1-desc-0\" \
             aria-controls=\"group-index-1-panel-0\" data-tab-index=\"0\" \
             aria-label=\"Option A\" checked=\"checked\">"
        ));
        assert!(html.contains(
            "<label for=\"group-index-1-radio-1\" id=\"group-index-1-label-1\">B</label>"
        ));
        assert!(html.contains(
            "<div class=\"sr-only\" id=\"group-index-1-desc-1\">Show content for B</div>"
        ));
        assert!(html.contains(
            "<div class=\"sft-content\"><div class=\"sft-panel\" role=\"region\" \
             data-filter=\"General\" aria-label=\"General information\"><p>intro</p></div>"
        ));
        assert!(html.contains(
            "<div class=\"sft-panel\" id=\"group-index-1-panel-1\" role=\"tabpanel\" \
             tabindex=\"0\" data-tab=\"b\" data-tab-index=\"1\" \
             aria-labelledby=\"group-index-1-radio-1\"><p>b</p></div>"
        ));
        assert!(html.ends_with("</div></div></fieldset></div>"));
        assert_eq!(html.matches("checked=").count(), 1);
    }

    #[test]
    fn test_widget_escapes_author_text() {
        let group = TabGroup {
            legend: Some("<b>legend</b>".to_owned()),
            general: Vec::new(),
            slots: vec![TabSlot::new("\"quoted\" & <tag>", vec![])],
        };
        let ids = ResolutionContext::new("index").next_group();
        let legend = group.legend.clone().unwrap_or_default();
        let html = nodes_to_html(&[Node::Tabs(render_interactive(&group, &ids, legend))]);

        assert!(!html.contains("<b>"));
        assert!(!html.contains("<tag>"));
        assert!(html.contains("&quot;quoted&quot; &amp; &lt;tag&gt;"));
        assert!(html.contains("data-tab=\"&quot;quoted&quot;-&amp;-&lt;tag&gt;\""));
    }
}
