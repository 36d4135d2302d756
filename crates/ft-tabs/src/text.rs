//! Plain-text output for resolved documents.

use crate::{Document, Element, Node, PanelKind, Section, TabsWidget};

const INLINE_TAGS: &[&str] = &[
    "a", "br", "code", "del", "em", "img", "input", "kbd", "s", "span", "strong", "sub", "sup",
];

/// Render a resolved document as plain text.
///
/// Blocks are separated by blank lines; section titles are underlined.
#[must_use]
pub fn render_text(doc: &Document) -> String {
    let mut blocks = Vec::new();
    collect_blocks(&doc.children, &mut blocks);
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn collect_blocks(nodes: &[Node], blocks: &mut Vec<String>) {
    let mut inline = String::new();
    for node in nodes {
        match node {
            Node::Text(text) => inline.push_str(text),
            Node::Raw(markup) => inline.push_str(markup),
            Node::Element(element) if INLINE_TAGS.contains(&element.tag.as_str()) => {
                inline.push_str(&inline_text(element));
            }
            other => {
                flush(&mut inline, blocks);
                write_block(other, blocks);
            }
        }
    }
    flush(&mut inline, blocks);
}

fn flush(inline: &mut String, blocks: &mut Vec<String>) {
    let text = inline.trim();
    if !text.is_empty() {
        blocks.push(text.to_owned());
    }
    inline.clear();
}

fn inline_text(element: &Element) -> String {
    if element.tag == "br" {
        return "\n".to_owned();
    }
    let mut out = String::new();
    for child in &element.children {
        match child {
            Node::Element(inner) => out.push_str(&inline_text(inner)),
            other => out.push_str(&other.text_content()),
        }
    }
    out
}

fn write_block(node: &Node, blocks: &mut Vec<String>) {
    match node {
        Node::Element(element) => write_element(element, blocks),
        Node::Section(section) => write_section(section, blocks),
        Node::Tabs(widget) => write_widget(widget, blocks),
        Node::TabGroup(_) | Node::TabSlot(_) | Node::Text(_) | Node::Raw(_) => {}
    }
}

fn write_element(element: &Element, blocks: &mut Vec<String>) {
    match element.tag.as_str() {
        "p" => blocks.push(inline_text(element).trim().to_owned()),
        "h1" => blocks.push(underline(inline_text(element).trim(), '=')),
        "h2" | "h3" | "h4" | "h5" | "h6" => {
            blocks.push(underline(inline_text(element).trim(), '-'));
        }
        "pre" => blocks.push(element_text(element).trim_end_matches('\n').to_owned()),
        "hr" => blocks.push("----".to_owned()),
        "ul" | "ol" => {
            let ordered = element.tag == "ol";
            let items: Vec<String> = element
                .children
                .iter()
                .filter_map(|child| match child {
                    Node::Element(item) if item.tag == "li" => Some(item),
                    _ => None,
                })
                .enumerate()
                .map(|(i, item)| {
                    let text = element_text(item);
                    if ordered {
                        format!("{}. {}", i + 1, text.trim())
                    } else {
                        format!("- {}", text.trim())
                    }
                })
                .collect();
            if !items.is_empty() {
                blocks.push(items.join("\n"));
            }
        }
        "blockquote" => {
            let mut inner = Vec::new();
            collect_blocks(&element.children, &mut inner);
            let quoted: Vec<String> = inner
                .join("\n\n")
                .lines()
                .map(|line| format!("> {line}").trim_end().to_owned())
                .collect();
            blocks.push(quoted.join("\n"));
        }
        _ => collect_blocks(&element.children, blocks),
    }
}

fn element_text(element: &Element) -> String {
    Node::Element(element.clone()).text_content()
}

fn write_section(section: &Section, blocks: &mut Vec<String>) {
    if let Some(title) = &section.title {
        blocks.push(underline(title, '-'));
    }
    collect_blocks(&section.children, blocks);
}

fn write_widget(widget: &TabsWidget, blocks: &mut Vec<String>) {
    blocks.push(widget.legend.clone());
    for panel in &widget.panels {
        match &panel.kind {
            PanelKind::General => collect_blocks(&panel.body, blocks),
            PanelKind::Tab { tab_index, .. } => {
                if let Some(selector) = widget.selectors.get(*tab_index) {
                    blocks.push(underline(&selector.name, '-'));
                }
                collect_blocks(&panel.body, blocks);
            }
        }
    }
}

fn underline(title: &str, ch: char) -> String {
    let rule: String = std::iter::repeat_n(ch, title.chars().count()).collect();
    format!("{title}\n{rule}")
}
