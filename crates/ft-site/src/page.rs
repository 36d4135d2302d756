//! HTML page template for built documents.

use std::fmt::Write;

use ft_tabs::{Document, Element, Node, THEME_FILENAME, escape_html};

/// Directory holding stylesheets, relative to the output root.
pub const STATIC_DIR: &str = "_static";

/// Base widget stylesheet filename.
pub const BASE_CSS_FILENAME: &str = "filter_tabs.css";

/// Base widget stylesheet contents.
pub const BASE_CSS: &str = include_str!("../assets/filter_tabs.css");

/// Title of a document: text of its first `h1`, or its key.
pub(crate) fn page_title(doc: &Document) -> String {
    let mut title = None;
    doc.walk(&mut |node| {
        if title.is_none()
            && let Node::Element(Element { tag, .. }) = node
            && tag == "h1"
        {
            title = Some(node.text_content());
        }
    });
    title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| doc.key.clone())
}

/// Wrap a rendered body in a standalone HTML page.
///
/// Stylesheet links are relative to the page, so `key` decides how many
/// levels to climb back to the output root.
pub(crate) fn render_page(key: &str, title: &str, body: &str) -> String {
    let root = "../".repeat(key.matches('/').count());

    let mut html = String::with_capacity(body.len() + 512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
    for css in [BASE_CSS_FILENAME, THEME_FILENAME] {
        let _ = writeln!(
            html,
            "<link rel=\"stylesheet\" href=\"{root}{STATIC_DIR}/{css}\">"
        );
    }
    html.push_str("</head>\n<body>\n<main>\n");
    html.push_str(body);
    html.push_str("\n</main>\n</body>\n</html>\n");
    html
}
