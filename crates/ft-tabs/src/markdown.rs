//! Markdown to document tree conversion.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::{Element, Node};

/// Parser options used for all markdown content.
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Convert markdown source into document nodes.
///
/// # Example
///
/// ```
/// use ft_tabs::{Node, parse_markdown};
///
/// let nodes = parse_markdown("Hello *world*");
/// assert_eq!(nodes.len(), 1);
/// assert_eq!(nodes[0].text_content(), "Hello world");
/// ```
pub fn parse_markdown(source: &str) -> Vec<Node> {
    let mut converter = Converter::new();
    for event in Parser::new_ext(source, parser_options()) {
        converter.process_event(event);
    }
    converter.finish()
}

/// Open element being filled. `element: None` frames are transparent.
struct Frame {
    element: Option<Element>,
    children: Vec<Node>,
}

impl Frame {
    fn new(element: Option<Element>) -> Self {
        Self {
            element,
            children: Vec::new(),
        }
    }
}

struct Converter {
    stack: Vec<Frame>,
    in_table_head: bool,
}

impl Converter {
    fn new() -> Self {
        Self {
            stack: vec![Frame::new(None)],
            in_table_head: false,
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while self.stack.len() > 1 {
            self.close();
        }
        self.stack.pop().map(|frame| frame.children).unwrap_or_default()
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.push(Element::new("code").with_child(Node::text(&*code)).into()),
            Event::Html(html) | Event::InlineHtml(html) => self.push_raw(&html),
            Event::SoftBreak => self.push_text("\n"),
            Event::HardBreak => self.push(Element::new("br").into()),
            Event::Rule => self.push(Element::new("hr").into()),
            Event::TaskListMarker(checked) => {
                let mut input = Element::new("input")
                    .with_attr("type", "checkbox")
                    .with_attr("disabled", "disabled");
                if checked {
                    input = input.with_attr("checked", "checked");
                }
                self.push(input.into());
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        let element = match tag {
            Tag::Paragraph => Some(Element::new("p")),
            Tag::Heading { level, .. } => Some(Element::new(level.to_string())),
            Tag::BlockQuote(_) => Some(Element::new("blockquote")),
            Tag::CodeBlock(kind) => {
                self.open(Some(Element::new("pre")));
                let code = match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => {
                        let lang = info.split_whitespace().next().unwrap_or_default();
                        Element::new("code").with_attr("class", format!("language-{lang}"))
                    }
                    _ => Element::new("code"),
                };
                Some(code)
            }
            Tag::List(Some(1)) => Some(Element::new("ol")),
            Tag::List(Some(start)) => Some(Element::new("ol").with_attr("start", start.to_string())),
            Tag::List(None) => Some(Element::new("ul")),
            Tag::Item => Some(Element::new("li")),
            Tag::DefinitionList => Some(Element::new("dl")),
            Tag::DefinitionListTitle => Some(Element::new("dt")),
            Tag::DefinitionListDefinition => Some(Element::new("dd")),
            Tag::Table(_) => Some(Element::new("table")),
            Tag::TableHead => {
                self.in_table_head = true;
                self.open(Some(Element::new("thead")));
                Some(Element::new("tr"))
            }
            Tag::TableRow => Some(Element::new("tr")),
            Tag::TableCell => Some(Element::new(if self.in_table_head { "th" } else { "td" })),
            Tag::Emphasis => Some(Element::new("em")),
            Tag::Strong => Some(Element::new("strong")),
            Tag::Strikethrough => Some(Element::new("s")),
            Tag::Superscript => Some(Element::new("sup")),
            Tag::Subscript => Some(Element::new("sub")),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut link = Element::new("a").with_attr("href", &*dest_url);
                if !title.is_empty() {
                    link = link.with_attr("title", &*title);
                }
                Some(link)
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let mut image = Element::new("img").with_attr("src", &*dest_url);
                if !title.is_empty() {
                    image = image.with_attr("title", &*title);
                }
                Some(image)
            }
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => None,
        };
        self.open(element);
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::CodeBlock => {
                self.close();
                self.close();
            }
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.close();
                self.close();
            }
            TagEnd::Image => {
                if let Some(frame) = self.stack.last_mut()
                    && let Some(image) = &mut frame.element
                {
                    let alt: String = frame.children.iter().map(Node::text_content).collect();
                    image.attrs.insert(1, ("alt".to_owned(), alt));
                    frame.children.clear();
                }
                self.close();
            }
            _ => self.close(),
        }
    }

    fn open(&mut self, element: Option<Element>) {
        self.stack.push(Frame::new(element));
    }

    fn close(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame.element {
            Some(mut element) => {
                element.children = frame.children;
                self.push(element.into());
            }
            None => {
                for child in frame.children {
                    self.push(child);
                }
            }
        }
    }

    fn current(&mut self) -> &mut Vec<Node> {
        // The root frame is never popped.
        let last = self.stack.len() - 1;
        &mut self.stack[last].children
    }

    /// Append a node, merging adjacent text and raw runs.
    fn push(&mut self, node: Node) {
        let children = self.current();
        match (children.last_mut(), &node) {
            (Some(Node::Text(prev)), Node::Text(text)) | (Some(Node::Raw(prev)), Node::Raw(text)) => {
                prev.push_str(text);
                return;
            }
            _ => {}
        }
        children.push(node);
    }

    fn push_text(&mut self, text: &str) {
        self.push(Node::text(text));
    }

    fn push_raw(&mut self, html: &str) {
        self.push(Node::raw(html));
    }
}
