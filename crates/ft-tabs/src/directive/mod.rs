//! Authoring syntax: markdown with container directives.
//!
//! ```markdown
//! ::: filter-tabs[Choose your platform]
//! Shown for every tab.
//! ::: tab Linux (default)
//! Use apt.
//! :::
//! ::: tab macOS {aria-label="Apple macOS"}
//! Use Homebrew.
//! :::
//! :::
//! ```
//!
//! `filter-tabs` blocks become neutral [`TabGroup`](crate::TabGroup)s, `tab`
//! blocks become their slots, and any other container name becomes an
//! admonition [`Section`]. A line of colons closes the innermost open
//! container. Directive lines inside fenced code blocks are ignored.

mod args;
mod fence;
mod parser;

pub use args::DirectiveArgs;

use fence::FenceTracker;
use parser::{ContainerLine, parse_container_line};

use crate::{Document, Node, Section, TabArgument, TabSlot, TabsError, build_group, parse_markdown};

/// Admonition names that get a default title.
const ADMONITION_TYPES: &[&str] = &[
    "attention",
    "caution",
    "danger",
    "error",
    "hint",
    "important",
    "note",
    "seealso",
    "tip",
    "warning",
];

/// An author-visible error, located at the line that opened the block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {error}")]
pub struct DirectiveError {
    /// 1-indexed line of the directive.
    pub line: usize,
    /// What went wrong.
    pub error: TabsError,
}

/// Result of parsing one source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Document tree with neutral tab groups in place.
    pub document: Document,
    /// Blocks dropped because of errors.
    pub errors: Vec<DirectiveError>,
    /// Advisory warnings.
    pub warnings: Vec<String>,
}

/// Parse markdown with container directives into a document tree.
///
/// # Example
///
/// ```
/// use ft_tabs::Node;
/// use ft_tabs::directive::parse_document;
///
/// let source = "::: filter-tabs\n::: tab Python\nprint()\n:::\n:::\n";
/// let parsed = parse_document("index", source);
///
/// assert!(parsed.errors.is_empty());
/// assert!(matches!(parsed.document.children[0], Node::TabGroup(_)));
/// ```
pub fn parse_document(key: &str, source: &str) -> ParsedDocument {
    let mut parser = DocumentParser::new();
    for (idx, line) in source.lines().enumerate() {
        parser.process_line(line, idx + 1);
    }
    parser.finish(key)
}

enum Container {
    Root,
    FilterTabs {
        legend: Option<String>,
        /// A child tab with a body was dropped for a bad argument.
        dropped_content: bool,
    },
    Tab {
        argument: Result<TabArgument, TabsError>,
        aria_label: Option<String>,
    },
    Admonition {
        title: Option<String>,
        classes: Vec<String>,
    },
}

/// Open container with its pending markdown and finished child nodes.
struct Frame {
    container: Container,
    name: String,
    line: usize,
    source: String,
    children: Vec<Node>,
}

impl Frame {
    fn new(container: Container, name: &str, line: usize) -> Self {
        Self {
            container,
            name: name.to_owned(),
            line,
            source: String::new(),
            children: Vec::new(),
        }
    }

    /// Convert pending markdown into child nodes.
    fn flush(&mut self) {
        if !self.source.trim().is_empty() {
            self.children.extend(parse_markdown(&self.source));
        }
        self.source.clear();
    }
}

struct DocumentParser {
    fence: FenceTracker,
    stack: Vec<Frame>,
    errors: Vec<DirectiveError>,
    warnings: Vec<String>,
}

impl DocumentParser {
    fn new() -> Self {
        Self {
            fence: FenceTracker::new(),
            stack: vec![Frame::new(Container::Root, "", 0)],
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn push_line(&mut self, line: &str) {
        let frame = self.current();
        frame.source.push_str(line);
        frame.source.push('\n');
    }

    fn process_line(&mut self, line: &str, line_num: usize) {
        let was_fenced = self.fence.in_fence();
        self.fence.update(line);
        if was_fenced || self.fence.in_fence() {
            self.push_line(line);
            return;
        }

        match parse_container_line(line) {
            Some(ContainerLine::Start { name, args }) => self.open(&name, &args, line_num),
            Some(ContainerLine::End) if self.stack.len() > 1 => self.close(),
            Some(ContainerLine::End) => {
                self.warn(format!(
                    "line {line_num}: stray ::: with no opening directive"
                ));
                self.push_line(line);
            }
            None => self.push_line(line),
        }
    }

    fn open(&mut self, name: &str, args: &DirectiveArgs, line: usize) {
        self.current().flush();

        let container = match name {
            "filter-tabs" => Container::FilterTabs {
                legend: non_empty(&args.content)
                    .or_else(|| args.get("legend"))
                    .map(str::to_owned),
                dropped_content: false,
            },
            "tab" => {
                let argument = if matches!(self.current().container, Container::FilterTabs { .. }) {
                    TabArgument::parse(&args.content)
                } else {
                    Err(TabsError::Misplaced)
                };
                Container::Tab {
                    argument,
                    aria_label: args.get("aria-label").map(str::to_owned),
                }
            }
            "admonition" => Container::Admonition {
                title: non_empty(&args.content).map(str::to_owned),
                classes: args.classes.clone(),
            },
            other => {
                let title = non_empty(&args.content).map(str::to_owned).or_else(|| {
                    ADMONITION_TYPES
                        .contains(&other)
                        .then(|| capitalize(other))
                });
                let mut classes = vec![other.to_owned()];
                classes.extend(args.classes.iter().cloned());
                Container::Admonition { title, classes }
            }
        };

        self.stack.push(Frame::new(container, name, line));
    }

    fn close(&mut self) {
        let Some(mut frame) = self.stack.pop() else {
            return;
        };
        frame.flush();

        let node = match frame.container {
            Container::Root => None,
            Container::FilterTabs {
                legend,
                dropped_content,
            } => match build_group(frame.children, legend) {
                Ok(built) => {
                    for warning in built.warnings {
                        self.warnings.push(format!("line {}: {warning}", frame.line));
                    }
                    Some(Node::TabGroup(built.group))
                }
                Err(TabsError::Structure { has_content }) => {
                    let has_content = has_content || dropped_content;
                    self.fail(frame.line, TabsError::Structure { has_content });
                    None
                }
                Err(error) => {
                    self.fail(frame.line, error);
                    None
                }
            },
            Container::Tab {
                argument,
                aria_label,
            } => match argument {
                Ok(TabArgument { name, is_default }) => Some(Node::TabSlot(TabSlot {
                    name,
                    is_default,
                    aria_label,
                    body: frame.children,
                })),
                Err(error) => {
                    if !frame.children.is_empty()
                        && let Container::FilterTabs {
                            dropped_content, ..
                        } = &mut self.current().container
                    {
                        *dropped_content = true;
                    }
                    self.fail(frame.line, error);
                    None
                }
            },
            Container::Admonition { title, classes } => Some(Node::Section(Section {
                title,
                classes,
                children: frame.children,
            })),
        };

        if let Some(node) = node {
            self.current().children.push(node);
        }
    }

    fn fail(&mut self, line: usize, error: TabsError) {
        tracing::error!(line, "filter-tabs: {error}");
        self.errors.push(DirectiveError { line, error });
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.warnings.push(message);
    }

    fn finish(mut self, key: &str) -> ParsedDocument {
        while self.stack.len() > 1 {
            let (name, line) = {
                let frame = self.current();
                (frame.name.clone(), frame.line)
            };
            self.warn(format!(
                "line {line}: unclosed container directive ::: {name} (missing closing :::)"
            ));
            self.close();
        }

        let root = self.current();
        root.flush();
        let children = std::mem::take(&mut root.children);

        ParsedDocument {
            document: Document::new(key, children),
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::para;
    use crate::{Element, TabGroup};

    fn group_of(parsed: &ParsedDocument, index: usize) -> &TabGroup {
        match &parsed.document.children[index] {
            Node::TabGroup(group) => group,
            other => panic!("expected tab group, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_markdown() {
        let parsed = parse_document("index", "Hello\n\nWorld\n");
        assert_eq!(parsed.document.children, vec![para("Hello"), para("World")]);
        assert!(parsed.errors.is_empty());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_tab_group() {
        let source = "\
Intro

::: filter-tabs[Pick one]
Shared text.
::: tab Linux
Use apt.
:::
::: tab macOS (default) {aria-label=\"Apple\"}
Use brew.
:::
:::

Outro
";
        let parsed = parse_document("install", source);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        assert_eq!(parsed.document.key, "install");
        assert_eq!(parsed.document.children.len(), 3);
        assert_eq!(parsed.document.children[0], para("Intro"));
        assert_eq!(parsed.document.children[2], para("Outro"));

        let group = group_of(&parsed, 1);
        assert_eq!(group.legend.as_deref(), Some("Pick one"));
        assert_eq!(group.general, vec![para("Shared text.")]);
        assert_eq!(
            group.slots,
            vec![
                TabSlot::new("Linux", vec![para("Use apt.")]),
                TabSlot::new("macOS", vec![para("Use brew.")])
                    .with_default(true)
                    .with_aria_label("Apple"),
            ]
        );
    }

    #[test]
    fn test_legend_attribute() {
        let source = "::: filter-tabs {legend=\"Choose\"}\n::: tab A\na\n:::\n:::\n";
        let parsed = parse_document("index", source);
        assert_eq!(group_of(&parsed, 0).legend.as_deref(), Some("Choose"));
    }

    #[test]
    fn test_nested_groups() {
        let source = "\
::: filter-tabs
::: tab Outer A
::: filter-tabs
::: tab Inner X
x
:::
::: tab Inner Y
y
:::
:::
:::
::: tab Outer B
b
:::
:::
";
        let parsed = parse_document("index", source);
        assert!(parsed.errors.is_empty());
        let outer = group_of(&parsed, 0);
        assert_eq!(outer.names(), vec!["Outer A", "Outer B"]);
        match &outer.slots[0].body[0] {
            Node::TabGroup(inner) => assert_eq!(inner.names(), vec!["Inner X", "Inner Y"]),
            other => panic!("expected nested group, got {other:?}"),
        }
    }

    #[test]
    fn test_directives_in_code_fence_ignored() {
        let source = "```markdown\n::: filter-tabs\n:::\n```\n";
        let parsed = parse_document("index", source);

        assert!(parsed.errors.is_empty());
        assert!(parsed.warnings.is_empty());
        let Node::Element(pre) = &parsed.document.children[0] else {
            panic!("expected code block");
        };
        assert_eq!(pre.tag, "pre");
        assert_eq!(parsed.document.children[0].text_content(), "::: filter-tabs\n:::\n");
    }

    #[test]
    fn test_no_tabs_is_error() {
        let parsed = parse_document("index", "::: filter-tabs\nJust text.\n:::\nAfter\n");
        assert_eq!(
            parsed.errors,
            vec![DirectiveError {
                line: 1,
                error: TabsError::Structure { has_content: true },
            }]
        );
        assert_eq!(parsed.document.children, vec![para("After")]);
    }

    #[test]
    fn test_duplicate_tab_is_error() {
        let source = "::: filter-tabs\n::: tab A\na\n:::\n::: tab A\nb\n:::\n:::\n";
        let parsed = parse_document("index", source);
        assert_eq!(
            parsed.errors[0].error,
            TabsError::DuplicateName {
                name: "A".to_owned()
            }
        );
        assert!(parsed.document.children.is_empty());
    }

    #[test]
    fn test_invalid_tab_argument_drops_tab() {
        let source = "::: filter-tabs\n::: tab (default)\nx\n:::\n::: tab B\nb\n:::\n:::\n";
        let parsed = parse_document("index", source);

        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].line, 2);
        assert!(matches!(parsed.errors[0].error, TabsError::Validation(_)));
        assert_eq!(group_of(&parsed, 0).names(), vec!["B"]);
    }

    #[test]
    fn test_only_tab_dropped_reports_content() {
        let source = "::: filter-tabs\n::: tab (default)\nInstall steps.\n:::\n:::\n";
        let parsed = parse_document("index", source);

        assert_eq!(parsed.errors.len(), 2);
        assert_eq!(parsed.errors[0].line, 2);
        assert!(matches!(parsed.errors[0].error, TabsError::Validation(_)));
        assert_eq!(
            parsed.errors[1],
            DirectiveError {
                line: 1,
                error: TabsError::Structure { has_content: true },
            }
        );
        assert!(parsed.document.children.is_empty());
    }

    #[test]
    fn test_empty_bad_tab_reports_no_content() {
        let parsed = parse_document("index", "::: filter-tabs\n::: tab (default)\n:::\n:::\n");
        assert_eq!(
            parsed.errors[1].error,
            TabsError::Structure { has_content: false }
        );
    }

    #[test]
    fn test_tab_outside_group_is_error() {
        let parsed = parse_document("index", "::: tab Lonely\ntext\n:::\n");
        assert_eq!(parsed.errors[0].error, TabsError::Misplaced);
        assert!(parsed.document.children.is_empty());
    }

    #[test]
    fn test_warnings_carry_line() {
        let source = "\n::: filter-tabs\n::: tab A\n:::\n::: tab B\nb\n:::\n:::\n";
        let parsed = parse_document("index", source);
        assert_eq!(
            parsed.warnings,
            vec!["line 2: Tab 'A' has no content.".to_owned()]
        );
    }

    #[test]
    fn test_unclosed_containers_closed_at_end() {
        let parsed = parse_document("index", "::: filter-tabs\n::: tab A\na\n");
        assert_eq!(parsed.warnings.len(), 2);
        assert!(parsed.warnings[0].contains("::: tab"));
        assert!(parsed.warnings[1].contains("::: filter-tabs"));
        assert_eq!(group_of(&parsed, 0).names(), vec!["A"]);
    }

    #[test]
    fn test_stray_close() {
        let parsed = parse_document("index", "text\n:::\n");
        assert_eq!(parsed.warnings, vec!["line 2: stray ::: with no opening directive".to_owned()]);
    }

    #[test]
    fn test_admonitions() {
        let source = "::: note\nBody\n:::\n::: admonition[Read more]{.collapsible}\nHidden\n:::\n";
        let parsed = parse_document("index", source);
        assert_eq!(
            parsed.document.children,
            vec![
                Node::Section(Section {
                    title: Some("Note".to_owned()),
                    classes: vec!["note".to_owned()],
                    children: vec![para("Body")],
                }),
                Node::Section(Section {
                    title: Some("Read more".to_owned()),
                    classes: vec!["collapsible".to_owned()],
                    children: vec![para("Hidden")],
                }),
            ]
        );
    }

    #[test]
    fn test_markdown_inside_tab() {
        let source = "::: filter-tabs\n::: tab A\n- one\n- two\n:::\n:::\n";
        let parsed = parse_document("index", source);
        let list: Node = Element::new("ul")
            .with_child(Element::new("li").with_child(Node::text("one")).into())
            .with_child(Element::new("li").with_child(Node::text("two")).into())
            .into();
        assert_eq!(group_of(&parsed, 0).slots[0].body, vec![list]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("warning"), "Warning");
        assert_eq!(capitalize(""), "");
    }
}
