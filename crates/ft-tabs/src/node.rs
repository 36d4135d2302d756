//! Typed document tree.
//!
//! A [`Document`] is a list of [`Node`]s. Tab blocks enter the tree as
//! [`Node::TabGroup`] (the neutral container) and leave it during resolution,
//! replaced either by a [`Node::Tabs`] widget or by plain fallback sections.

/// Ordered attribute list; order is preserved in rendered output.
pub type Attrs = Vec<(String, String)>;

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Plain text.
    Text(String),
    /// Author markup passed through unchanged by HTML output.
    Raw(String),
    /// Generic element (`p`, `em`, `pre`, `details`, ...).
    Element(Element),
    /// Titled section: admonitions and fallback tab panels.
    Section(Section),
    /// Unresolved tab block.
    TabGroup(TabGroup),
    /// A single tab. Only valid as a child of a [`TabGroup`].
    TabSlot(TabSlot),
    /// Interactively resolved tab block.
    Tabs(TabsWidget),
}

impl Node {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a raw markup node.
    pub fn raw(markup: impl Into<String>) -> Self {
        Self::Raw(markup.into())
    }

    /// Child lists of this node, in document order.
    ///
    /// A tab group exposes its general content followed by every slot body.
    pub fn child_lists(&self) -> Vec<&[Node]> {
        match self {
            Self::Text(_) | Self::Raw(_) => Vec::new(),
            Self::Element(element) => vec![element.children.as_slice()],
            Self::Section(section) => vec![section.children.as_slice()],
            Self::TabSlot(slot) => vec![slot.body.as_slice()],
            Self::TabGroup(group) => {
                let mut lists = vec![group.general.as_slice()];
                lists.extend(group.slots.iter().map(|slot| slot.body.as_slice()));
                lists
            }
            Self::Tabs(widget) => widget.panels.iter().map(|p| p.body.as_slice()).collect(),
        }
    }

    /// Mutable child lists of this node, in the same order as [`Node::child_lists`].
    pub fn child_lists_mut(&mut self) -> Vec<&mut Vec<Node>> {
        match self {
            Self::Text(_) | Self::Raw(_) => Vec::new(),
            Self::Element(element) => vec![&mut element.children],
            Self::Section(section) => vec![&mut section.children],
            Self::TabSlot(slot) => vec![&mut slot.body],
            Self::TabGroup(group) => {
                let mut lists = vec![&mut group.general];
                lists.extend(group.slots.iter_mut().map(|slot| &mut slot.body));
                lists
            }
            Self::Tabs(widget) => widget.panels.iter_mut().map(|p| &mut p.body).collect(),
        }
    }

    /// Visit this node and all descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for list in self.child_lists() {
            for child in list {
                child.walk(visit);
            }
        }
    }

    /// Concatenated text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |node| {
            if let Self::Text(text) = node {
                out.push_str(text);
            }
        });
        out
    }
}

/// Generic element with ordered attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub tag: String,
    /// Attributes in output order.
    pub attrs: Attrs,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// Titled section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Section title, rendered as a heading paragraph.
    pub title: Option<String>,
    /// Classes (`note`, `collapsible`, `expanded`, ...).
    pub classes: Vec<String>,
    /// Section body.
    pub children: Vec<Node>,
}

impl Section {
    /// Create a section with a title and body.
    #[must_use]
    pub fn titled(title: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            title: Some(title.into()),
            classes: Vec::new(),
            children,
        }
    }

    /// Check whether the section carries a class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// One named tab of a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabSlot {
    /// Display name, unique within the group.
    pub name: String,
    /// Whether this tab is selected initially.
    pub is_default: bool,
    /// Accessible label override for the selector.
    pub aria_label: Option<String>,
    /// Tab body.
    pub body: Vec<Node>,
}

impl TabSlot {
    /// Create a tab with the given name and body.
    #[must_use]
    pub fn new(name: impl Into<String>, body: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            body,
            ..Default::default()
        }
    }

    /// Mark the tab as default.
    #[must_use]
    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Set the accessible label.
    #[must_use]
    pub fn with_aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }
}

/// Format-neutral tab block, awaiting resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabGroup {
    /// Explicit legend text. Inferred from tab names when absent.
    pub legend: Option<String>,
    /// Content shown regardless of the selected tab.
    pub general: Vec<Node>,
    /// Tabs in authoring order.
    pub slots: Vec<TabSlot>,
}

impl TabGroup {
    /// Tab names in authoring order.
    pub fn names(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.name.as_str()).collect()
    }

    /// Index of the first tab marked default, or 0.
    #[must_use]
    pub fn default_index(&self) -> usize {
        self.slots
            .iter()
            .position(|slot| slot.is_default)
            .unwrap_or(0)
    }
}

/// Interactive rendering of a tab group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabsWidget {
    /// Group identifier, also the radio input `name`.
    pub group_id: String,
    /// Identifier of the legend element.
    pub legend_id: String,
    /// Legend text.
    pub legend: String,
    /// One selector per tab.
    pub selectors: Vec<ResolvedSelector>,
    /// General panel (if any) followed by one panel per tab.
    pub panels: Vec<ResolvedPanel>,
}

/// Radio selector for one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelector {
    /// Tab name, used as the label text.
    pub name: String,
    /// Zero-based tab index.
    pub tab_index: usize,
    /// Group identifier.
    pub group_id: String,
    /// Radio input identifier.
    pub radio_id: String,
    /// Label element identifier.
    pub label_id: String,
    /// Screen-reader description identifier.
    pub desc_id: String,
    /// Controlled panel identifier.
    pub panel_id: String,
    /// Screen-reader description text.
    pub description: String,
    /// Accessible label override.
    pub aria_label: Option<String>,
    /// Whether the radio is initially checked.
    pub checked: bool,
}

/// Content panel of a resolved widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPanel {
    /// Panel role.
    pub kind: PanelKind,
    /// Panel body.
    pub body: Vec<Node>,
}

/// Role of a panel within a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelKind {
    /// Always-visible general content.
    General,
    /// Content shown when the matching selector is checked.
    Tab {
        /// Panel identifier.
        panel_id: String,
        /// Zero-based tab index.
        tab_index: usize,
        /// Slug of the tab name.
        slug: String,
        /// Identifier of the radio input labelling this panel.
        labelled_by: String,
    },
}

/// A resolvable document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Document key (source path without extension, `/`-separated).
    pub key: String,
    /// Top-level nodes.
    pub children: Vec<Node>,
}

impl Document {
    /// Create a document.
    #[must_use]
    pub fn new(key: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            key: key.into(),
            children,
        }
    }

    /// Visit every node in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Count nodes matching a predicate.
    pub fn count(&self, predicate: impl Fn(&Node) -> bool) -> usize {
        let mut count = 0;
        self.walk(&mut |node| {
            if predicate(node) {
                count += 1;
            }
        });
        count
    }
}

/// Paragraph with a single text child.
#[cfg(test)]
pub(crate) fn para(text: &str) -> Node {
    Element::new("p").with_child(Node::text(text)).into()
}
