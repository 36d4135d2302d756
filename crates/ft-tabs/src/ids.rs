//! Identifier allocation for resolved tab groups.
//!
//! Every group of a document receives a `group_id` from the document's
//! [`ResolutionContext`]; all element identifiers of the group are derived
//! from it by an [`IdNamespace`].

/// Per-document group identifier allocator.
///
/// Created fresh for each resolution pass, so resolving the same document
/// twice yields the same identifiers.
#[derive(Debug)]
pub struct ResolutionContext {
    key: String,
    counter: usize,
}

impl ResolutionContext {
    /// Create a context for the document with the given key.
    #[must_use]
    pub fn new(document_key: &str) -> Self {
        Self {
            key: sanitize_key(document_key),
            counter: 0,
        }
    }

    /// Allocate the namespace for the next group of this document.
    pub fn next_group(&mut self) -> IdNamespace {
        self.counter += 1;
        IdNamespace {
            group_id: format!("group-{}-{}", self.key, self.counter),
        }
    }
}

/// Identifier namespace of one tab group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdNamespace {
    group_id: String,
}

impl IdNamespace {
    /// Group identifier.
    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    #[must_use]
    pub fn radio_id(&self, index: usize) -> String {
        format!("{}-radio-{index}", self.group_id)
    }

    #[must_use]
    pub fn panel_id(&self, index: usize) -> String {
        format!("{}-panel-{index}", self.group_id)
    }

    #[must_use]
    pub fn desc_id(&self, index: usize) -> String {
        format!("{}-desc-{index}", self.group_id)
    }

    #[must_use]
    pub fn label_id(&self, index: usize) -> String {
        format!("{}-label-{index}", self.group_id)
    }

    #[must_use]
    pub fn legend_id(&self) -> String {
        format!("{}-legend", self.group_id)
    }
}

/// Make a document key safe for use inside an element identifier.
fn sanitize_key(key: &str) -> String {
    let sanitized: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if sanitized.is_empty() {
        "doc".to_owned()
    } else {
        sanitized
    }
}
