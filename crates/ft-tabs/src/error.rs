//! Errors raised while building tab groups.

/// Error raised for a malformed tab block.
///
/// Each variant is fatal to the block (or single tab) it was raised for; the
/// surrounding document still builds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TabsError {
    /// The block contains no tabs.
    #[error("{}", structure_message(*has_content))]
    Structure {
        /// Whether the block had content outside of any tab.
        has_content: bool,
    },
    /// Two tabs in the same group share a name.
    #[error("Duplicate tab name '{name}'. Each tab must have a unique name.")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },
    /// A tab argument could not be parsed.
    #[error("Invalid tab argument: {0}")]
    Validation(String),
    /// A `tab` directive appeared outside of a `filter-tabs` block.
    #[error("`tab` can only be used inside a `filter-tabs` directive.")]
    Misplaced,
}

fn structure_message(has_content: bool) -> &'static str {
    if has_content {
        "No tabs found inside `filter-tabs`. You must include at least one tab. \
         Some content was found, but it was not part of a tab."
    } else {
        "No tabs found inside `filter-tabs`. You must include at least one tab."
    }
}
