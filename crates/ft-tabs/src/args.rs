//! Tab argument parsing.
//!
//! A tab argument is the tab name, optionally followed by a `(default)`
//! marker: `Python (default)`.

use std::sync::LazyLock;

use regex::Regex;

use crate::TabsError;

static DEFAULT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.*?)\s*\(\s*default\s*\)$").unwrap());

/// Parsed tab argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabArgument {
    /// Tab name with the default marker stripped.
    pub name: String,
    /// Whether the `(default)` marker was present.
    pub is_default: bool,
}

impl TabArgument {
    /// Parse a tab argument.
    ///
    /// Only the first line is considered. The `(default)` marker is matched
    /// case-insensitively and may contain inner whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// use ft_tabs::TabArgument;
    ///
    /// let arg = TabArgument::parse("Python ( DEFAULT )").unwrap();
    /// assert_eq!(arg.name, "Python");
    /// assert!(arg.is_default);
    /// ```
    pub fn parse(argument: &str) -> Result<Self, TabsError> {
        let first_line = argument.trim().lines().next().unwrap_or_default().trim();
        if first_line.is_empty() {
            return Err(TabsError::Validation(
                "Tab argument cannot be empty".to_owned(),
            ));
        }

        if let Some(caps) = DEFAULT_SUFFIX.captures(first_line) {
            let name = caps[1].trim();
            if name.is_empty() {
                return Err(TabsError::Validation("Tab name cannot be empty".to_owned()));
            }
            return Ok(Self {
                name: name.to_owned(),
                is_default: true,
            });
        }

        Ok(Self {
            name: first_line.to_owned(),
            is_default: false,
        })
    }
}
