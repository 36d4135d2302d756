//! Directive argument parsing.
//!
//! Arguments follow the directive name: `[content]{.class key="value"}`,
//! or free text instead of the bracketed content. `#id` tokens are accepted
//! and discarded.

use std::collections::HashMap;

/// Parsed arguments of a container directive line.
///
/// # Example
///
/// ```
/// use ft_tabs::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("Python (default)", r#".wide aria-label="Python 3""#);
/// assert_eq!(args.content, "Python (default)");
/// assert_eq!(args.classes, vec!["wide"]);
/// assert_eq!(args.get("aria-label"), Some("Python 3"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Bracketed or trailing text (empty if not provided).
    pub content: String,
    /// Classes from attributes: `{.a .b}`.
    pub classes: Vec<String>,
    /// Key-value attributes: `{key="value"}`.
    pub attrs: HashMap<String, String>,
}

impl DirectiveArgs {
    /// Parse content and the attribute string (without braces).
    #[must_use]
    pub fn parse(content: &str, attrs_str: &str) -> Self {
        let mut args = Self {
            content: content.trim().to_owned(),
            ..Default::default()
        };

        let mut remaining = attrs_str.trim();
        while !remaining.is_empty() {
            if let Some(rest) = remaining.strip_prefix('#') {
                remaining = split_token(rest).1;
            } else if let Some(rest) = remaining.strip_prefix('.') {
                let (class, rest) = split_token(rest);
                args.classes.push(class.to_owned());
                remaining = rest;
            } else if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.attrs.insert(key.to_owned(), value.to_owned());
                remaining = rest;
            } else {
                // Skip one unrecognized character
                let skip = remaining.chars().next().map_or(1, char::len_utf8);
                remaining = &remaining[skip..];
            }
            remaining = remaining.trim_start();
        }

        args
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}

/// Split an `#id` or `.class` token from the rest of the attribute string.
fn split_token(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| c.is_whitespace() || c == '.' || c == '#')
        .unwrap_or(s.len());
    (&s[..end], &s[end..])
}

/// Parse `key="value"`, `key='value'` or `key=value`.
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let eq_pos = s.find('=')?;
    let key = s[..eq_pos].trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    let after_eq = &s[eq_pos + 1..];
    for quote in ['"', '\''] {
        if let Some(stripped) = after_eq.strip_prefix(quote) {
            let end = stripped.find(quote)?;
            return Some((key, &stripped[..end], &stripped[end + 1..]));
        }
    }

    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
    Some((key, &after_eq[..end], &after_eq[end..]))
}
