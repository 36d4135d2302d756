//! Container directive line parsing.
//!
//! A container directive occupies a whole line: `::: name [content]{attrs}`
//! opens a container, a line of only colons (three or more) closes one.

use super::DirectiveArgs;

/// Container directive recognized on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContainerLine {
    /// Container opening: `::: name ...`.
    Start { name: String, args: DirectiveArgs },
    /// Container closing: `:::`.
    End,
}

/// Parse a whole line as a container directive.
///
/// Returns `None` if the line is not a container directive.
pub(crate) fn parse_container_line(line: &str) -> Option<ContainerLine> {
    let trimmed = line.trim();
    if !trimmed.starts_with(":::") {
        return None;
    }

    let colon_count = trimmed.chars().take_while(|&c| c == ':').count();
    let after_colons = trimmed[colon_count..].trim_start();
    if after_colons.is_empty() {
        return Some(ContainerLine::End);
    }

    let name_end = after_colons
        .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(after_colons.len());
    let name = &after_colons[..name_end];
    if !is_valid_directive_name(name) {
        return None;
    }

    let after_name = after_colons[name_end..].trim_start();
    let (content, consumed) = parse_delimited(after_name, '[', ']').unwrap_or_else(|| {
        // Free text up to the attribute block
        let end = after_name.find('{').unwrap_or(after_name.len());
        (&after_name[..end], end)
    });
    let after_content = after_name[consumed..].trim_start();
    let attrs = parse_delimited(after_content, '{', '}').map_or("", |(attrs, _)| attrs);

    Some(ContainerLine::Start {
        name: name.to_owned(),
        args: DirectiveArgs::parse(content, attrs),
    })
}

/// Valid names contain only alphanumeric characters, hyphens, and underscores.
fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Extract text between balanced delimiters at the start of `s`.
///
/// Returns the inner text and the number of bytes consumed.
fn parse_delimited(s: &str, open: char, close: char) -> Option<(&str, usize)> {
    if !s.starts_with(open) {
        return None;
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some((&s[open.len_utf8()..i], i + close.len_utf8()));
            }
        }
    }
    None
}
