//! Code fence tracking.
//!
//! Directive syntax inside fenced code blocks is content, not structure.

/// Open fence: marker character and run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenFence {
    marker: char,
    len: usize,
}

/// Tracks whether line-by-line processing is inside a fenced code block.
///
/// A fence opens with three or more backticks or tildes and closes with a
/// run of the same character at least as long, followed only by whitespace.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<OpenFence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed a line; returns `true` if it opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let Some((marker, len)) = marker_run(trimmed) else {
            return false;
        };

        match self.open {
            Some(open) => {
                let closes = marker == open.marker
                    && len >= open.len
                    && trimmed[len * marker.len_utf8()..].trim().is_empty();
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                self.open = Some(OpenFence { marker, len });
                true
            }
        }
    }
}

/// Leading run of three or more fence characters.
fn marker_run(trimmed: &str) -> Option<(char, usize)> {
    let marker = trimmed.chars().next().filter(|&c| c == '`' || c == '~')?;
    let len = trimmed.chars().take_while(|&c| c == marker).count();
    (len >= 3).then_some((marker, len))
}
