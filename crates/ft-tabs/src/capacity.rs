//! Tab count limits.

/// Tab count above which a group is reported as oversized.
pub const WARN_THRESHOLD: usize = 15;

/// Tab count above which style rules stop being generated.
pub const HARD_CAP: usize = 20;

/// Capacity classification of a tab group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// Within limits.
    Ok,
    /// Above [`WARN_THRESHOLD`], at most [`HARD_CAP`].
    Warn,
    /// Above [`HARD_CAP`]. All tabs still render; tabs at index
    /// [`HARD_CAP`] and later get no visibility rule.
    Capped,
}

impl Capacity {
    /// Classify a group by its tab count.
    #[must_use]
    pub fn classify(count: usize) -> Self {
        if count > HARD_CAP {
            Self::Capped
        } else if count > WARN_THRESHOLD {
            Self::Warn
        } else {
            Self::Ok
        }
    }
}
