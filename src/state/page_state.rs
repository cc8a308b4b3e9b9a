//! Outcome definitions for listing pages and product items
use std::fmt;

/// How processing of one listing page ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Page loaded and at least one product link was collected
    Loaded,

    /// Page loaded but contained no product links
    Empty,

    /// No catalog card appeared before the selector timeout
    TimedOut,

    /// Navigation failed or an error occurred while processing the page
    Failed,
}

impl PageState {
    /// Returns true if the page counts as failed in the run statistics
    pub fn is_error(&self) -> bool {
        matches!(self, Self::TimedOut | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loaded => "loaded",
            Self::Empty => "empty",
            Self::TimedOut => "timed_out",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one product link was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemState {
    /// The detail page loaded and a record was appended
    Saved,

    /// The link was dispatched earlier in the run and was not visited again
    AlreadySeen,

    /// Every load attempt failed; no record was produced
    Skipped,
}

impl ItemState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::AlreadySeen => "already_seen",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
