//! Gesture lifecycle states and the legal transitions between them.
//!
//! ```text
//! Possible ──► Failed
//! Possible ──► Recognized
//! Possible ──► Began ──► Changed* ──► Ended | Cancelled
//! ```
//!
//! `Possible` is only re-entered through a reset, once the recognizer has no
//! mouse button down and no touch active.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// State of one gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureState {
    /// Idle; watching input for the start of a gesture.
    #[default]
    Possible,
    /// The input cannot be this gesture.
    Failed,
    /// A continuous gesture has started.
    Began,
    /// A continuous gesture has updated its parameters.
    Changed,
    /// A continuous gesture was cancelled by the input source.
    Cancelled,
    /// A continuous gesture finished normally.
    Ended,
    /// A discrete gesture completed.
    Recognized,
}

impl GestureState {
    /// A continuous gesture is in progress.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }

    /// The gesture has claimed its input (discrete or continuous).
    #[must_use]
    pub fn has_recognized(self) -> bool {
        matches!(self, Self::Recognized | Self::Began | Self::Changed)
    }

    /// The gesture lifecycle is over; the recognizer resets once input ends.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Failed | Self::Cancelled | Self::Ended | Self::Recognized)
    }

    /// Whether a request to move from `self` to `next` is legal.
    ///
    /// Entry into `Began`/`Recognized` is additionally subject to arbitration.
    #[must_use]
    pub fn can_transition_to(self, next: GestureState) -> bool {
        match next {
            Self::Possible => false,
            Self::Failed | Self::Began | Self::Recognized => self == Self::Possible,
            Self::Changed | Self::Cancelled | Self::Ended => self.is_active(),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Possible => "possible",
            Self::Failed => "failed",
            Self::Began => "began",
            Self::Changed => "changed",
            Self::Cancelled => "cancelled",
            Self::Ended => "ended",
            Self::Recognized => "recognized",
        }
    }
}

impl fmt::Display for GestureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
