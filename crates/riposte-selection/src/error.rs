//! Error types for the selection layer.

use riposte_protocol::{AskKind, CardId};

/// Errors raised while building or driving a selection.
///
/// Clicks that simply don't do anything are not errors; they return
/// `Ok(None)` and leave the state as it was.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// More than one action is anchored on the clicked card. There is no
    /// way yet to ask the player which one they meant.
    #[error("{offered} actions are anchored on card {card}; choosing between them is unsupported")]
    AmbiguousAction { card: CardId, offered: usize },

    /// A `Target` ask arrived with nothing to target.
    #[error("target ask offers no targets")]
    NoTargets,

    /// No response the player could build would satisfy the bounds, e.g.
    /// `max == 0` for a target or `min` above the number offered.
    #[error("{kind} ask wants {min}..={max} of {offered} distinct ids; no answer fits")]
    UnsatisfiableBounds {
        kind: AskKind,
        min: usize,
        max: usize,
        offered: usize,
    },
}
