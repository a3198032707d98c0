//! Response serialization and the commit/cancel key.
//!
//! Turns a selection into the exact [`Response`] shape the server expects
//! for its ask. Pairing answers keep every key, with an empty set when
//! nothing was assigned; omitting a key means something different to the
//! server.

use riposte_protocol::{IdSet, Response, TargetId};

use crate::SelectionState;
use crate::state::SubsetChoice;
use crate::toggle::Pickable;

impl<T: Pickable> SubsetChoice<T> {
    /// The chosen ids as ascending indices into `ents`.
    pub fn indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .response()
            .iter()
            .filter_map(|id| self.index_of(id))
            .collect();
        indices.sort_unstable();
        indices
    }
}

impl SelectionState {
    /// Handles the commit/cancel key.
    ///
    /// - `None`: ignored.
    /// - `ActionChoice`: passes with `[]`.
    /// - `AttackersChoice`/`BlockersChoice`: sends the assignment as it
    ///   stands, empty sets included.
    /// - `TargetChoice`/`DiscardChoice`: sends the chosen indices if the
    ///   count is within bounds, otherwise ignored. A single-target ask is
    ///   never skippable this way.
    ///
    /// When a response is returned the state has been reset to `None`.
    pub fn commit(&mut self) -> Option<Response> {
        let response = match self {
            Self::None => None,
            Self::ActionChoice(_) => Some(Response::pass()),
            Self::AttackersChoice(choice) => Some(Response::Attackers(choice.response().clone())),
            Self::BlockersChoice(choice) => Some(Response::Blockers(choice.response().clone())),
            Self::TargetChoice(choice) => committed_indices(choice),
            Self::DiscardChoice(choice) => committed_indices(choice),
        };

        if response.is_some() {
            self.reset();
        }
        response
    }

    /// The ids picked so far, across every key for pairing choices. Used to
    /// highlight a partial answer.
    pub fn chosen(&self) -> IdSet<TargetId> {
        match self {
            Self::None | Self::ActionChoice(_) => IdSet::new(),
            Self::AttackersChoice(choice) => choice
                .response()
                .values()
                .flat_map(|set| set.iter().map(|id| id.as_target()))
                .collect(),
            Self::BlockersChoice(choice) => choice
                .response()
                .values()
                .flat_map(|set| set.iter().map(|id| id.as_target()))
                .collect(),
            Self::TargetChoice(choice) => choice.response().iter().map(|id| id.as_target()).collect(),
            Self::DiscardChoice(choice) => choice.response().iter().map(|id| id.as_target()).collect(),
        }
    }
}

fn committed_indices<T: Pickable>(choice: &SubsetChoice<T>) -> Option<Response> {
    if choice.can_commit() {
        Some(Response::Indices(choice.indices()))
    } else {
        tracing::debug!(
            chosen = choice.response().len(),
            "commit key ignored, selection out of bounds"
        );
        None
    }
}
