//! Click routing: one UI click in, an updated selection (and maybe a
//! committed response) out.

use riposte_protocol::{CardId, Response, TargetId};

use crate::state::{ActionChoice, SubsetChoice};
use crate::{SelectionError, SelectionState};

impl SelectionState {
    /// Routes a click on `id` to the live selection.
    ///
    /// Returns `Ok(Some(response))` when the click completes the answer; the
    /// state is then already reset to `None` and the caller must send the
    /// response. `Ok(None)` means the click was absorbed (or did nothing).
    ///
    /// # Errors
    /// `SelectionError::AmbiguousAction` if the clicked card carries more
    /// than one action. The selection is left untouched so the player can
    /// still pass with the commit key.
    pub fn click(&mut self, id: TargetId) -> Result<Option<Response>, SelectionError> {
        let response = match self {
            Self::None => None,
            Self::ActionChoice(choice) => pick_action(choice, id.as_card())?,
            Self::AttackersChoice(choice) => {
                if !choice.click(id) {
                    tracing::debug!(%id, "click ignored by attacker assignment");
                }
                None
            }
            Self::BlockersChoice(choice) => {
                if !choice.click(id) {
                    tracing::debug!(%id, "click ignored by blocker assignment");
                }
                None
            }
            Self::TargetChoice(choice) => pick_target(choice, id),
            Self::DiscardChoice(choice) => {
                if !choice.toggle(id.as_card()) {
                    tracing::debug!(%id, "click ignored by discard selection");
                }
                None
            }
        };

        if response.is_some() {
            self.reset();
        }
        Ok(response)
    }
}

fn pick_action(
    choice: &ActionChoice,
    card: CardId,
) -> Result<Option<Response>, SelectionError> {
    match choice.entries(card) {
        None => {
            tracing::debug!(%card, "no action on clicked card");
            Ok(None)
        }
        Some([entry]) => Ok(Some(Response::Indices(vec![entry.index]))),
        Some(entries) => Err(SelectionError::AmbiguousAction {
            card,
            offered: entries.len(),
        }),
    }
}

fn pick_target(choice: &mut SubsetChoice<TargetId>, id: TargetId) -> Option<Response> {
    if !choice.offers(&id) {
        tracing::debug!(%id, "clicked id is not a legal target");
        return None;
    }
    if choice.is_single() {
        return choice.index_of(&id).map(|index| Response::Indices(vec![index]));
    }
    choice.toggle(id);
    None
}
