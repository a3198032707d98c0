//! What the renderer needs to draw the current selection.

use riposte_protocol::{AskKind, CardId, IdSet, TargetId};
use serde::Serialize;

use crate::SelectionState;

/// Snapshot of a selection for display. Cheap to clone; published on every
/// change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionView {
    /// The ask being answered, `None` when idle.
    pub kind: Option<AskKind>,
    /// Ids a click on which would currently change something.
    pub selectable: IdSet<TargetId>,
    /// Attacker or blocker waiting for its second click.
    pub selected: Option<CardId>,
    /// Ids already in the partial response.
    pub partial: IdSet<TargetId>,
}

impl SelectionState {
    pub fn view(&self) -> SelectionView {
        let (selectable, selected) = match self {
            Self::None => (IdSet::new(), None),
            Self::ActionChoice(choice) => (choice.cards().map(TargetId::from).collect(), None),
            Self::AttackersChoice(choice) => (
                pairing_selectable(choice.pairs().keys().copied(), choice.toggleable()),
                choice.selected(),
            ),
            Self::BlockersChoice(choice) => (
                pairing_selectable(choice.pairs().keys().copied(), choice.toggleable()),
                choice.selected(),
            ),
            Self::TargetChoice(choice) => (choice.toggleable().into_iter().collect(), None),
            Self::DiscardChoice(choice) => (choice.toggleable().into_iter().collect(), None),
        };

        SelectionView {
            kind: self.kind(),
            selectable,
            selected,
            partial: self.chosen(),
        }
    }
}

// Keys are always clickable (select or deselect); items only while a key is
// selected and has room.
fn pairing_selectable(
    keys: impl Iterator<Item = CardId>,
    items: Vec<TargetId>,
) -> IdSet<TargetId> {
    keys.map(TargetId::from).chain(items).collect()
}
