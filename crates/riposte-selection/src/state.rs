//! Selection state: the player's in-progress answer to the current ask.
//!
//! Exactly one [`SelectionState`] is live at a time. It is created only by
//! [`SelectionState::open`] from an incoming [`Ask`], and goes back to
//! [`SelectionState::None`] when a response is committed or a new snapshot
//! arrives.
//!
//! ```text
//!            open(ask)                 click / commit key
//! None ─────────────────→ *Choice ─────────────────────→ None + Response
//!   ↑                        │
//!   └────── new snapshot ────┘
//! ```

use std::collections::BTreeMap;

use riposte_protocol::{
    Action, Ask, AskKind, AskPair, AskSelectN, CardId, IdSet, PairItem, Response, TargetId,
};

use crate::SelectionError;
use crate::toggle::{Pickable, can_toggle, toggle_bounded};

// ---------------------------------------------------------------------------
// ActionChoice
// ---------------------------------------------------------------------------

/// One offered action and its position in the ask's `ents`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub action: Action,
    /// Index into the full `ents`, which is what the server expects
    /// back, even when other entries were filtered out.
    pub index: usize,
}

/// The offered actions, grouped by the card each one is anchored on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionChoice {
    index_by_card: BTreeMap<CardId, Vec<ActionEntry>>,
}

impl ActionChoice {
    /// Groups `ents` by anchor card. Casts the server marked as not
    /// possible to take are left out of the clickable set.
    pub fn from_ask(ask: &AskSelectN<Action>) -> Self {
        let mut index_by_card: BTreeMap<CardId, Vec<ActionEntry>> = BTreeMap::new();
        for (index, action) in ask.ents.iter().enumerate() {
            if !action.is_offered() {
                tracing::debug!(index, card = %action.anchor(), "skipping uncastable action");
                continue;
            }
            index_by_card
                .entry(action.anchor())
                .or_default()
                .push(ActionEntry {
                    action: action.clone(),
                    index,
                });
        }
        Self { index_by_card }
    }

    /// The actions anchored on `card`, if any.
    pub fn entries(&self, card: CardId) -> Option<&[ActionEntry]> {
        self.index_by_card.get(&card).map(Vec::as_slice)
    }

    /// Cards that have at least one action.
    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.index_by_card.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.index_by_card.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PairingChoice: attackers and blockers
// ---------------------------------------------------------------------------

/// Two-click assignment: pick an attacker (or blocker), then pick what it
/// is assigned to.
///
/// `T` is what each key may be assigned to: [`TargetId`] for attackers
/// (players or planeswalkers), [`CardId`] for blockers (attackers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingChoice<T> {
    pairs: BTreeMap<CardId, PairItem<T>>,
    response: BTreeMap<CardId, IdSet<T>>,
    selected: Option<CardId>,
}

impl<T: Pickable> PairingChoice<T> {
    /// Starts with every key present and nothing assigned.
    pub fn new(ask: AskPair<T>) -> Self {
        let response = ask.pairs.keys().map(|key| (*key, IdSet::new())).collect();
        Self {
            pairs: ask.pairs,
            response,
            selected: None,
        }
    }

    pub fn pairs(&self) -> &BTreeMap<CardId, PairItem<T>> {
        &self.pairs
    }

    /// The assignment so far. Every key of [`pairs`](Self::pairs) is
    /// present, possibly with an empty set.
    pub fn response(&self) -> &BTreeMap<CardId, IdSet<T>> {
        &self.response
    }

    /// The attacker (or blocker) waiting for its second click.
    pub fn selected(&self) -> Option<CardId> {
        self.selected
    }

    /// Applies one click. Returns `true` if anything changed.
    ///
    /// A click on a key selects it, or clears the selection if it was
    /// already selected. Otherwise, with a key selected, a click on one of
    /// its legal items toggles that item (within `max`) and clears the
    /// selection. Everything else is ignored.
    pub(crate) fn click(&mut self, id: TargetId) -> bool {
        let key = id.as_card();
        if self.pairs.contains_key(&key) {
            self.selected = if self.selected == Some(key) {
                None
            } else {
                Some(key)
            };
            return true;
        }

        let Some(selected) = self.selected else {
            return false;
        };
        let (Some(item), Some(chosen)) =
            (self.pairs.get(&selected), self.response.get_mut(&selected))
        else {
            return false;
        };
        let candidate = T::from_click(id);
        if toggle_bounded(chosen, candidate, item.items.contains(&candidate), item.max) {
            self.selected = None;
            true
        } else {
            false
        }
    }

    /// Items of the selected key that a click would currently toggle.
    pub(crate) fn toggleable(&self) -> Vec<TargetId> {
        let Some(selected) = self.selected else {
            return Vec::new();
        };
        let (Some(item), Some(chosen)) = (self.pairs.get(&selected), self.response.get(&selected))
        else {
            return Vec::new();
        };
        item.items
            .iter()
            .filter(|id| can_toggle(chosen, *id, item.max))
            .map(|id| id.as_target())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// SubsetChoice: targets and discards
// ---------------------------------------------------------------------------

/// Choose a subset of `ents` whose size lies within bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetChoice<T> {
    ents: Vec<T>,
    min: usize,
    max: usize,
    /// Smallest response the commit key will send.
    floor: usize,
    response: IdSet<T>,
}

impl<T: Pickable> SubsetChoice<T> {
    fn new(ask: AskSelectN<T>, floor: usize) -> Self {
        Self {
            ents: ask.ents,
            min: ask.min,
            max: ask.max,
            floor,
            response: IdSet::new(),
        }
    }

    pub fn ents(&self) -> &[T] {
        &self.ents
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.min, self.max)
    }

    pub fn response(&self) -> &IdSet<T> {
        &self.response
    }

    /// `true` for the "pick exactly one" form, answered on the first click.
    pub fn is_single(&self) -> bool {
        self.min == 1 && self.max == 1
    }

    pub fn offers(&self, id: &T) -> bool {
        self.ents.contains(id)
    }

    /// Position of `id` in `ents`; the first one if it is listed twice.
    pub fn index_of(&self, id: &T) -> Option<usize> {
        self.ents.iter().position(|ent| ent == id)
    }

    /// Whether the commit key would send the current response.
    pub fn can_commit(&self) -> bool {
        let n = self.response.len();
        n >= self.floor && n <= self.max
    }

    /// Passes the choice through if some reachable response would pass
    /// [`can_commit`](Self::can_commit).
    fn into_live(self, kind: AskKind) -> Result<Self, SelectionError> {
        let offered = self.ents.iter().copied().collect::<IdSet<T>>().len();
        if self.floor <= self.max.min(offered) {
            return Ok(self);
        }
        Err(SelectionError::UnsatisfiableBounds {
            kind,
            min: self.min,
            max: self.max,
            offered,
        })
    }

    /// Toggles `id` within `max`. Returns `true` if anything changed.
    pub(crate) fn toggle(&mut self, id: T) -> bool {
        let legal = self.offers(&id);
        toggle_bounded(&mut self.response, id, legal, self.max)
    }

    pub(crate) fn toggleable(&self) -> Vec<TargetId> {
        self.ents
            .iter()
            .filter(|id| can_toggle(&self.response, *id, self.max))
            .map(|id| id.as_target())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// SelectionState
// ---------------------------------------------------------------------------

/// The current interaction. `None` means nothing is being asked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    None,
    ActionChoice(ActionChoice),
    AttackersChoice(PairingChoice<TargetId>),
    BlockersChoice(PairingChoice<CardId>),
    TargetChoice(SubsetChoice<TargetId>),
    DiscardChoice(SubsetChoice<CardId>),
}

/// What opening an ask produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opening {
    /// The player has something to choose.
    Live(SelectionState),
    /// Nothing was offered; send this right away without showing a prompt.
    Resolved(Response),
}

impl SelectionState {
    /// Translates an ask into a live selection, or auto-resolves it when
    /// the server offered nothing to choose from.
    ///
    /// # Errors
    /// - `SelectionError::NoTargets` for a `Target` ask with empty `ents`.
    /// - `SelectionError::UnsatisfiableBounds` for a `Target` or
    ///   `DiscardToHandSize` ask no response could ever complete.
    pub fn open(ask: Ask) -> Result<Opening, SelectionError> {
        let opening = match ask {
            Ask::Action(select) => {
                let choice = ActionChoice::from_ask(&select);
                if choice.is_empty() {
                    Opening::Resolved(Response::pass())
                } else {
                    Opening::Live(Self::ActionChoice(choice))
                }
            }
            Ask::Attackers(pair) => {
                if pair.pairs.is_empty() {
                    Opening::Resolved(Response::Attackers(BTreeMap::new()))
                } else {
                    Opening::Live(Self::AttackersChoice(PairingChoice::new(pair)))
                }
            }
            Ask::Blockers(pair) => {
                if pair.pairs.is_empty() {
                    Opening::Resolved(Response::Blockers(BTreeMap::new()))
                } else {
                    Opening::Live(Self::BlockersChoice(PairingChoice::new(pair)))
                }
            }
            Ask::Target(select) => {
                if select.ents.is_empty() {
                    return Err(SelectionError::NoTargets);
                }
                // An empty answer is never valid once something is targetable.
                let floor = select.min.max(1);
                let choice = SubsetChoice::new(select, floor).into_live(AskKind::Target)?;
                Opening::Live(Self::TargetChoice(choice))
            }
            Ask::DiscardToHandSize(select) => {
                if select.ents.is_empty() {
                    Opening::Resolved(Response::pass())
                } else {
                    let floor = select.min;
                    let choice = SubsetChoice::new(select, floor)
                        .into_live(AskKind::DiscardToHandSize)?;
                    Opening::Live(Self::DiscardChoice(choice))
                }
            }
        };
        Ok(opening)
    }

    /// The kind of ask being answered, or `None` when idle.
    pub fn kind(&self) -> Option<AskKind> {
        match self {
            Self::None => None,
            Self::ActionChoice(_) => Some(AskKind::Action),
            Self::AttackersChoice(_) => Some(AskKind::Attackers),
            Self::BlockersChoice(_) => Some(AskKind::Blockers),
            Self::TargetChoice(_) => Some(AskKind::Target),
            Self::DiscardChoice(_) => Some(AskKind::DiscardToHandSize),
        }
    }

    pub fn is_live(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Drops the current interaction, discarding any partial answer.
    pub fn reset(&mut self) {
        *self = Self::None;
    }
}
