//! The slice of the game-state snapshot this client reads.
//!
//! The server sends the full game view: phases, stack, zones, abilities,
//! and so on. Only the fields below are kept; serde ignores the rest.
//! They exist so clicks can be checked against ids the server currently
//! knows about, and so a front end has something to draw.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CardId, IdSet, ManaId, PlayerId, TargetId};

/// A card as seen by the viewing player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardView {
    pub name: String,
    pub art_url: Option<String>,
    pub tapped: bool,
    pub controller: Option<PlayerId>,
    /// The player or planeswalker this card is attacking, if any.
    pub attacking: Option<TargetId>,
    pub blocking: Vec<CardId>,
}

/// A player's public (and, for the viewer, private) zones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerView {
    pub name: String,
    pub life: i64,
    pub hand: Vec<CardId>,
    pub library: Vec<CardId>,
    pub graveyard: Vec<CardId>,
    pub mana_pool: IdSet<ManaId>,
}

/// A full snapshot of the game from one player's seat.
///
/// Every snapshot replaces the previous one wholesale; nothing is merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    /// The player this snapshot was rendered for.
    pub player: Option<PlayerId>,
    pub cards: BTreeMap<CardId, CardView>,
    pub players: BTreeMap<PlayerId, PlayerView>,
}

impl GameState {
    /// Returns `true` if `id` names a card or a player in this snapshot.
    pub fn contains(&self, id: TargetId) -> bool {
        self.cards.contains_key(&id.as_card()) || self.players.contains_key(&id.as_player())
    }

    pub fn card(&self, id: CardId) -> Option<&CardView> {
        self.cards.get(&id)
    }

    pub fn player_view(&self, id: PlayerId) -> Option<&PlayerView> {
        self.players.get(&id)
    }
}
