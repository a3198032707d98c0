//! Core wire types: entity ids, id sets, actions, asks, and responses.
//!
//! Everything here is serialized exactly the way the game server expects.
//! The JSON shapes are part of the protocol, so the tests at the bottom pin
//! them down one by one.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::marker::PhantomData;

use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A card, token, or ability on the stack.
///
/// Newtype over the raw integer the server assigns. `#[serde(transparent)]`
/// keeps it a plain number on the wire (`7`, not `{"0": 7}`), and a plain
/// string when used as an object key (`"7"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CardId(pub u64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// A seat at the table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unit of floating mana in a player's pool.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ManaId(pub u64);

/// Either a card or a player.
///
/// The wire carries no tag: which one it is depends on where the id is
/// used. Clicks from the UI arrive as `TargetId` and are narrowed with
/// [`as_card`](Self::as_card) or [`as_player`](Self::as_player) when the
/// context says so.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TargetId(pub u64);

impl TargetId {
    /// Reads this id as a card id.
    pub fn as_card(self) -> CardId {
        CardId(self.0)
    }

    /// Reads this id as a player id.
    pub fn as_player(self) -> PlayerId {
        PlayerId(self.0)
    }
}

impl From<CardId> for TargetId {
    fn from(card: CardId) -> Self {
        Self(card.0)
    }
}

impl From<PlayerId> for TargetId {
    fn from(player: PlayerId) -> Self {
        Self(player.0)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// IdSet: a set that travels as an object of nulls
// ---------------------------------------------------------------------------

/// An ordered set of ids.
///
/// The server encodes sets as objects whose keys are the members and whose
/// values are all `null`: `{"1": null, "2": null}`. That is what
/// `Serialize` produces. On input both that form and a plain array
/// (`[1, 2]`) are accepted, since older server builds send arrays for the
/// `items` of a pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSet<T> {
    ids: BTreeSet<T>,
}

impl<T: Ord> IdSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }

    pub fn contains(&self, id: &T) -> bool {
        self.ids.contains(id)
    }

    /// Adds `id`. Returns `true` if it was not already present.
    pub fn insert(&mut self, id: T) -> bool {
        self.ids.insert(id)
    }

    /// Removes `id`. Returns `true` if it was present.
    pub fn remove(&mut self, id: &T) -> bool {
        self.ids.remove(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates members in ascending order.
    pub fn iter(&self) -> std::collections::btree_set::Iter<'_, T> {
        self.ids.iter()
    }
}

impl<T: Ord> Default for IdSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for IdSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl<'a, T: Ord> IntoIterator for &'a IdSet<T> {
    type Item = &'a T;
    type IntoIter = std::collections::btree_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl<T: Ord> IntoIterator for IdSet<T> {
    type Item = T;
    type IntoIter = std::collections::btree_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<T: Ord + Serialize> Serialize for IdSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.ids.iter().map(|id| (id, ())))
    }
}

impl<'de, T> Deserialize<'de> for IdSet<T>
where
    T: Ord + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IdSetVisitor(PhantomData))
    }
}

struct IdSetVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for IdSetVisitor<T>
where
    T: Ord + Deserialize<'de>,
{
    type Value = IdSet<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of ids or an object whose keys are ids")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut ids = BTreeSet::new();
        while let Some(id) = seq.next_element()? {
            ids.insert(id);
        }
        Ok(IdSet { ids })
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut ids = BTreeSet::new();
        while let Some((id, IgnoredAny)) = map.next_entry()? {
            ids.insert(id);
        }
        Ok(IdSet { ids })
    }
}

// ---------------------------------------------------------------------------
// Action: what a player can do when they have priority
// ---------------------------------------------------------------------------

/// The data the client needs from a casting option.
///
/// The server sends more (zone, costs, filter, player); serde skips fields
/// it doesn't know, so only the anchor card and the castable flag are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastingOption {
    pub source_card: CardId,
    /// `false` when the server believes the player can't pay for the spell.
    /// Missing means castable.
    #[serde(default = "castable_by_default")]
    pub possible_to_take: bool,
}

fn castable_by_default() -> bool {
    true
}

/// One entry of an `Action` ask.
///
/// Externally tagged, matching the server: `{"PlayLand": 7}`,
/// `{"Cast": {"source_card": 7, ...}}`,
/// `{"ActivateAbility": {"source": 7, "index": 0}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Cast(CastingOption),
    PlayLand(CardId),
    ActivateAbility { source: CardId, index: usize },
}

impl Action {
    /// The card this action is drawn on. Clicking that card picks it.
    pub fn anchor(&self) -> CardId {
        match self {
            Self::Cast(option) => option.source_card,
            Self::PlayLand(card) => *card,
            Self::ActivateAbility { source, .. } => *source,
        }
    }

    /// Whether the action belongs in the clickable set. Only casts the
    /// server marked as unpayable are left out.
    pub fn is_offered(&self) -> bool {
        match self {
            Self::Cast(option) => option.possible_to_take,
            Self::PlayLand(_) | Self::ActivateAbility { .. } => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Ask: a pending request for player input
// ---------------------------------------------------------------------------

/// "Pick between `min` and `max` of these." Answered with indices into
/// `ents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskSelectN<T> {
    pub ents: Vec<T>,
    pub min: usize,
    pub max: usize,
}

/// The legal assignments for one attacker or blocker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Ord + Serialize",
    deserialize = "T: Ord + Deserialize<'de>"
))]
pub struct PairItem<T> {
    pub items: IdSet<T>,
    /// Inclusive.
    pub min: usize,
    /// Inclusive.
    pub max: usize,
}

/// Pairs each attacker (or blocker) with what it may be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Ord + Serialize",
    deserialize = "T: Ord + Deserialize<'de>"
))]
pub struct AskPair<T> {
    pub pairs: BTreeMap<CardId, PairItem<T>>,
}

/// A server request for a decision.
///
/// Externally tagged, so exactly one key names the variant:
/// `{"Attackers": {"pairs": {...}}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ask {
    /// Attacker → players/planeswalkers it may attack.
    Attackers(AskPair<TargetId>),
    /// Blocker → attackers it may block.
    Blockers(AskPair<CardId>),
    /// Cards in hand to discard down to maximum hand size.
    DiscardToHandSize(AskSelectN<CardId>),
    /// Priority: play a land, cast a spell, or activate an ability.
    Action(AskSelectN<Action>),
    /// Choose targets for a spell or ability.
    Target(AskSelectN<TargetId>),
}

impl Ask {
    pub fn kind(&self) -> AskKind {
        match self {
            Self::Attackers(_) => AskKind::Attackers,
            Self::Blockers(_) => AskKind::Blockers,
            Self::DiscardToHandSize(_) => AskKind::DiscardToHandSize,
            Self::Action(_) => AskKind::Action,
            Self::Target(_) => AskKind::Target,
        }
    }
}

/// The variant of an [`Ask`] without its payload. Used for logging and by
/// renderers that only need to know what kind of prompt to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AskKind {
    Action,
    Attackers,
    Blockers,
    Target,
    DiscardToHandSize,
}

impl fmt::Display for AskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action => write!(f, "Action"),
            Self::Attackers => write!(f, "Attackers"),
            Self::Blockers => write!(f, "Blockers"),
            Self::Target => write!(f, "Target"),
            Self::DiscardToHandSize => write!(f, "DiscardToHandSize"),
        }
    }
}

// ---------------------------------------------------------------------------
// Response: the client's answer
// ---------------------------------------------------------------------------

/// A completed answer to an [`Ask`], ready to be encoded.
///
/// `#[serde(untagged)]` writes just the inner value, because the server
/// already knows which ask it is waiting on:
/// - `Indices` → `[0, 2]` (Action, Target, DiscardToHandSize)
/// - `Attackers`/`Blockers` → `{"10": {"1": null}, "11": {}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Indices(Vec<usize>),
    Attackers(BTreeMap<CardId, IdSet<TargetId>>),
    Blockers(BTreeMap<CardId, IdSet<CardId>>),
}

impl Response {
    /// The explicit "do nothing" answer to a select-n ask: `[]`.
    pub fn pass() -> Self {
        Self::Indices(Vec::new())
    }
}

// =========================================================================
// Tests
// =========================================================================
