//! Wire protocol for Riposte.
//!
//! This crate defines what the game server and this client say to each
//! other:
//!
//! - **Types** ([`Ask`], [`Action`], [`Response`], ids): requests and
//!   answers as they appear on the wire.
//! - **Snapshot** ([`GameState`]): the parts of the game view the client
//!   reads.
//! - **Frames** ([`ServerFrame`], [`decode_frame`]): classification of
//!   inbound messages.
//! - **Codec** ([`Codec`], [`JsonCodec`]): text encoding.
//!
//! ```text
//! Transport (text) → Protocol (ServerFrame) → Selection (player answer)
//! ```

mod codec;
mod error;
mod frame;
mod snapshot;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use frame::{ServerFrame, decode_frame};
pub use snapshot::{CardView, GameState, PlayerView};
pub use types::{
    Action, Ask, AskKind, AskPair, AskSelectN, CardId, CastingOption, IdSet, ManaId,
    PairItem, PlayerId, Response, TargetId,
};
