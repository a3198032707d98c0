//! Selection state machine for Riposte.
//!
//! Turns a server [`Ask`](riposte_protocol::Ask) into a [`SelectionState`],
//! routes the player's clicks into it, and produces the
//! [`Response`](riposte_protocol::Response) once the answer is complete.
//!
//! # Lifecycle
//!
//! 1. [`SelectionState::open`] builds a live state from an ask, or resolves
//!    it immediately when nothing is on offer.
//! 2. [`SelectionState::click`] applies a click on a card or player id.
//! 3. [`SelectionState::commit`] handles the commit/cancel key.
//! 4. [`SelectionState::reset`] drops the partial answer, e.g. when a new
//!    snapshot arrives.
//!
//! Every step that yields a response leaves the state at
//! [`SelectionState::None`].

mod error;
mod response;
mod router;
mod state;
mod toggle;
mod view;

pub use error::SelectionError;
pub use state::{ActionChoice, ActionEntry, Opening, PairingChoice, SelectionState, SubsetChoice};
pub use toggle::Pickable;
pub use view::SelectionView;
