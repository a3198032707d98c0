//! The client-side store: cached snapshot plus the live selection.
//!
//! [`Engine`] is plain synchronous state. The event loop in
//! [`client`](crate::client) feeds it frames and UI events one at a time
//! and sends whatever responses come out.

use riposte_protocol::{
    Codec, GameState, JsonCodec, Response, ServerFrame, TargetId, decode_frame,
};
use riposte_selection::{Opening, SelectionState, SelectionView};

use crate::RiposteError;
use crate::config::COMMIT_KEY;

/// Owns everything the client knows about the game.
#[derive(Debug)]
pub struct Engine<C: Codec = JsonCodec> {
    codec: C,
    commit_key: u32,
    snapshot: Option<GameState>,
    selection: SelectionState,
}

impl Engine<JsonCodec> {
    pub fn new() -> Self {
        Self::with_codec(JsonCodec)
    }
}

impl Default for Engine<JsonCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Codec> Engine<C> {
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec,
            commit_key: COMMIT_KEY,
            snapshot: None,
            selection: SelectionState::None,
        }
    }

    /// Sets the key code that acts as commit/cancel.
    pub fn commit_key(mut self, code: u32) -> Self {
        self.commit_key = code;
        self
    }

    /// Handles one inbound text frame.
    ///
    /// A snapshot replaces the cached one and cancels any live selection
    /// without sending anything. An ask replaces the live selection; if it
    /// offers nothing to choose, the automatic answer is returned right
    /// away.
    ///
    /// # Errors
    /// `Protocol` for undecodable or unanswerable frames, `Selection` if
    /// the ask can't be turned into a selection. The engine state is left
    /// as it was.
    pub fn receive(&mut self, text: &str) -> Result<Option<Response>, RiposteError> {
        match decode_frame(&self.codec, text)? {
            ServerFrame::GameState(state) => {
                if let Some(kind) = self.selection.kind() {
                    tracing::info!(%kind, "new snapshot cancels pending selection");
                }
                self.selection.reset();
                self.snapshot = Some(state);
                Ok(None)
            }
            ServerFrame::AskUser(ask) => {
                let kind = ask.kind();
                match SelectionState::open(ask)? {
                    Opening::Live(selection) => {
                        tracing::debug!(%kind, "awaiting player input");
                        self.selection = selection;
                        Ok(None)
                    }
                    Opening::Resolved(response) => {
                        tracing::info!(%kind, "nothing to choose, answering automatically");
                        self.selection.reset();
                        Ok(Some(response))
                    }
                }
            }
        }
    }

    /// Handles a click on a card or player.
    ///
    /// Ids absent from the cached snapshot are ignored.
    pub fn click(&mut self, id: TargetId) -> Result<Option<Response>, RiposteError> {
        if let Some(snapshot) = &self.snapshot {
            if !snapshot.contains(id) {
                tracing::debug!(%id, "click on id not in snapshot");
                return Ok(None);
            }
        }
        Ok(self.selection.click(id)?)
    }

    /// Handles a key press. Only the commit key does anything.
    pub fn key(&mut self, code: u32) -> Option<Response> {
        if code != self.commit_key {
            tracing::trace!(code, "ignoring key");
            return None;
        }
        self.selection.commit()
    }

    /// Encodes a response for the wire.
    pub fn encode(&self, response: &Response) -> Result<String, RiposteError> {
        Ok(self.codec.encode(response)?)
    }

    pub fn snapshot(&self) -> Option<&GameState> {
        self.snapshot.as_ref()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// What the renderer should highlight right now.
    pub fn view(&self) -> SelectionView {
        self.selection.view()
    }
}
