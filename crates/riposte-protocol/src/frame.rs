//! Inbound frame classification.
//!
//! Every message from the server is one JSON object with exactly one key:
//! `{"GameState": ...}` for a snapshot, `{"AskUser": ...}` for a request.
//! [`decode_frame`] turns raw text into a [`ServerFrame`] and rejects
//! anything else.

use serde::{Deserialize, Serialize};

use crate::{Ask, Codec, GameState, ProtocolError};

/// One inbound message, already classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerFrame {
    /// A fresh game view. Supersedes any pending ask.
    GameState(GameState),
    /// A request for player input.
    AskUser(Ask),
}

/// Decodes and classifies one text frame.
///
/// # Errors
/// - `ProtocolError::Decode` if the text is not a known frame shape.
/// - `ProtocolError::InvalidMessage` if it parses but can't be answered,
///   i.e. a `Target` ask with nothing to target.
pub fn decode_frame<C: Codec>(codec: &C, text: &str) -> Result<ServerFrame, ProtocolError> {
    let frame: ServerFrame = codec.decode(text)?;
    if let ServerFrame::AskUser(Ask::Target(select)) = &frame {
        if select.ents.is_empty() {
            return Err(ProtocolError::InvalidMessage(
                "Target ask offers no targets".into(),
            ));
        }
    }
    tracing::trace!(kind = frame_label(&frame), "decoded frame");
    Ok(frame)
}

fn frame_label(frame: &ServerFrame) -> &'static str {
    match frame {
        ServerFrame::GameState(_) => "GameState",
        ServerFrame::AskUser(_) => "AskUser",
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{AskKind, CardId, JsonCodec};

    #[test]
    fn test_decode_game_state_frame() {
        let frame = decode_frame(
            &JsonCodec,
            r#"{"GameState": {"player": 1, "cards": {"300": {"name": "Plains"}}, "players": {}}}"#,
        )
        .unwrap();
        let ServerFrame::GameState(state) = frame else {
            panic!("expected GameState");
        };
        assert!(state.card(CardId(300)).is_some());
    }

    #[test]
    fn test_decode_ask_frame() {
        let frame = decode_frame(
            &JsonCodec,
            r#"{"AskUser": {"Target": {"ents": [4, 9], "min": 1, "max": 1}}}"#,
        )
        .unwrap();
        let ServerFrame::AskUser(ask) = frame else {
            panic!("expected AskUser");
        };
        assert_eq!(ask.kind(), AskKind::Target);
    }

    #[test]
    fn test_unknown_frame_is_decode_error() {
        let result = decode_frame(&JsonCodec, r#"{"Chat": "gg"}"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_frame_with_two_keys_is_decode_error() {
        let result = decode_frame(
            &JsonCodec,
            r#"{"GameState": {}, "AskUser": {"Action": {"ents": [], "min": 0, "max": 1}}}"#,
        );
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_target_ask_without_targets_is_invalid() {
        let result = decode_frame(
            &JsonCodec,
            r#"{"AskUser": {"Target": {"ents": [], "min": 1, "max": 1}}}"#,
        );
        assert!(matches!(result, Err(ProtocolError::InvalidMessage(_))));
    }
}
