//! Unified error type for the Riposte client.

use riposte_protocol::ProtocolError;
use riposte_selection::SelectionError;
use riposte_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert layer errors
/// automatically. Only `Transport` is fatal to the event loop; the others
/// spoil a single frame or click.
#[derive(Debug, thiserror::Error)]
pub enum RiposteError {
    /// A transport-level error (connect, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A selection-level error (ambiguous action, nothing to target).
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

impl RiposteError {
    /// Whether the connection is unusable after this error. A frame that
    /// arrived but can't be read is not.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_fatal(),
            Self::Protocol(_) | Self::Selection(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_protocol::CardId;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ConnectionClosed("gone".into());
        let riposte_err: RiposteError = err.into();
        assert!(matches!(riposte_err, RiposteError::Transport(_)));
        assert!(riposte_err.to_string().contains("gone"));
        assert!(riposte_err.is_fatal());
    }

    #[test]
    fn test_unreadable_frame_is_not_fatal() {
        let utf8 = String::from_utf8(vec![0xff]).unwrap_err();
        let riposte_err: RiposteError = TransportError::InvalidPayload(utf8).into();
        assert!(matches!(riposte_err, RiposteError::Transport(_)));
        assert!(!riposte_err.is_fatal());
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidMessage("bad".into());
        let riposte_err: RiposteError = err.into();
        assert!(matches!(riposte_err, RiposteError::Protocol(_)));
        assert!(!riposte_err.is_fatal());
    }

    #[test]
    fn test_from_selection_error() {
        let err = SelectionError::AmbiguousAction {
            card: CardId(8),
            offered: 2,
        };
        let riposte_err: RiposteError = err.into();
        assert!(matches!(riposte_err, RiposteError::Selection(_)));
        assert!(riposte_err.to_string().contains("C-8"));
    }
}
