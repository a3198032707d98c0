//! Error types for the protocol layer.
//!
//! Each Riposte crate defines its own error enum. A `ProtocolError` always
//! means the problem is in the shape of a frame, never in the socket or in
//! the player's selection.

/// Errors that can occur while encoding or decoding frames.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization of an outbound response failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The inbound frame is not valid JSON, or is JSON of the wrong shape
    /// (for example an object with an unknown tag, or with two tags).
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The frame parsed but breaks a protocol rule, e.g. a `Target` ask
    /// that offers nothing to target.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
