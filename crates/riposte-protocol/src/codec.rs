//! Codec trait and implementations for turning frames into Rust types.
//!
//! The server speaks UTF-8 JSON text frames, so unlike a byte-oriented
//! codec this one works on `str`/`String`. The rest of the client only
//! sees the [`Codec`] trait, so another text format could be swapped in
//! without touching the engine.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes outbound responses to text and decodes inbound frames from text.
///
/// `Send + Sync + 'static` lets a codec live inside the long-running
/// client task alongside the connection.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into a text frame.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value cannot be represented
    /// in this format.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Parses a text frame back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the text is malformed or doesn't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`. This is the only format the game
/// server understands.
///
/// ## Example
///
/// ```rust
/// use riposte_protocol::{Codec, JsonCodec, Response};
///
/// let codec = JsonCodec;
/// let text = codec.encode(&Response::Indices(vec![0])).unwrap();
/// assert_eq!(text, "[0]");
///
/// let back: Vec<usize> = codec.decode(&text).unwrap();
/// assert_eq!(back, vec![0]);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }
}
