/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Dialing the server failed.
    #[error("connect to {url} failed: {source}")]
    ConnectFailed {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The connection was closed.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// Sending data failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving data failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// A frame arrived intact but its payload is not UTF-8 text. The
    /// connection itself is still usable.
    #[error("frame payload is not UTF-8: {0}")]
    InvalidPayload(#[source] std::string::FromUtf8Error),
}

impl TransportError {
    /// Whether the connection is unusable after this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::InvalidPayload(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_payload_is_not_fatal() {
        let err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        assert!(!TransportError::InvalidPayload(err).is_fatal());
    }

    #[test]
    fn test_socket_errors_are_fatal() {
        assert!(TransportError::ConnectionClosed("gone".into()).is_fatal());
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert!(TransportError::ReceiveFailed(io).is_fatal());
    }
}
