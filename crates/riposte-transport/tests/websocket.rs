//! Integration tests for the WebSocket connection.
//!
//! Each test runs a real loopback WebSocket server (plain
//! `tokio-tungstenite`, standing in for the game server) and dials it with
//! `WebSocketConnection::connect`.

#[cfg(feature = "websocket")]
mod websocket {
    use futures_util::{SinkExt, StreamExt};
    use riposte_transport::{Connection, TransportError, WebSocketConnection};
    use tokio::net::{TcpListener, TcpStream};
    use tokio_tungstenite::WebSocketStream;
    use tokio_tungstenite::tungstenite::Message;

    /// Helper: binds a listener on a free port and dials it. Returns the
    /// client connection and the server side of the socket.
    async fn pair() -> (WebSocketConnection, WebSocketStream<TcpStream>) {
        // "127.0.0.1:0" tells the OS to pick an available port.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            tokio_tungstenite::accept_async(stream).await.unwrap()
        });

        let client = WebSocketConnection::connect(&format!("ws://{addr}"))
            .await
            .expect("client should connect");
        let server_ws = server.await.expect("accept task should complete");
        (client, server_ws)
    }

    #[tokio::test]
    async fn test_text_frames_flow_both_ways() {
        let (client, mut server) = pair().await;
        assert!(client.id().into_inner() > 0);

        // --- Server sends, client receives ---
        server
            .send(Message::Text(r#"{"GameState":{}}"#.to_string().into()))
            .await
            .unwrap();
        let received = client.recv().await.unwrap().unwrap();
        assert_eq!(received, r#"{"GameState":{}}"#);

        // --- Client sends, server receives ---
        client.send("[0]").await.expect("send should succeed");
        let msg = server.next().await.unwrap().unwrap();
        assert_eq!(msg.into_text().unwrap().as_str(), "[0]");
    }

    #[tokio::test]
    async fn test_binary_utf8_frame_is_read_as_text() {
        let (client, mut server) = pair().await;

        server
            .send(Message::Binary(b"{}".to_vec().into()))
            .await
            .unwrap();
        assert_eq!(client.recv().await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_binary_non_utf8_frame_is_invalid_payload() {
        let (client, mut server) = pair().await;

        server
            .send(Message::Binary(vec![0xff, 0xfe].into()))
            .await
            .unwrap();
        let err = client.recv().await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidPayload(_)));
        assert!(!err.is_fatal());

        // The next frame still comes through.
        server
            .send(Message::Text("[]".to_string().into()))
            .await
            .unwrap();
        assert_eq!(client.recv().await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_recv_returns_none_on_server_close() {
        let (client, mut server) = pair().await;

        server.send(Message::Close(None)).await.unwrap();

        let result = client.recv().await.expect("recv should not error");
        assert!(result.is_none(), "should return None on server close");
    }

    #[tokio::test]
    async fn test_connect_to_closed_port_fails() {
        // Bind then drop, so the port is almost certainly free.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = WebSocketConnection::connect(&format!("ws://{addr}")).await;
        assert!(matches!(result, Err(TransportError::ConnectFailed { .. })));
    }
}
