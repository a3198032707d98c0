//! Integration tests for the client event loop.
//!
//! Each test runs a loopback WebSocket server standing in for the game
//! server, connects a real `RiposteClient` to it, and drives both sides on
//! one task with `tokio::join!`.

use futures_util::{SinkExt, StreamExt};
use riposte::prelude::*;
use riposte::{COMMIT_KEY, RiposteError, WebSocketConnection};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

type ServerWs = WebSocketStream<TcpStream>;

const ATTACKERS: &str =
    r#"{"AskUser":{"Attackers":{"pairs":{"10":{"items":{"1":null},"min":0,"max":1}}}}}"#;
const EMPTY_ACTION: &str = r#"{"AskUser":{"Action":{"ents":[],"min":0,"max":1}}}"#;
const EMPTY_SNAPSHOT: &str = r#"{"GameState":{"player":1,"cards":{},"players":{}}}"#;

// =========================================================================
// Helpers
// =========================================================================

/// Binds a free port, connects a client to it, and returns both ends.
async fn connect() -> (RiposteClient<WebSocketConnection>, ServerWs) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio_tungstenite::accept_async(stream).await.unwrap()
    });

    let client = RiposteClient::builder()
        .url(&format!("ws://{addr}"))
        .connect()
        .await
        .expect("client should connect");
    let server_ws = server.await.expect("accept task should complete");
    (client, server_ws)
}

async fn push(server: &mut ServerWs, text: &str) {
    server.send(Message::Text(text.to_string().into())).await.unwrap();
}

/// Next text frame the client sent.
async fn next_text(server: &mut ServerWs) -> String {
    loop {
        match server.next().await.unwrap().unwrap() {
            Message::Text(text) => return text.as_str().to_string(),
            Message::Close(_) => panic!("client closed before answering"),
            _ => continue,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_declare_attack_end_to_end() {
    let (client, mut server) = connect().await;
    let mut view = client.subscribe();
    let (inputs, rx) = mpsc::channel(8);

    let script = async move {
        push(&mut server, ATTACKERS).await;
        view.wait_for(|v| v.kind == Some(AskKind::Attackers)).await.unwrap();

        inputs.send(UiEvent::Click(TargetId(10))).await.unwrap();
        inputs.send(UiEvent::Click(TargetId(1))).await.unwrap();
        inputs.send(UiEvent::Key(COMMIT_KEY)).await.unwrap();
        assert_eq!(next_text(&mut server).await, r#"{"10":{"1":null}}"#);

        server.send(Message::Close(None)).await.unwrap();
        inputs
    };

    let (result, _inputs) = tokio::join!(client.run(rx), script);
    result.expect("run should end cleanly on server close");
}

#[tokio::test]
async fn test_empty_ask_is_answered_without_input() {
    let (client, mut server) = connect().await;
    let (inputs, rx) = mpsc::channel(8);

    let script = async move {
        push(&mut server, EMPTY_ACTION).await;
        assert_eq!(next_text(&mut server).await, "[]");
        server.send(Message::Close(None)).await.unwrap();
        inputs
    };

    let (result, _inputs) = tokio::join!(client.run(rx), script);
    result.unwrap();
}

#[tokio::test]
async fn test_snapshot_cancels_partial_attack() {
    let (client, mut server) = connect().await;
    let mut view = client.subscribe();
    let (inputs, rx) = mpsc::channel(8);

    let script = async move {
        push(&mut server, ATTACKERS).await;
        view.wait_for(|v| v.kind.is_some()).await.unwrap();
        inputs.send(UiEvent::Click(TargetId(10))).await.unwrap();
        inputs.send(UiEvent::Click(TargetId(1))).await.unwrap();
        view.wait_for(|v| v.partial.contains(&TargetId(1))).await.unwrap();

        push(&mut server, EMPTY_SNAPSHOT).await;
        view.wait_for(|v| v.kind.is_none()).await.unwrap();
        inputs.send(UiEvent::Key(COMMIT_KEY)).await.unwrap();

        // The partial attack was dropped: the first thing the client sends
        // is the answer to the next ask.
        push(&mut server, EMPTY_ACTION).await;
        assert_eq!(next_text(&mut server).await, "[]");

        server.send(Message::Close(None)).await.unwrap();
        inputs
    };

    let (result, _inputs) = tokio::join!(client.run(rx), script);
    result.unwrap();
}

#[tokio::test]
async fn test_bad_frame_does_not_stop_the_loop() {
    let (client, mut server) = connect().await;
    let (inputs, rx) = mpsc::channel(8);

    let script = async move {
        push(&mut server, r#"{"Chat":"gg"}"#).await;
        push(&mut server, r#"{"AskUser":{"Target":{"ents":[],"min":1,"max":1}}}"#).await;
        push(&mut server, EMPTY_ACTION).await;
        assert_eq!(next_text(&mut server).await, "[]");
        server.send(Message::Close(None)).await.unwrap();
        inputs
    };

    let (result, _inputs) = tokio::join!(client.run(rx), script);
    result.unwrap();
}

#[tokio::test]
async fn test_non_utf8_frame_does_not_stop_the_loop() {
    let (client, mut server) = connect().await;
    let (inputs, rx) = mpsc::channel(8);

    let script = async move {
        server.send(Message::Binary(vec![0xff, 0xfe].into())).await.unwrap();
        push(&mut server, EMPTY_ACTION).await;
        assert_eq!(next_text(&mut server).await, "[]");
        server.send(Message::Close(None)).await.unwrap();
        inputs
    };

    let (result, _inputs) = tokio::join!(client.run(rx), script);
    result.expect("an unreadable frame is dropped, not fatal");
}

#[tokio::test]
async fn test_dropping_inputs_closes_connection() {
    let (client, mut server) = connect().await;
    let (inputs, rx) = mpsc::channel::<UiEvent>(8);
    drop(inputs);

    let (result, msg) = tokio::join!(client.run(rx), server.next());
    result.unwrap();
    assert!(matches!(msg, Some(Ok(Message::Close(_)))));
}

#[tokio::test]
async fn test_connect_to_closed_port_fails() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = RiposteClient::builder()
        .url(&format!("ws://{addr}"))
        .connect()
        .await;
    assert!(matches!(result, Err(RiposteError::Transport(_))));
}
