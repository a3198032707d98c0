//! `RiposteClient` builder and event loop.
//!
//! This is the entry point for playing against a server. It ties the
//! layers together: transport → protocol → selection → transport.

use riposte_protocol::{JsonCodec, Response, TargetId};
use riposte_selection::SelectionView;
use riposte_transport::{Connection, TransportError, WebSocketConnection};
use tokio::sync::{mpsc, watch};

use crate::{ClientConfig, Engine, RiposteError};

/// Input from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The player clicked a card or player.
    Click(TargetId),
    /// The player pressed a key.
    Key(u32),
}

/// Builder for configuring and connecting a client.
///
/// # Example
///
/// ```rust,no_run
/// use riposte::prelude::*;
///
/// # async fn demo() -> Result<(), RiposteError> {
/// let client = RiposteClient::builder()
///     .url("ws://localhost:3030/gamesetup")
///     .connect()
///     .await?;
/// let (_inputs, rx) = tokio::sync::mpsc::channel(16);
/// client.run(rx).await
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RiposteClientBuilder {
    config: ClientConfig,
}

impl RiposteClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server URL.
    pub fn url(mut self, url: &str) -> Self {
        self.config.url = url.to_string();
        self
    }

    /// Sets the commit/cancel key code.
    pub fn commit_key(mut self, code: u32) -> Self {
        self.config.commit_key = code;
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Dials the server and returns a client ready to [`run`](RiposteClient::run).
    pub async fn connect(self) -> Result<RiposteClient<WebSocketConnection>, RiposteError> {
        let conn = WebSocketConnection::connect(&self.config.url).await?;
        Ok(RiposteClient::new(conn, &self.config))
    }
}

/// A connected client.
///
/// Owns the connection and the [`Engine`]. The renderer watches
/// [`subscribe`](Self::subscribe) and feeds input through the channel given
/// to [`run`](Self::run).
pub struct RiposteClient<T: Connection> {
    conn: T,
    engine: Engine<JsonCodec>,
    view_tx: watch::Sender<SelectionView>,
}

impl RiposteClient<WebSocketConnection> {
    /// Creates a new builder.
    pub fn builder() -> RiposteClientBuilder {
        RiposteClientBuilder::new()
    }
}

impl<T> RiposteClient<T>
where
    T: Connection<Error = TransportError>,
{
    /// Wraps an established connection.
    pub fn new(conn: T, config: &ClientConfig) -> Self {
        let (view_tx, _) = watch::channel(SelectionView::default());
        Self {
            conn,
            engine: Engine::new().commit_key(config.commit_key),
            view_tx,
        }
    }

    /// Receives a fresh [`SelectionView`] after every change.
    pub fn subscribe(&self) -> watch::Receiver<SelectionView> {
        self.view_tx.subscribe()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Runs the event loop.
    ///
    /// Processes server frames and UI events strictly one at a time. Ends
    /// with `Ok(())` when the server closes the connection or the input
    /// channel is dropped. Unreadable frames, protocol errors and selection
    /// errors are logged and the loop carries on; socket failures end it.
    pub async fn run(mut self, mut inputs: mpsc::Receiver<UiEvent>) -> Result<(), RiposteError> {
        let conn_id = self.conn.id();
        tracing::info!(%conn_id, "client running");

        loop {
            tokio::select! {
                frame = self.conn.recv() => {
                    let outcome = match frame {
                        Ok(Some(text)) => self.engine.receive(&text),
                        Ok(None) => {
                            tracing::info!(%conn_id, "server closed connection");
                            return Ok(());
                        }
                        Err(e) => Err(e.into()),
                    };
                    self.settle(outcome).await?;
                }
                event = inputs.recv() => {
                    let outcome = match event {
                        Some(UiEvent::Click(id)) => self.engine.click(id),
                        Some(UiEvent::Key(code)) => Ok(self.engine.key(code)),
                        None => {
                            tracing::info!(%conn_id, "input closed, disconnecting");
                            self.conn.close().await?;
                            return Ok(());
                        }
                    };
                    self.settle(outcome).await?;
                }
            }
        }
    }

    /// Sends the response an event produced, if any, logs recoverable
    /// errors and republishes the view.
    async fn settle(
        &mut self,
        outcome: Result<Option<Response>, RiposteError>,
    ) -> Result<(), RiposteError> {
        match outcome {
            Ok(Some(response)) => self.send(&response).await?,
            Ok(None) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => tracing::warn!(conn_id = %self.conn.id(), error = %e, "event dropped"),
        }

        let view = self.engine.view();
        self.view_tx.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
        Ok(())
    }

    async fn send(&self, response: &Response) -> Result<(), RiposteError> {
        let text = self.engine.encode(response)?;
        self.conn.send(&text).await?;
        tracing::info!(conn_id = %self.conn.id(), response = %text, "sent response");
        Ok(())
    }
}
