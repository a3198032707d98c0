//! # Riposte
//!
//! Client-side decision engine for a turn-based card game server.
//!
//! The server drives the game and, whenever it needs the player to decide
//! something, sends an ask. Riposte turns each ask into a selection the
//! player fills in with clicks and a commit key, then sends back an answer
//! in exactly the shape the server expects.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use riposte::prelude::*;
//!
//! # async fn demo() -> Result<(), RiposteError> {
//! riposte::init_tracing();
//! let client = RiposteClient::builder()
//!     .config(ClientConfig::from_env())
//!     .connect()
//!     .await?;
//! let view = client.subscribe();
//! let (inputs, rx) = tokio::sync::mpsc::channel(16);
//! // Hand `view` to the renderer and `inputs` to the input handler, then:
//! client.run(rx).await
//! # }
//! ```

mod client;
mod config;
mod engine;
mod error;

pub use client::{RiposteClient, RiposteClientBuilder, UiEvent};
pub use config::{COMMIT_KEY, COMMIT_KEY_VAR, ClientConfig, DEFAULT_URL, URL_VAR};
pub use engine::Engine;
pub use error::RiposteError;
pub use riposte_transport::WebSocketConnection;

use tracing_subscriber::EnvFilter;

/// Installs a `tracing` formatter filtered by `RUST_LOG`, defaulting to
/// `info`. Does nothing if a subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Convenient re-exports for client code.
pub mod prelude {
    pub use crate::{
        ClientConfig, Engine, RiposteClient, RiposteClientBuilder, RiposteError, UiEvent,
    };
    pub use riposte_protocol::{
        Action, Ask, AskKind, CardId, GameState, IdSet, PlayerId, Response, TargetId,
    };
    pub use riposte_selection::{SelectionState, SelectionView};
}
