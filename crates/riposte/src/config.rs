//! Client configuration.

use serde::{Deserialize, Serialize};

/// Server endpoint used when nothing else is configured.
pub const DEFAULT_URL: &str = "ws://localhost:3030/gamesetup";

/// Key code of the commit/cancel key (space).
pub const COMMIT_KEY: u32 = 32;

/// Environment variable overriding [`ClientConfig::url`].
pub const URL_VAR: &str = "RIPOSTE_URL";

/// Environment variable overriding [`ClientConfig::commit_key`].
pub const COMMIT_KEY_VAR: &str = "RIPOSTE_COMMIT_KEY";

/// Settings for a [`RiposteClient`](crate::RiposteClient).
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// WebSocket URL of the game server.
    pub url: String,

    /// Key code that commits the current answer, or passes when there is
    /// nothing to commit.
    pub commit_key: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            commit_key: COMMIT_KEY,
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `RIPOSTE_URL` and `RIPOSTE_COMMIT_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) but reads variables through
    /// `lookup`.
    ///
    /// A commit key that isn't a number is logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(URL_VAR) {
            config.url = url;
        }
        if let Some(raw) = lookup(COMMIT_KEY_VAR) {
            match raw.trim().parse() {
                Ok(code) => config.commit_key = code,
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "ignoring {COMMIT_KEY_VAR}");
                }
            }
        }
        config
    }
}
