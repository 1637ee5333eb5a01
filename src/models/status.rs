use serde::{Deserialize, Serialize};

/// Connection state reported by a bot's `/status` endpoint.
///
/// Serializes to an externally tagged body on the `status` field, e.g.
/// `{"status":"online","bot_name":"Bot A#1234","server_count":3}`.
/// Only `online` carries the bot name and server count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BotStatus {
    Online {
        bot_name: String,
        server_count: usize,
    },
    Waiting,
    Offline {
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Error {
        message: String,
    },
}

fn unknown_status() -> String {
    "unknown".to_string()
}

fn unknown_name() -> String {
    "Unknown".to_string()
}

/// Defensive view of a peer's status body, used by the proxy dashboard.
///
/// Missing fields fall back to `"unknown"` / `"Unknown"`; a body that is not
/// JSON at all is treated as an offline bot. Parsing never fails.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default = "unknown_status")]
    pub status: String,
    #[serde(default = "unknown_name")]
    pub bot_name: String,
}

impl StatusSnapshot {
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| Self::offline())
    }

    pub fn offline() -> Self {
        Self {
            status: "offline".to_string(),
            bot_name: "Unknown".to_string(),
        }
    }
}
