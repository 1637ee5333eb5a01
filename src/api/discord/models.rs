use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry of an application's registered slash-command list.
/// Fetched transiently on every relay trigger, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub id: String,
    pub name: String,
}

/// Body for POST /interactions: a synthetic application-command invocation
/// addressed to the peer application.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionRequest {
    /// Interaction type 2 = application command.
    #[serde(rename = "type")]
    pub kind: u8,
    pub application_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    pub channel_id: String,
    pub data: InteractionCommandData,
}

#[derive(Debug, Clone, Serialize)]
pub struct InteractionCommandData {
    pub name: String,
    pub id: String,
    /// Command type 1 = chat input.
    #[serde(rename = "type")]
    pub kind: u8,
}

/// Error type for Discord REST operations made by the relay trigger.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The peer's command list has no entry with the expected name.
    #[error("command '{0}' not found on peer application")]
    CommandNotFound(String),
    /// Network-level failure (unreachable peer, timeout).
    #[error("request error: {0}")]
    Request(String),
    /// The API answered with a status we did not expect.
    #[error("unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),
    #[error("deserialization error: {0}")]
    Deserialization(String),
}
