//! Environment-sourced configuration for all three processes.
//!
//! Every option has a documented placeholder default so the binaries can be
//! started without a fully provisioned environment (they will simply fail to
//! log in / probe anything useful until the real values are supplied).

use tracing::warn;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u16_or(key: &str, default: u16) -> u16 {
    match std::env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(v) => v,
            Err(_) => {
                warn!("{} is not a valid port ('{}'), using {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_u64_or(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(v) => v,
            Err(_) => {
                warn!("{} is not a valid id ('{}'), using {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

/// Configuration for the plain status bot (Bot A).
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub http_port: u16,
}

impl BotConfig {
    pub fn from_env() -> Self {
        Self {
            token: env_or("DISCORD_BOT_A_TOKEN", "YOUR_BOT_A_TOKEN_HERE"),
            http_port: env_u16_or("PORT", 8080),
        }
    }
}

/// Configuration for the relay bot (Bot B).
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub token: String,
    /// Public application id of the peer bot whose `/ping` command we trigger.
    pub peer_app_id: String,
    /// Channel that receives the relayed status messages.
    /// Enable Developer Mode in Discord, right-click a channel, "Copy ID".
    pub target_channel_id: u64,
    pub http_port: u16,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self {
            token: env_or("DISCORD_BOT_B_TOKEN", "YOUR_BOT_B_TOKEN_HERE"),
            peer_app_id: env_or("BOT_A_APP_ID", "YOUR_BOT_A_APP_ID_HERE"),
            target_channel_id: env_u64_or("DISCORD_TARGET_CHANNEL_ID", 123456789012345678),
            http_port: env_u16_or("PORT", 10000),
        }
    }
}

/// One bot's status endpoint as seen from the proxy: a primary base URL and
/// a single fallback tried when the primary is unreachable.
#[derive(Debug, Clone)]
pub struct ProbeTarget {
    pub label: String,
    pub primary_url: String,
    pub fallback_url: String,
}

/// Configuration for the aggregation proxy process.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub port: u16,
    /// Bound instead of `port` when the primary bind fails.
    pub fallback_port: u16,
    pub bot_a: ProbeTarget,
    pub bot_b: ProbeTarget,
    /// Webhook root of the relay bot, hit by the `/ping-test` diagnostic.
    pub webhook_url: String,
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        Self {
            port: env_u16_or("PROXY_PORT", 5000),
            fallback_port: env_u16_or("PROXY_FALLBACK_PORT", 7000),
            bot_a: ProbeTarget {
                label: "Bot A".to_string(),
                primary_url: env_or("BOT_A_STATUS_URL", "http://127.0.0.1:8080"),
                fallback_url: env_or("BOT_A_STATUS_FALLBACK_URL", "http://127.0.0.1:8082"),
            },
            bot_b: ProbeTarget {
                label: "Bot B".to_string(),
                primary_url: env_or("BOT_B_STATUS_URL", "http://127.0.0.1:8081"),
                fallback_url: env_or("BOT_B_STATUS_FALLBACK_URL", "http://127.0.0.1:8083"),
            },
            webhook_url: env_or("RELAY_WEBHOOK_URL", "http://127.0.0.1:8081/"),
        }
    }
}
