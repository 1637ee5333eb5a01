//! Ping relay: drains the queue filled by the uptime webhook and turns each
//! entry into chat-protocol I/O (channel resolution, peer command trigger,
//! status message). All of it runs next to the Discord client, never on the
//! HTTP request path.

use serenity::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::discord::{ApiError, DiscordApiClient};
use crate::queue::PingQueue;

/// Message posted to the resolved channel after a successful relay step.
pub const RELAY_STATUS_MESSAGE: &str = "UptimeRobot just pinged Bot B! I'm active and running! 🔵";

/// How often the drain task wakes up.
pub const DRAIN_PERIOD: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Error)]
pub enum RelayError {
    #[error("channel fetch failed: {0}")]
    ChannelFetch(String),
    #[error("message send failed: {0}")]
    Send(String),
}

/// A resolved, sendable channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayChannel {
    pub id: u64,
    pub name: String,
}

/// The chat-platform primitives the drain task needs. The production
/// implementation wraps a serenity context; tests drive the drain logic
/// with a scripted stand-in.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Whether login has completed and the session is usable.
    async fn is_ready(&self) -> bool;

    /// Local cache lookup, no network.
    async fn channel_from_cache(&self, channel_id: u64) -> Option<RelayChannel>;

    /// Remote fetch by id.
    async fn fetch_channel(&self, channel_id: u64) -> Result<RelayChannel, RelayError>;

    /// First text channel of the first guild the bot belongs to, if any.
    async fn first_text_channel(&self) -> Option<RelayChannel>;

    async fn first_guild_id(&self) -> Option<u64>;

    async fn send_message(&self, channel: &RelayChannel, text: &str) -> Result<(), RelayError>;
}

/// Fire-and-forget invocation of the peer bot's `ping` command.
#[async_trait]
pub trait RelayTrigger: Send + Sync {
    async fn fire(&self, guild_id: Option<u64>) -> Result<(), ApiError>;
}

/// Production trigger: the Discord REST client plus the peer's application
/// id and the configured target channel for the interaction payload.
pub struct PeerPingTrigger {
    client: DiscordApiClient,
    peer_app_id: String,
    target_channel_id: u64,
}

impl PeerPingTrigger {
    pub fn new(client: DiscordApiClient, peer_app_id: String, target_channel_id: u64) -> Self {
        Self {
            client,
            peer_app_id,
            target_channel_id,
        }
    }
}

#[async_trait]
impl RelayTrigger for PeerPingTrigger {
    async fn fire(&self, guild_id: Option<u64>) -> Result<(), ApiError> {
        self.client
            .trigger_ping_command(&self.peer_app_id, guild_id, self.target_channel_id)
            .await
    }
}

/// Resolve a channel id: cache first, then remote fetch, then fall back to
/// the first text channel of the first guild. Returns `None` only when all
/// three come up empty.
async fn resolve_channel(gateway: &dyn ChatGateway, channel_id: u64) -> Option<RelayChannel> {
    if let Some(channel) = gateway.channel_from_cache(channel_id).await {
        return Some(channel);
    }

    info!("Channel {} not in cache, fetching", channel_id);
    match gateway.fetch_channel(channel_id).await {
        Ok(channel) => {
            info!("Successfully fetched channel: {}", channel.name);
            return Some(channel);
        }
        Err(e) => {
            error!("Error fetching channel {}: {}", channel_id, e);
        }
    }

    match gateway.first_text_channel().await {
        Some(channel) => {
            warn!("Using fallback channel: {}", channel.name);
            Some(channel)
        }
        None => None,
    }
}

/// One drain cycle: process at most one queued ping request.
///
/// A dequeued request survives exactly one kind of failure — the session not
/// being ready yet, in which case it goes back on the tail and is retried
/// next period. Resolution failure drops it; trigger and send failures are
/// logged and the cycle completes normally.
pub async fn drain_once(
    queue: &PingQueue,
    gateway: &dyn ChatGateway,
    trigger: &dyn RelayTrigger,
) {
    let Some(channel_id) = queue.pop().await else {
        return;
    };

    if !gateway.is_ready().await {
        info!("Bot not ready yet, re-queuing ping request");
        queue.push(channel_id).await;
        return;
    }

    info!("Processing ping to channel {}", channel_id);

    let Some(channel) = resolve_channel(gateway, channel_id).await else {
        error!("Could not find any valid channel to send messages to");
        return;
    };

    info!("Sending messages to channel: {}", channel.name);

    match trigger.fire(gateway.first_guild_id().await).await {
        Ok(()) => {}
        Err(ApiError::CommandNotFound(name)) => {
            error!("Could not find peer's '{}' command", name);
        }
        Err(e) => {
            error!("Error triggering peer command: {}", e);
        }
    }

    if let Err(e) = gateway.send_message(&channel, RELAY_STATUS_MESSAGE).await {
        error!("Error sending status message: {}", e);
    }
}

/// Periodic drain loop; never exits. Spawned once from the ready handler.
pub async fn run_drain_loop(
    queue: std::sync::Arc<PingQueue>,
    gateway: impl ChatGateway,
    trigger: impl RelayTrigger,
) {
    let mut interval = tokio::time::interval(DRAIN_PERIOD);
    loop {
        interval.tick().await;
        drain_once(&queue, &gateway, &trigger).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct ScriptedGateway {
        ready: AtomicBool,
        cached: HashMap<u64, RelayChannel>,
        fetchable: HashMap<u64, RelayChannel>,
        fallback: Option<RelayChannel>,
        guild_id: Option<u64>,
        resolve_attempts: Mutex<Vec<u64>>,
        sent: Mutex<Vec<(u64, String)>>,
    }

    impl ScriptedGateway {
        fn ready() -> Self {
            let gateway = Self::default();
            gateway.ready.store(true, Ordering::SeqCst);
            gateway
        }

        fn with_cached(mut self, id: u64) -> Self {
            self.cached.insert(
                id,
                RelayChannel {
                    id,
                    name: format!("chan-{}", id),
                },
            );
            self
        }
    }

    #[async_trait]
    impl ChatGateway for ScriptedGateway {
        async fn is_ready(&self) -> bool {
            self.ready.load(Ordering::SeqCst)
        }

        async fn channel_from_cache(&self, channel_id: u64) -> Option<RelayChannel> {
            self.resolve_attempts.lock().await.push(channel_id);
            self.cached.get(&channel_id).cloned()
        }

        async fn fetch_channel(&self, channel_id: u64) -> Result<RelayChannel, RelayError> {
            self.fetchable
                .get(&channel_id)
                .cloned()
                .ok_or_else(|| RelayError::ChannelFetch("Unknown Channel".to_string()))
        }

        async fn first_text_channel(&self) -> Option<RelayChannel> {
            self.fallback.clone()
        }

        async fn first_guild_id(&self) -> Option<u64> {
            self.guild_id
        }

        async fn send_message(&self, channel: &RelayChannel, text: &str) -> Result<(), RelayError> {
            self.sent.lock().await.push((channel.id, text.to_string()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct ScriptedTrigger {
        fail_with: Option<ApiError>,
        fired: Mutex<Vec<Option<u64>>>,
    }

    #[async_trait]
    impl RelayTrigger for ScriptedTrigger {
        async fn fire(&self, guild_id: Option<u64>) -> Result<(), ApiError> {
            self.fired.lock().await.push(guild_id);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    #[tokio::test]
    async fn test_drain_preserves_fifo_order() {
        let queue = PingQueue::new();
        for id in [11, 22, 33] {
            queue.push(id).await;
        }
        let gateway = ScriptedGateway::ready()
            .with_cached(11)
            .with_cached(22)
            .with_cached(33);
        let trigger = ScriptedTrigger::default();

        for _ in 0..3 {
            drain_once(&queue, &gateway, &trigger).await;
        }

        assert_eq!(*gateway.resolve_attempts.lock().await, vec![11, 22, 33]);
        assert_eq!(queue.len().await, 0);
    }

    #[tokio::test]
    async fn test_not_ready_requeues_without_losing_anything() {
        let queue = PingQueue::new();
        queue.push(11).await;
        queue.push(22).await;
        let gateway = ScriptedGateway::default();
        let trigger = ScriptedTrigger::default();

        drain_once(&queue, &gateway, &trigger).await;

        assert_eq!(queue.len().await, 2);
        assert!(gateway.sent.lock().await.is_empty());
        assert!(trigger.fired.lock().await.is_empty());
        // Head went back to the tail.
        assert_eq!(queue.pop().await, Some(22));
        assert_eq!(queue.pop().await, Some(11));
    }

    #[tokio::test]
    async fn test_resolution_failure_drops_the_request() {
        let queue = PingQueue::new();
        queue.push(99).await;
        let gateway = ScriptedGateway::ready();
        let trigger = ScriptedTrigger::default();

        drain_once(&queue, &gateway, &trigger).await;

        assert_eq!(queue.len().await, 0);
        assert!(gateway.sent.lock().await.is_empty());
        assert!(trigger.fired.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_then_fallback_resolution() {
        let queue = PingQueue::new();
        queue.push(99).await;
        let mut gateway = ScriptedGateway::ready();
        gateway.fallback = Some(RelayChannel {
            id: 1,
            name: "general".to_string(),
        });
        let trigger = ScriptedTrigger::default();

        drain_once(&queue, &gateway, &trigger).await;

        let sent = gateway.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, 1);
    }

    #[tokio::test]
    async fn test_missing_peer_command_still_sends_status_message() {
        let queue = PingQueue::new();
        queue.push(11).await;
        let gateway = ScriptedGateway::ready().with_cached(11);
        let trigger = ScriptedTrigger {
            fail_with: Some(ApiError::CommandNotFound("ping".to_string())),
            ..Default::default()
        };

        drain_once(&queue, &gateway, &trigger).await;

        let sent = gateway.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, RELAY_STATUS_MESSAGE);
        assert_eq!(trigger.fired.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_trigger_receives_first_guild_id() {
        let queue = PingQueue::new();
        queue.push(11).await;
        let mut gateway = ScriptedGateway::ready().with_cached(11);
        gateway.guild_id = Some(555);
        let trigger = ScriptedTrigger::default();

        drain_once(&queue, &gateway, &trigger).await;

        assert_eq!(*trigger.fired.lock().await, vec![Some(555)]);
    }

    #[tokio::test]
    async fn test_empty_queue_is_a_noop() {
        let queue = PingQueue::new();
        let gateway = ScriptedGateway::ready();
        let trigger = ScriptedTrigger::default();

        drain_once(&queue, &gateway, &trigger).await;

        assert!(gateway.resolve_attempts.lock().await.is_empty());
    }
}
