use serenity::async_trait;
use serenity::model::application::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::guild::{Guild, UnavailableGuild};
use serenity::model::id::ChannelId;
use serenity::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use vigil::api::discord::DiscordApiClient;
use vigil::commands::relay as commands;
use vigil::config::RelayConfig;
use vigil::queue::PingQueue;
use vigil::services::relay_service;
use vigil::services::{PeerPingTrigger, SerenityGateway};
use vigil::session::{new_shared_session, SharedSession};
use vigil::web::{self, RelayWebState};

struct Handler {
    session: SharedSession,
    queue: Arc<PingQueue>,
    config: RelayConfig,
    drain_started: AtomicBool,
}

impl Handler {
    /// Verify the target channel and announce startup; all best-effort.
    async fn announce_startup(&self, ctx: &Context) {
        let target = ChannelId::new(self.config.target_channel_id);
        let channel_name = ctx.cache.channel(target).map(|c| c.name.clone());

        let Some(name) = channel_name else {
            warn!(
                "Target channel with ID {} was not found!",
                self.config.target_channel_id
            );
            return;
        };

        info!("Found target channel: {}", name);
        if let Err(e) = target
            .say(&ctx.http, "Bot B has started and is ready to receive pings! 🔵")
            .await
        {
            error!("Failed to send startup message: {}", e);
            return;
        }
        // Probe the peer right away so the pair shows up as active.
        if let Err(e) = target.say(&ctx.http, "!pingme").await {
            error!("Failed to send test pingme message: {}", e);
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("✅ Bot B is ready! Logged in as {}", ready.user.tag());
        info!("🏠 Bot B is in {} servers", ready.guilds.len());

        self.session
            .write()
            .await
            .mark_ready(ready.user.tag(), ready.guilds.len());

        commands::register_slash_commands(&ctx).await;
        self.announce_startup(&ctx).await;

        // Spawn the drain task once; ready fires again after reconnects.
        if !self.drain_started.swap(true, Ordering::SeqCst) {
            let gateway = SerenityGateway::new(ctx.clone(), self.session.clone());
            let trigger = PeerPingTrigger::new(
                DiscordApiClient::new(self.config.token.clone()),
                self.config.peer_app_id.clone(),
                self.config.target_channel_id,
            );
            tokio::spawn(relay_service::run_drain_loop(
                self.queue.clone(),
                gateway,
                trigger,
            ));
        }
    }

    async fn guild_create(&self, _ctx: Context, _guild: Guild, is_new: Option<bool>) {
        if is_new == Some(true) {
            self.session.write().await.guild_added();
        }
    }

    async fn guild_delete(
        &self,
        _ctx: Context,
        _incomplete: UnavailableGuild,
        _full: Option<Guild>,
    ) {
        self.session.write().await.guild_removed();
    }

    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&ctx, &msg, &self.session).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        commands::handle_interaction(&ctx, &interaction, &self.session).await;
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("vigil=debug".parse().unwrap())
                .add_directive("serenity=warn".parse().unwrap()),
        )
        .with_target(true)
        .init();

    info!("🤖 Starting Bot B (relay)...");
    let config = RelayConfig::from_env();
    let session = new_shared_session();
    let queue = Arc::new(PingQueue::new());

    // Webhook + status endpoint; the webhook only ever touches the queue.
    let router = web::relay_router(RelayWebState {
        session: session.clone(),
        queue: queue.clone(),
        target_channel_id: config.target_channel_id,
    });
    let http_port = config.http_port;
    tokio::spawn(async move {
        if let Err(e) = web::serve(router, http_port).await {
            error!("Webhook server error: {}", e);
        }
    });

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = match Client::builder(&config.token, intents)
        .event_handler(Handler {
            session,
            queue,
            config: config.clone(),
            drain_started: AtomicBool::new(false),
        })
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create client: {}", e);
            return;
        }
    };

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }
}
