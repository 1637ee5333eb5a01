use serenity::async_trait;
use serenity::model::application::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::guild::{Guild, UnavailableGuild};
use serenity::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vigil::commands::bot_a as commands;
use vigil::config::BotConfig;
use vigil::session::{new_shared_session, SharedSession};
use vigil::web;

struct Handler {
    session: SharedSession,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("✅ Bot A is ready! Logged in as {}", ready.user.tag());
        info!("🏠 Bot A is in {} servers", ready.guilds.len());

        self.session
            .write()
            .await
            .mark_ready(ready.user.tag(), ready.guilds.len());

        commands::register_slash_commands(&ctx).await;
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
        commands::handle_interaction(&ctx, &interaction).await;
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

    info!("🤖 Starting Bot A...");
    let config = BotConfig::from_env();
    let session = new_shared_session();

    // Status endpoint serves independently of the gateway connection.
    let router = web::status_router(session.clone());
    let http_port = config.http_port;
    tokio::spawn(async move {
        if let Err(e) = web::serve(router, http_port).await {
            error!("Status server error: {}", e);
        }
    });

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = match Client::builder(&config.token, intents)
        .event_handler(Handler { session })
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
