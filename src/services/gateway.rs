use serenity::async_trait;
use serenity::model::channel::{Channel, ChannelType};
use serenity::model::id::ChannelId;
use serenity::prelude::Context;

use super::relay_service::{ChatGateway, RelayChannel, RelayError};
use crate::session::SharedSession;

/// Production [`ChatGateway`] backed by a serenity context.
pub struct SerenityGateway {
    ctx: Context,
    session: SharedSession,
}

impl SerenityGateway {
    pub fn new(ctx: Context, session: SharedSession) -> Self {
        Self { ctx, session }
    }
}

#[async_trait]
impl ChatGateway for SerenityGateway {
    async fn is_ready(&self) -> bool {
        self.session.read().await.is_ready()
    }

    async fn channel_from_cache(&self, channel_id: u64) -> Option<RelayChannel> {
        self.ctx
            .cache
            .channel(ChannelId::new(channel_id))
            .map(|channel| RelayChannel {
                id: channel.id.get(),
                name: channel.name.clone(),
            })
    }

    async fn fetch_channel(&self, channel_id: u64) -> Result<RelayChannel, RelayError> {
        match self.ctx.http.get_channel(ChannelId::new(channel_id)).await {
            Ok(Channel::Guild(channel)) => Ok(RelayChannel {
                id: channel.id.get(),
                name: channel.name.clone(),
            }),
            Ok(Channel::Private(channel)) => Ok(RelayChannel {
                id: channel.id.get(),
                name: channel.name(),
            }),
            Ok(_) => Err(RelayError::ChannelFetch(
                "unsupported channel kind".to_string(),
            )),
            Err(e) => Err(RelayError::ChannelFetch(e.to_string())),
        }
    }

    async fn first_text_channel(&self) -> Option<RelayChannel> {
        // Cache-only walk, mirrors guild.text_channels ordering by position.
        for guild_id in self.ctx.cache.guilds() {
            let Some(guild) = guild_id.to_guild_cached(&self.ctx.cache) else {
                continue;
            };
            let mut text_channels: Vec<_> = guild
                .channels
                .values()
                .filter(|c| c.kind == ChannelType::Text)
                .collect();
            text_channels.sort_by_key(|c| c.position);
            if let Some(channel) = text_channels.first() {
                return Some(RelayChannel {
                    id: channel.id.get(),
                    name: channel.name.clone(),
                });
            }
        }
        None
    }

    async fn first_guild_id(&self) -> Option<u64> {
        self.ctx.cache.guilds().first().map(|id| id.get())
    }

    async fn send_message(&self, channel: &RelayChannel, text: &str) -> Result<(), RelayError> {
        ChannelId::new(channel.id)
            .say(&self.ctx.http, text)
            .await
            .map(|_| ())
            .map_err(|e| RelayError::Send(e.to_string()))
    }
}
