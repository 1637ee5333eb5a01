//! Fixed-text and slash command glue for both bots.
//!
//! Reply selection is kept in pure functions so it can be tested without a
//! gateway connection; the `handle_*` wrappers do the serenity I/O.

pub mod bot_a;
pub mod relay;

use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::error;

pub(crate) async fn say(ctx: &Context, msg: &Message, text: &str) {
    if let Err(e) = msg.channel_id.say(&ctx.http, text).await {
        error!("Failed to send reply: {}", e);
    }
}
