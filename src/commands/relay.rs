use serenity::builder::{
    CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use serenity::model::application::{Command, Interaction};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{error, info};

use crate::session::SharedSession;

/// Reply for a plain text message, if any. The relay bot ignores all
/// bot-authored messages.
fn message_reply(content: &str, author_is_bot: bool, server_count: usize) -> Option<String> {
    if author_is_bot {
        return None;
    }

    match content {
        "!botb" => Some("Bot B is here! 🔵".to_string()),
        "!status" => Some(format!(
            "Bot B is online and listening! In {} servers.",
            server_count
        )),
        "!help" => Some("Available commands: !botb, !status, !help".to_string()),
        _ => None,
    }
}

/// Reply text and ephemerality for a slash command, if any.
fn slash_reply(command_name: &str, server_count: usize) -> Option<(String, bool)> {
    match command_name {
        "ping" => Some(("Pong! Bot B is online and active 🔵".to_string(), false)),
        "status" => Some((
            format!("Bot B is online and in {} servers! 🔵", server_count),
            false,
        )),
        "help" => Some(("Available commands: /ping, /status, /help".to_string(), true)),
        _ => None,
    }
}

pub async fn handle_message(ctx: &Context, msg: &Message, session: &SharedSession) {
    let server_count = session.read().await.server_count;
    if let Some(reply) = message_reply(&msg.content, msg.author.bot, server_count) {
        super::say(ctx, msg, &reply).await;
    }
}

pub async fn register_slash_commands(ctx: &Context) {
    let commands = vec![
        CreateCommand::new("ping").description("Check if Bot B is online"),
        CreateCommand::new("status").description("Check Bot B's status"),
        CreateCommand::new("help").description("Get help with Bot B's commands"),
    ];
    match Command::set_global_commands(&ctx.http, commands).await {
        Ok(synced) => info!("Synced {} command(s)", synced.len()),
        Err(e) => error!("Failed to sync commands: {}", e),
    }
}

pub async fn handle_interaction(ctx: &Context, interaction: &Interaction, session: &SharedSession) {
    let Interaction::Command(command) = interaction else {
        return;
    };
    let server_count = session.read().await.server_count;
    let Some((content, ephemeral)) = slash_reply(&command.data.name, server_count) else {
        return;
    };

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(ephemeral),
    );
    if let Err(e) = command.create_response(&ctx.http, response).await {
        error!("Failed to respond to /{}: {}", command.data.name, e);
    }
}
