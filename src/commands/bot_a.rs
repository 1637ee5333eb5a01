use serenity::builder::{
    CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use serenity::model::application::{Command, CommandType, Interaction};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{error, info};

use crate::session::SharedSession;

/// Reply for a plain text message, if it matches one of Bot A's commands.
///
/// The two relay texts are honored even when the author is a bot — that is
/// how the relay bot reaches us; everything else from bots is ignored.
fn message_reply(content: &str, author_is_bot: bool, server_count: usize) -> Option<String> {
    match content {
        "!pingme" => return Some("Bot A got your ping! 🟢".to_string()),
        "!activatebadge" => {
            return Some(
                "Bot A acknowledges your Active Developer Badge activation request! ✅".to_string(),
            )
        }
        _ => {}
    }

    if author_is_bot {
        return None;
    }

    match content {
        "!status" => Some(format!(
            "Bot A is online and listening! In {} servers.",
            server_count
        )),
        "!help" => {
            Some("Available commands: !pingme, !status, !help, !activatebadge, and /ping".to_string())
        }
        _ => None,
    }
}

fn slash_reply(command_name: &str) -> Option<&'static str> {
    match command_name {
        "ping" => Some("Pong! Bot A is online and active 🟢"),
        _ => None,
    }
}

/// Reply for the "Highlight Message" context-menu command, quoting the
/// target message's content. Ephemeral, visible only to the invoker.
fn context_menu_reply(command_name: &str, target_content: Option<&str>) -> Option<String> {
    if command_name != "Highlight Message" {
        return None;
    }
    let content = target_content?;
    Some(format!("Highlighted message: '{}'", content))
}

pub async fn handle_message(ctx: &Context, msg: &Message, session: &SharedSession) {
    let server_count = session.read().await.server_count;
    if let Some(reply) = message_reply(&msg.content, msg.author.bot, server_count) {
        super::say(ctx, msg, &reply).await;
    }
}

pub async fn register_slash_commands(ctx: &Context) {
    let commands = vec![
        CreateCommand::new("ping").description("Check if Bot A is online"),
        // Context-menu entries carry no description.
        CreateCommand::new("Highlight Message").kind(CommandType::Message),
    ];
    match Command::set_global_commands(&ctx.http, commands).await {
        Ok(synced) => info!("Synced {} command(s)", synced.len()),
        Err(e) => error!("Failed to sync commands: {}", e),
    }
}

pub async fn handle_interaction(ctx: &Context, interaction: &Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    let reply = match command.data.kind {
        CommandType::ChatInput => {
            slash_reply(&command.data.name).map(|content| (content.to_string(), false))
        }
        CommandType::Message => {
            let target_content = command
                .data
                .target_id
                .and_then(|id| command.data.resolved.messages.get(&id.to_message_id()))
                .map(|message| message.content.as_str());
            context_menu_reply(&command.data.name, target_content).map(|content| (content, true))
        }
        _ => None,
    };

    let Some((content, ephemeral)) = reply else {
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
