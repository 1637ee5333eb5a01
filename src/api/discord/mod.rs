pub mod client;
pub mod models;

pub use client::DiscordApiClient;
pub use models::{ApiError, CommandDescriptor};
