use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info};

use super::models::{ApiError, CommandDescriptor, InteractionCommandData, InteractionRequest};

/// Minimal Discord REST client used by the relay trigger.
///
/// This deliberately does not go through the gateway client: the peer bot
/// lives in another process, so the only way to make it look active is to
/// invoke one of its registered commands over plain HTTP.
pub struct DiscordApiClient {
    http_client: HttpClient,
    bot_token: String,
    base_url: String,
}

impl DiscordApiClient {
    const DEFAULT_BASE_URL: &'static str = "https://discord.com/api/v10";

    /// Bounded timeout so a hung peer cannot stall the drain task.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a new client authenticating as the given bot.
    pub fn new(bot_token: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            bot_token,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(bot_token: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            bot_token,
            base_url,
        }
    }

    fn create_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bot {}", self.bot_token))
            .map_err(|e| ApiError::Request(format!("Failed to create auth header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    /// GET /applications/{application_id}/commands
    ///
    /// Retrieves the peer application's registered global command list.
    pub async fn get_application_commands(
        &self,
        application_id: &str,
    ) -> Result<Vec<CommandDescriptor>, ApiError> {
        let url = format!("{}/applications/{}/commands", self.base_url, application_id);
        let headers = self.create_headers()?;

        let response = self
            .http_client
            .get(&url)
            .headers(headers)
            .timeout(Self::REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::Request(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::UnexpectedStatus(status, body));
        }

        response
            .json::<Vec<CommandDescriptor>>()
            .await
            .map_err(|e| ApiError::Deserialization(format!("Failed to parse command list: {}", e)))
    }

    /// Remotely invoke the peer application's `ping` command.
    ///
    /// Looks the command up by name in the peer's registered list, then posts
    /// a synthetic application-command interaction scoped to the given guild
    /// and channel. A 204 from the API counts as success; nothing further is
    /// awaited — whether the peer actually answered is not our concern.
    pub async fn trigger_ping_command(
        &self,
        application_id: &str,
        guild_id: Option<u64>,
        channel_id: u64,
    ) -> Result<(), ApiError> {
        let commands = self.get_application_commands(application_id).await?;
        let ping = commands
            .into_iter()
            .find(|c| c.name == "ping")
            .ok_or_else(|| ApiError::CommandNotFound("ping".to_string()))?;

        debug!("Found peer ping command with id {}", ping.id);

        let payload = InteractionRequest {
            kind: 2,
            application_id: application_id.to_string(),
            guild_id: guild_id.map(|id| id.to_string()),
            channel_id: channel_id.to_string(),
            data: InteractionCommandData {
                name: "ping".to_string(),
                id: ping.id,
                kind: 1,
            },
        };

        let url = format!("{}/interactions", self.base_url);
        let headers = self.create_headers()?;

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .timeout(Self::REQUEST_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::Request(format!("Request failed: {}", e)))?;

        if response.status() == StatusCode::NO_CONTENT {
            info!("Successfully triggered peer's slash command");
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::UnexpectedStatus(status, body))
        }
    }
}
