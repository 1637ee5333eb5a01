//! Outbound status probes with primary/fallback endpoints.

use reqwest::Client;
use std::time::Duration;
use tracing::warn;

use crate::config::ProbeTarget;
use crate::models::{BotStatus, StatusSnapshot};

/// Short timeout so a hung bot cannot stall a dashboard request.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Longer timeout for the one-shot webhook diagnostic.
pub const PING_TEST_TIMEOUT: Duration = Duration::from_secs(10);

fn status_url(base: &str) -> String {
    format!("{}/status", base.trim_end_matches('/'))
}

/// Fetch one bot's status body: primary endpoint first, fallback on any
/// transport failure, locally synthesized offline JSON when both are dead.
/// Never returns an error.
pub async fn probe_status(client: &Client, target: &ProbeTarget) -> String {
    for base in [&target.primary_url, &target.fallback_url] {
        let request = client.get(status_url(base)).timeout(PROBE_TIMEOUT);
        match request.send().await {
            Ok(response) => match response.text().await {
                Ok(body) => return body,
                Err(e) => warn!("{}: unreadable body from {}: {}", target.label, base, e),
            },
            Err(e) => warn!("{} error at {}: {}", target.label, base, e),
        }
    }

    offline_body(&target.label)
}

/// Direct single-endpoint fetch for the diagnostic page; errors propagate to
/// the caller instead of being defaulted.
pub async fn fetch_snapshot(client: &Client, base: &str) -> Result<StatusSnapshot, reqwest::Error> {
    client
        .get(status_url(base))
        .timeout(PROBE_TIMEOUT)
        .send()
        .await?
        .json::<StatusSnapshot>()
        .await
}

fn offline_body(label: &str) -> String {
    let status = BotStatus::Offline {
        message: Some(format!("{} is not responding", label)),
    };
    serde_json::to_string(&status).unwrap_or_else(|_| r#"{"status":"offline"}"#.to_string())
}
