//! Aggregation proxy: polls both bots' status endpoints and renders a
//! combined dashboard. Fully stateless — each request makes its own
//! short-lived outbound calls; neither bot knows the proxy exists.

pub mod fetch;
pub mod html;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use reqwest::Client;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ProxyConfig;
use crate::models::StatusSnapshot;
use fetch::{fetch_snapshot, probe_status, PING_TEST_TIMEOUT};

#[derive(Clone)]
struct ProxyState {
    config: Arc<ProxyConfig>,
    client: Client,
}

pub fn router(config: ProxyConfig) -> Router {
    let state = ProxyState {
        config: Arc::new(config),
        client: Client::new(),
    };
    Router::new()
        .route("/", get(handle_dashboard))
        .route("/bot-a", get(handle_bot_a))
        .route("/bot-b", get(handle_bot_b))
        .route("/ping-test", get(handle_ping_test))
        .route("/discord-status", get(handle_discord_status))
        .with_state(state)
}

/// Bind the primary port; on bind failure (typically the port already being
/// in use) bind the single fallback port instead. No further candidates are
/// tried.
async fn bind_with_fallback(port: u16, fallback_port: u16) -> std::io::Result<TcpListener> {
    match TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => Ok(listener),
        Err(e) => {
            warn!("Port {} is busy ({}), trying port {}", port, e, fallback_port);
            TcpListener::bind(("0.0.0.0", fallback_port)).await
        }
    }
}

/// Bind (with port fallback) and serve until process exit.
pub async fn run(config: ProxyConfig) -> std::io::Result<()> {
    let listener = bind_with_fallback(config.port, config.fallback_port).await?;
    info!("Status dashboard listening on {}", listener.local_addr()?);
    axum::serve(listener, router(config)).await
}

async fn handle_dashboard(State(state): State<ProxyState>) -> Html<String> {
    let bot_a_body = probe_status(&state.client, &state.config.bot_a).await;
    let bot_b_body = probe_status(&state.client, &state.config.bot_b).await;

    let bot_a = StatusSnapshot::parse(&bot_a_body);
    let bot_b = StatusSnapshot::parse(&bot_b_body);
    Html(html::render_dashboard(&bot_a, &bot_b))
}

/// Raw pass-through of Bot A's status body, for programmatic polling.
async fn handle_bot_a(State(state): State<ProxyState>) -> String {
    probe_status(&state.client, &state.config.bot_a).await
}

async fn handle_bot_b(State(state): State<ProxyState>) -> String {
    probe_status(&state.client, &state.config.bot_b).await
}

/// Diagnostic: hit the relay bot's webhook once and show the raw outcome,
/// then auto-redirect to the connection status page.
async fn handle_ping_test(State(state): State<ProxyState>) -> Html<String> {
    let request = state
        .client
        .get(&state.config.webhook_url)
        .timeout(PING_TEST_TIMEOUT);

    match request.send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Html(html::render_ping_test(status, &body))
        }
        Err(e) => Html(format!("Error pinging Bot B: {}", e)),
    }
}

/// Diagnostic: direct fetch of both status bodies, no fallback ports. Any
/// fetch or decode failure collapses the whole page to an error string.
async fn handle_discord_status(State(state): State<ProxyState>) -> Html<String> {
    let bot_a = fetch_snapshot(&state.client, &state.config.bot_a.primary_url).await;
    let bot_b = fetch_snapshot(&state.client, &state.config.bot_b.primary_url).await;

    match (bot_a, bot_b) {
        (Ok(bot_a), Ok(bot_b)) => Html(html::render_discord_status(&bot_a, &bot_b)),
        (Err(e), _) | (_, Err(e)) => Html(format!("Error checking Discord status: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use tower::ServiceExt;

    use crate::config::ProbeTarget;

    // Nothing listens here; connections are refused immediately.
    const DEAD_URL: &str = "http://127.0.0.1:1";

    fn target(label: &str, primary: &str, fallback: &str) -> ProbeTarget {
        ProbeTarget {
            label: label.to_string(),
            primary_url: primary.to_string(),
            fallback_url: fallback.to_string(),
        }
    }

    fn config(bot_a: ProbeTarget, bot_b: ProbeTarget, webhook_url: String) -> ProxyConfig {
        ProxyConfig {
            port: 5000,
            fallback_port: 7000,
            bot_a,
            bot_b,
            webhook_url,
        }
    }

    async fn get_body(router: Router, uri: &str) -> String {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[tokio::test]
    async fn test_bot_a_passthrough_uses_fallback_when_primary_is_dead() {
        let upstream = MockServer::start_async().await;
        let body = r#"{"status":"online","bot_name":"X","server_count":3}"#;
        upstream.mock(|when, then| {
            when.method(GET).path("/status");
            then.status(200).body(body);
        });

        let app = router(config(
            target("Bot A", DEAD_URL, &upstream.base_url()),
            target("Bot B", DEAD_URL, DEAD_URL),
            DEAD_URL.to_string(),
        ));

        assert_eq!(get_body(app, "/bot-a").await, body);
    }

    #[tokio::test]
    async fn test_dashboard_defaults_malformed_body_to_offline_unknown() {
        let upstream = MockServer::start_async().await;
        upstream.mock(|when, then| {
            when.method(GET).path("/status");
            then.status(200).body("<html>not json</html>");
        });

        let app = router(config(
            target("Bot A", &upstream.base_url(), DEAD_URL),
            target("Bot B", DEAD_URL, DEAD_URL),
            DEAD_URL.to_string(),
        ));

        let page = get_body(app, "/").await;
        assert!(page.contains("Unknown"));
        assert!(page.contains("OFFLINE"));
    }

    #[tokio::test]
    async fn test_dashboard_renders_name_and_uppercased_state() {
        let upstream = MockServer::start_async().await;
        upstream.mock(|when, then| {
            when.method(GET).path("/status");
            then.status(200)
                .body(r#"{"status":"online","bot_name":"Bot A#1234","server_count":3}"#);
        });

        let app = router(config(
            target("Bot A", &upstream.base_url(), DEAD_URL),
            target("Bot B", DEAD_URL, DEAD_URL),
            DEAD_URL.to_string(),
        ));

        let page = get_body(app, "/").await;
        assert!(page.contains("Bot A#1234"));
        assert!(page.contains("ONLINE"));
        // Client-driven refresh, not server push.
        assert!(page.contains(r#"http-equiv="refresh" content="30""#));
    }

    #[tokio::test]
    async fn test_ping_test_shows_code_and_body() {
        let webhook = MockServer::start_async().await;
        webhook.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(r#"{"status":"ping sent","success":true}"#);
        });

        let app = router(config(
            target("Bot A", DEAD_URL, DEAD_URL),
            target("Bot B", DEAD_URL, DEAD_URL),
            format!("{}/", webhook.base_url()),
        ));

        let page = get_body(app, "/ping-test").await;
        assert!(page.contains("Status code: 200"));
        assert!(page.contains("ping sent"));
        assert!(page.contains("url=/discord-status"));
    }

    #[tokio::test]
    async fn test_discord_status_collapses_on_any_failure() {
        let app = router(config(
            target("Bot A", DEAD_URL, DEAD_URL),
            target("Bot B", DEAD_URL, DEAD_URL),
            DEAD_URL.to_string(),
        ));

        let page = get_body(app, "/discord-status").await;
        assert!(page.starts_with("Error checking Discord status:"));
    }

    #[tokio::test]
    async fn test_bind_prefers_primary_port() {
        let probe = TcpListener::bind(("0.0.0.0", 0)).await.expect("bind");
        let free_port = probe.local_addr().expect("addr").port();
        drop(probe);

        let listener = bind_with_fallback(free_port, 0).await.expect("bind");
        assert_eq!(listener.local_addr().expect("addr").port(), free_port);
    }

    #[tokio::test]
    async fn test_bind_falls_back_when_primary_port_is_busy() {
        let occupied = TcpListener::bind(("0.0.0.0", 0)).await.expect("bind");
        let busy_port = occupied.local_addr().expect("addr").port();

        let probe = TcpListener::bind(("0.0.0.0", 0)).await.expect("bind");
        let fallback_port = probe.local_addr().expect("addr").port();
        drop(probe);

        let listener = bind_with_fallback(busy_port, fallback_port)
            .await
            .expect("fallback bind");
        assert_eq!(listener.local_addr().expect("addr").port(), fallback_port);
    }

    #[tokio::test]
    async fn test_discord_status_renders_both_bots() {
        let upstream = MockServer::start_async().await;
        upstream.mock(|when, then| {
            when.method(GET).path("/status");
            then.status(200)
                .body(r#"{"status":"online","bot_name":"Bot B#5678","server_count":2}"#);
        });

        let app = router(config(
            target("Bot A", &upstream.base_url(), DEAD_URL),
            target("Bot B", &upstream.base_url(), DEAD_URL),
            DEAD_URL.to_string(),
        ));

        let page = get_body(app, "/discord-status").await;
        assert!(page.contains("Bot B#5678"));
        assert!(page.contains("online"));
    }
}
