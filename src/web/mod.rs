//! HTTP surfaces of the two bot processes: the status endpoint, the plain
//! operational banner, and (relay bot only) the uptime-monitor webhook.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::models::BotStatus;
use crate::queue::PingQueue;
use crate::session::SharedSession;

pub const BANNER: &str = "Bot A is operational. This endpoint is used for status monitoring.";

/// Router for the plain status bot: banner at `/`, status at `/status`.
pub fn status_router(session: SharedSession) -> Router {
    Router::new()
        .route("/", get(handle_banner))
        .route("/status", get(handle_status))
        .with_state(session)
}

#[derive(Clone)]
pub struct RelayWebState {
    pub session: SharedSession,
    pub queue: Arc<PingQueue>,
    /// Channel id enqueued for every webhook hit.
    pub target_channel_id: u64,
}

/// Router for the relay bot: the webhook at `/`, status at `/status`.
pub fn relay_router(state: RelayWebState) -> Router {
    Router::new()
        .route("/", get(handle_webhook))
        .route("/status", get(handle_relay_status))
        .with_state(state)
}

/// Bind and serve a router until process exit.
pub async fn serve(router: Router, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await
}

async fn handle_banner() -> &'static str {
    BANNER
}

async fn handle_status(State(session): State<SharedSession>) -> Response {
    status_response(&session).await
}

async fn handle_relay_status(State(state): State<RelayWebState>) -> Response {
    status_response(&state.session).await
}

/// Build the status body from the shared session record. Never lets an
/// error escape to the transport layer: a failure to serialize degrades to
/// the documented 500 error JSON.
async fn status_response(session: &SharedSession) -> Response {
    let status = {
        let session = session.read().await;
        match &session.bot_name {
            Some(name) => BotStatus::Online {
                bot_name: name.clone(),
                server_count: session.server_count,
            },
            None => BotStatus::Waiting,
        }
    };

    match serde_json::to_value(&status) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            error!("Status check error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "error", "message": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// Called by UptimeRobot or similar. The only action taken here is pushing
/// the target channel id onto the queue tail; all chat-protocol I/O happens
/// later, inside the drain task.
async fn handle_webhook(State(state): State<RelayWebState>) -> Response {
    info!("Ping webhook accessed");
    info!("Queuing ping to channel {}", state.target_channel_id);
    state.queue.push(state.target_channel_id).await;
    (
        StatusCode::OK,
        Json(json!({"status": "ping sent", "success": true})),
    )
        .into_response()
}
