use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use teloxide::types::{Update, UpdateKind};
use tracing::{debug, info};

use crate::post::Poster;

/// Read-only per-process state; cloning it per request shares the same poster.
#[derive(Clone)]
pub struct AppState {
    pub cron_secret: Option<String>,
    pub poster: Arc<dyn Poster>,
}

/// Build the main router. Telegram delivers webhooks as POST to whatever path
/// the webhook was registered with, so every POST is treated as an update and
/// acknowledged; only GET /cron and GET /health are routed explicitly.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/cron",
            get(cron_handler)
                .post(webhook_handler)
                .fallback(not_found_handler),
        )
        .route(
            "/health",
            get(health_handler)
                .post(webhook_handler)
                .fallback(not_found_handler),
        )
        .fallback(root_fallback)
        .with_state(state)
}

pub async fn health_handler() -> &'static str {
    "ok"
}

#[derive(Deserialize)]
struct CronQuery {
    secret: Option<String>,
}

/// Secret-gated trigger for the autopost. Delivery failures are absorbed
/// inside the poster, so a caller with the right secret always sees "sent".
async fn cron_handler(State(state): State<AppState>, Query(query): Query<CronQuery>) -> Response {
    let authorized = match (&state.cron_secret, &query.secret) {
        (Some(expected), Some(got)) => got == expected,
        _ => false,
    };
    if !authorized {
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }

    info!("cron trigger accepted, delivering post");
    state.poster.deliver().await;
    "sent".into_response()
}

/// Webhook ingestion. Telegram expects a fast 2xx no matter what, otherwise
/// it keeps redelivering the update, so even an unparseable body is
/// acknowledged with 200 "OK".
async fn webhook_handler(body: Bytes) -> &'static str {
    match serde_json::from_slice::<Update>(&body) {
        Ok(update) => classify_update(&update),
        Err(e) => debug!("discarding unparseable webhook body: {e}"),
    }
    "OK"
}

/// Inbound messages are deliberately unhandled, not unfinished: the bot only
/// ever autoposts via /cron. Private and group chats are distinct branches so
/// the discard is explicit for both.
fn classify_update(update: &Update) {
    if let UpdateKind::Message(msg) = &update.kind {
        if msg.chat.is_private() {
            debug!(chat_id = %msg.chat.id, "ignoring private chat message");
        } else {
            debug!(chat_id = %msg.chat.id, "ignoring group chat message");
        }
    }
}

async fn not_found_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

async fn root_fallback(method: Method, body: Bytes) -> Response {
    if method == Method::POST {
        return webhook_handler(body).await.into_response();
    }
    not_found_handler().await.into_response()
}
