//! Web surface
//!
//! The chat widget page, the JSON chat/mood API and the health route. Turns
//! are serialized per session through the session's mutex; concurrent
//! sessions are independent.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;

use crate::chat::{ChatConfig, ChatSession};
use crate::providers::Provider;

/// Shared server state.
pub struct AppState {
    provider: Arc<dyn Provider>,
    config: ChatConfig,
    sessions: Mutex<HashMap<String, Arc<Mutex<ChatSession>>>>,
}

impl AppState {
    pub fn new(provider: Arc<dyn Provider>, config: ChatConfig) -> Self {
        Self {
            provider,
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Existing session, or a fresh one when the id is unknown or absent.
    /// The id in the response is authoritative for the client.
    async fn session(&self, id: Option<&str>) -> (String, Arc<Mutex<ChatSession>>) {
        let mut sessions = self.sessions.lock().await;

        if let Some(id) = id {
            if let Some(session) = sessions.get(id) {
                return (id.to_string(), Arc::clone(session));
            }
        }

        let session = ChatSession::new(Arc::clone(&self.provider), &self.config);
        let id = session.meta.id.clone();
        let session = Arc::new(Mutex::new(session));
        sessions.insert(id.clone(), Arc::clone(&session));
        info!(session = %id, "new chat session");

        (id, session)
    }
}

/// Builds the application router.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/chat", post(chat))
        .route("/api/mood", get(mood))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("chat.html"))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    session_id: Option<String>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct MoodQuery {
    session_id: Option<String>,
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<serde_json::Value> {
    let (id, session) = state.session(request.session_id.as_deref()).await;
    let mut session = session.lock().await;

    let report = session.handle(&request.message).await;

    Json(json!({
        "session_id": id,
        "input": report.input,
        "reply": report.reply,
        "transcript": session.messages(),
        "mood": report.mood,
    }))
}

async fn mood(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MoodQuery>,
) -> Json<serde_json::Value> {
    let (id, session) = state.session(query.session_id.as_deref()).await;
    let session = session.lock().await;

    Json(json!({
        "session_id": id,
        "mood": session.snapshot(),
    }))
}
