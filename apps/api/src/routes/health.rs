use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports service version plus the models and split mode this instance runs with.
/// Does not contact the model server.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "ats-api",
        "embed_model": config.embed_model,
        "chat_model": config.chat_model,
        "section_split_mode": config.split_mode.as_str(),
    }))
}
