use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use crate::server::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let credential = state.tokens.state().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "token": credential.as_str(),
    }))
}
