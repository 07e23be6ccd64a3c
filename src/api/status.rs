use axum::{extract::State, response::Json};
use chrono::{TimeDelta, Utc};
use serde::Serialize;

use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub state: &'static str,
    pub expires_in: Option<u64>,
    pub expires_at: Option<String>,
}

pub async fn status(State(state): State<AppState>) -> Json<AuthStatus> {
    let status = state.tokens.status().await;
    let expires_at = status
        .expires_in
        .and_then(|left| TimeDelta::from_std(left).ok())
        .map(|left| (Utc::now() + left).to_rfc3339());

    Json(AuthStatus {
        state: status.state.as_str(),
        expires_in: status.expires_in.map(|left| left.as_secs()),
        expires_at,
    })
}
