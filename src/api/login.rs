use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::server::AppState;

/// Sends the user to the Spotify authorize page with a fresh `state`.
pub async fn login(State(state): State<AppState>) -> Response {
    let csrf = state.pending.issue().await;
    let url = state.tokens.client().authorize_url(&csrf);
    (StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response()
}
