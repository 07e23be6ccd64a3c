use axum::{extract::State, response::Json};

use crate::{
    api::ApiError, server::AppState, spotify::profile::get_profile, types::UserProfile,
};

pub async fn me(State(state): State<AppState>) -> Result<Json<UserProfile>, ApiError> {
    let token = state.tokens.ensure_token().await?;
    let profile = get_profile(&state.http, &state.config.api_endpoint("/me"), &token).await?;
    Ok(Json(profile))
}
