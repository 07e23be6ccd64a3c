use axum::{
    extract::{Query, State},
    response::Json,
};

use crate::{
    api::ApiError,
    server::AppState,
    spotify::profile::get_profile,
    types::{CallbackParams, UserProfile},
};

/// Redirect target of the Spotify authorize page.
///
/// The `state` is checked (and consumed) first. A valid code is exchanged
/// through the token manager, which keeps the resulting token; the response
/// is the profile of the user who granted access.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<UserProfile>, ApiError> {
    let known = match params.state.as_deref() {
        Some(value) => state.pending.take(value).await,
        None => false,
    };
    if !known {
        return Err(ApiError::BadRequest("Invalid or missing state".into()));
    }

    if let Some(reason) = params.error {
        return Err(ApiError::BadRequest(format!(
            "Authorization denied: {reason}"
        )));
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return Err(ApiError::BadRequest("Missing authorization code".into()));
    };

    let token = state.tokens.exchange_and_cache(&code).await?;
    let profile = get_profile(&state.http, &state.config.api_endpoint("/me"), &token).await?;

    Ok(Json(profile))
}
