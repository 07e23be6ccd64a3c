use reqwest::{Client, StatusCode};

use crate::{error::AuthError, types::UserProfile};

/// Fetches the profile of the user the token was issued to (`GET /me`).
pub async fn get_profile(
    http: &Client,
    endpoint: &str,
    access_token: &str,
) -> Result<UserProfile, AuthError> {
    let res = http
        .get(endpoint)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(upstream)?;

    let status = res.status();
    if status != StatusCode::OK {
        let body = res.text().await.unwrap_or_default();
        return Err(AuthError::Upstream {
            status: status.as_u16(),
            message: body,
        });
    }

    res.json::<UserProfile>().await.map_err(upstream)
}

fn upstream(err: reqwest::Error) -> AuthError {
    AuthError::Upstream {
        status: err
            .status()
            .map(|s| s.as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY.as_u16()),
        message: err.to_string(),
    }
}
