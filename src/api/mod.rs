//! # API Module
//!
//! HTTP endpoints of the relay. Every handler receives the shared
//! [`AppState`](crate::server::AppState); none of them keeps state of its own.
//!
//! ## Endpoints
//!
//! - [`health`] - liveness plus the current credential state
//! - [`login`] - redirects the user to the Spotify authorize page
//! - [`callback`] - completes the authorization-code exchange and returns the
//!   user's profile
//! - [`me`] - profile of the authorized user, refreshing the token if needed
//! - [`status`] - whether a token is cached and how long it stays valid
//!
//! ## Errors
//!
//! Handlers return [`ApiError`], rendered as `{"error": "..."}`:
//! - missing or invalid request parameters: `400`
//! - no usable token: `401`
//! - token exchange failures: `500`
//! - Web API failures: the upstream status if it is a 4xx or 5xx, else `502`

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{error::AuthError, types::ErrorBody};

mod callback;
mod health;
mod login;
mod me;
mod status;

pub use callback::callback;
pub use health::health;
pub use login::login;
pub use me::me;
pub use status::status;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Auth(AuthError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(AuthError::NotAuthenticated) => StatusCode::UNAUTHORIZED,
            ApiError::Auth(AuthError::ExchangeFailed { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(AuthError::Upstream { status, .. }) => {
                match StatusCode::from_u16(*status) {
                    Ok(s) if s.is_client_error() || s.is_server_error() => s,
                    _ => StatusCode::BAD_GATEWAY,
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            ApiError::BadRequest(message) => message,
            ApiError::Auth(err) => err.to_string(),
        };

        if status.is_server_error() {
            tracing::warn!(%status, %error, "request failed");
        }

        (status, Json(ErrorBody { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(status: u16) -> StatusCode {
        ApiError::from(AuthError::Upstream {
            status,
            message: String::new(),
        })
        .status()
    }

    #[test]
    fn upstream_error_statuses_pass_through() {
        assert_eq!(upstream(401), StatusCode::UNAUTHORIZED);
        assert_eq!(upstream(429), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(upstream(503), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn non_error_upstream_statuses_become_bad_gateway() {
        for status in [100, 200, 204, 302, 304, 600, 999] {
            assert_eq!(upstream(status), StatusCode::BAD_GATEWAY, "status {status}");
        }
    }
}
