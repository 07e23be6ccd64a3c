//! Error types for the token lifecycle and the upstream calls it depends on.
//!
//! Absence of a valid token is not an error for [`TokenManager::get_token`]
//! (it returns `None`); [`AuthError::NotAuthenticated`] only shows up where a
//! caller asked the relay to produce a token and it could not.
//!
//! [`TokenManager::get_token`]: crate::management::TokenManager::get_token

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint rejected the grant, or could not be reached at all.
    #[error("token exchange failed{}: {message}", status_suffix(.status))]
    ExchangeFailed {
        status: Option<u16>,
        message: String,
    },

    /// No valid token is cached and there is nothing to refresh it with.
    #[error("not authenticated")]
    NotAuthenticated,

    /// A Web API call made with a valid token came back with an error.
    #[error("upstream request failed ({status}): {message}")]
    Upstream { status: u16, message: String },
}

impl AuthError {
    pub fn exchange(status: u16, message: impl Into<String>) -> Self {
        AuthError::ExchangeFailed {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport(err: reqwest::Error) -> Self {
        AuthError::ExchangeFailed {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" ({code})"),
        None => String::new(),
    }
}
