//! # Spotify Integration Module
//!
//! Clients for the two Spotify services the relay talks to:
//!
//! - [`auth`] - the accounts service: builds the authorize URL and exchanges
//!   authorization codes and refresh tokens at the token endpoint. Implements
//!   [`TokenExchange`](crate::management::TokenExchange) so the token manager
//!   can drive it.
//! - [`profile`] - the Web API `/me` lookup used to confirm a fresh credential.
//!
//! Both share one `reqwest::Client`, built in `main` with the configured
//! timeout. The token manager itself imposes no timeout on these calls.

pub mod auth;
pub mod profile;
