use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::{config::Config, error::AuthError, management::TokenExchange, types::TokenGrant};

/// Talks to the Spotify accounts service on behalf of the relay.
///
/// Client credentials are sent in the form body, the way Spotify accepts them
/// for the authorization-code flow with a confidential client.
#[derive(Debug, Clone)]
pub struct SpotifyAuthClient {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scope: String,
    auth_url: Url,
    token_url: Url,
}

impl SpotifyAuthClient {
    pub fn new(config: &Config, http: Client) -> Self {
        SpotifyAuthClient {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scope: config.scope.clone(),
            auth_url: config.auth_url.clone(),
            token_url: config.token_url.clone(),
        }
    }

    /// The accounts URL the user is sent to in order to grant access.
    pub fn authorize_url(&self, state: &str) -> Url {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.scope)
            .append_pair("state", state);
        url
    }

    async fn request_grant(&self, form: &[(&str, &str)]) -> Result<TokenGrant, AuthError> {
        let res = self
            .http
            .post(self.token_url.clone())
            .form(form)
            .send()
            .await
            .map_err(AuthError::transport)?;

        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(AuthError::exchange(status.as_u16(), body));
        }

        let grant: TokenGrant = res.json().await.map_err(AuthError::transport)?;
        debug!(
            expires_in = grant.expires_in,
            has_refresh_token = grant.refresh_token.is_some(),
            "token endpoint returned a grant"
        );
        Ok(grant)
    }
}

impl TokenExchange for SpotifyAuthClient {
    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, AuthError> {
        self.request_grant(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("redirect_uri", &self.redirect_uri),
        ])
        .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, AuthError> {
        self.request_grant(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ])
        .await
    }
}
