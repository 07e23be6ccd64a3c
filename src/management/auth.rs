use std::{future::Future, time::Duration};

use tokio::{
    sync::{Mutex, RwLock},
    time::Instant,
};
use tracing::{debug, info, warn};

use crate::{error::AuthError, types::TokenGrant};

/// Upper bound applied to granted lifetimes so `now + lifetime` cannot
/// overflow the clock. Roughly ten years.
const MAX_LIFETIME_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// The network half of the token lifecycle: turns an authorization code or a
/// refresh token into a fresh grant.
pub trait TokenExchange: Send + Sync {
    fn exchange_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<TokenGrant, AuthError>> + Send;

    fn refresh(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Result<TokenGrant, AuthError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    Unset,
    Valid,
    Expired,
}

impl CredentialState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialState::Unset => "unset",
            CredentialState::Valid => "valid",
            CredentialState::Expired => "expired",
        }
    }
}

/// The single cached credential. Always replaced as a whole, so a reader
/// never pairs a token with another grant's expiry.
#[derive(Debug, Clone, Default)]
pub struct CachedCredential {
    pub token: String,
    pub expires_at: Option<Instant>,
    pub refresh_token: Option<String>,
}

impl CachedCredential {
    fn issued(token: String, lifetime_secs: i64, refresh_token: Option<String>) -> Self {
        let lifetime = Duration::from_secs((lifetime_secs.max(0) as u64).min(MAX_LIFETIME_SECS));
        Self {
            token,
            expires_at: Some(Instant::now() + lifetime),
            refresh_token,
        }
    }

    pub fn state(&self) -> CredentialState {
        match self.expires_at {
            None => CredentialState::Unset,
            Some(at) if Instant::now() < at => CredentialState::Valid,
            Some(_) => CredentialState::Expired,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.state() == CredentialState::Valid
    }

    /// Time left before expiry, `None` unless the credential is valid.
    pub fn remaining(&self) -> Option<Duration> {
        let at = self.expires_at?;
        let now = Instant::now();
        (now < at).then(|| at - now)
    }
}

/// Point-in-time view of the credential without the secret parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialStatus {
    pub state: CredentialState,
    pub expires_in: Option<Duration>,
}

/// Owns the one access token the relay works with.
///
/// Reads go through a shared lock and never trigger network traffic. Every
/// mutation first takes the refresh gate, so at most one exchange is in flight
/// at a time; the credential itself is write-locked only for the final store,
/// which keeps readers unblocked while an exchange waits on the network.
pub struct TokenManager<C> {
    client: C,
    credential: RwLock<CachedCredential>,
    refresh_gate: Mutex<()>,
}

impl<C: TokenExchange> TokenManager<C> {
    pub fn new(client: C) -> Self {
        TokenManager {
            client,
            credential: RwLock::new(CachedCredential::default()),
            refresh_gate: Mutex::new(()),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Overwrites the cached token. A lifetime of zero or less stores an
    /// already expired credential. The stored refresh token is kept.
    pub async fn set_token(&self, token: impl Into<String>, lifetime_secs: i64) {
        let _gate = self.refresh_gate.lock().await;
        let mut credential = self.credential.write().await;
        let refresh_token = credential.refresh_token.take();
        *credential = CachedCredential::issued(token.into(), lifetime_secs, refresh_token);
        debug!(lifetime_secs, "access token set");
    }

    /// Returns the cached token if it is still valid.
    pub async fn get_token(&self) -> Option<String> {
        let credential = self.credential.read().await;
        credential.is_valid().then(|| credential.token.clone())
    }

    /// Returns the cached token when valid, otherwise runs `refresh` once and
    /// caches its grant. Errors from `refresh` are returned as-is and leave
    /// the cache untouched.
    pub async fn refresh_token<F, Fut, E>(&self, refresh: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TokenGrant, E>>,
    {
        if let Some(token) = self.get_token().await {
            return Ok(token);
        }

        let _gate = self.refresh_gate.lock().await;

        // Another caller may have refreshed while we waited on the gate.
        if let Some(token) = self.get_token().await {
            debug!("token refreshed by a concurrent caller");
            return Ok(token);
        }

        let grant = refresh().await?;
        Ok(self.store(grant).await)
    }

    /// Exchanges an authorization code for a token, unless a valid token is
    /// already cached.
    pub async fn exchange_and_cache(&self, code: &str) -> Result<String, AuthError> {
        self.refresh_token(|| async {
            info!("exchanging authorization code for an access token");
            self.client.exchange_code(code).await.inspect_err(|e| {
                warn!(error = %e, "authorization code exchange failed");
            })
        })
        .await
    }

    /// Returns a valid token, using the stored refresh token if the cached one
    /// has expired. Makes a single refresh attempt.
    pub async fn ensure_token(&self) -> Result<String, AuthError> {
        self.refresh_token(|| async {
            let Some(refresh_token) = self.credential.read().await.refresh_token.clone() else {
                return Err(AuthError::NotAuthenticated);
            };

            info!("access token expired, refreshing");
            self.client.refresh(&refresh_token).await.inspect_err(|e| {
                warn!(error = %e, "token refresh failed");
            })
        })
        .await
    }

    pub async fn state(&self) -> CredentialState {
        self.credential.read().await.state()
    }

    pub async fn status(&self) -> CredentialStatus {
        let credential = self.credential.read().await;
        CredentialStatus {
            state: credential.state(),
            expires_in: credential.remaining(),
        }
    }

    /// A copy of the full credential, token included.
    pub async fn credential(&self) -> CachedCredential {
        self.credential.read().await.clone()
    }

    async fn store(&self, grant: TokenGrant) -> String {
        let mut credential = self.credential.write().await;
        let refresh_token = grant.refresh_token.or_else(|| credential.refresh_token.take());
        *credential = CachedCredential::issued(grant.access_token, grant.expires_in, refresh_token);
        info!(expires_in = grant.expires_in, "access token cached");
        credential.token.clone()
    }
}
