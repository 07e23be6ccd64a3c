mod auth;

pub use auth::CachedCredential;
pub use auth::CredentialState;
pub use auth::CredentialStatus;
pub use auth::TokenExchange;
pub use auth::TokenManager;
