use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use reqwest::Client;
use tokio::net::TcpListener;

use crate::{
    Res, api,
    config::Config,
    management::TokenManager,
    spotify::auth::SpotifyAuthClient,
    utils::PendingStates,
};

/// Everything the handlers share. Cloned per request, so all fields are
/// cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
    pub tokens: Arc<TokenManager<SpotifyAuthClient>>,
    pub pending: Arc<PendingStates>,
}

impl AppState {
    pub fn new(config: Config, http: Client) -> Self {
        let tokens = TokenManager::new(SpotifyAuthClient::new(&config, http.clone()));
        AppState {
            config: Arc::new(config),
            http,
            tokens: Arc::new(tokens),
            pending: Arc::new(PendingStates::new()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/me", get(api::me))
        .route("/auth/status", get(api::status))
        .with_state(state)
}

pub async fn start_api_server(state: AppState, addr: SocketAddr) -> Res<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "relay listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
