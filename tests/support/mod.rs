#![allow(dead_code)]

use std::collections::HashMap;

use spotrelay::config::Config;

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const REDIRECT_URI: &str = "http://127.0.0.1:8080/callback";

/// Configuration pointing every Spotify endpoint at `upstream`.
pub fn test_config(upstream: &str) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("SPOTIFY_CLIENT_ID", CLIENT_ID.to_string()),
        ("SPOTIFY_CLIENT_SECRET", CLIENT_SECRET.to_string()),
        ("SPOTIFY_REDIRECT_URI", REDIRECT_URI.to_string()),
        ("SPOTIFY_API_AUTH_URL", format!("{upstream}/authorize")),
        ("SPOTIFY_API_TOKEN_URL", format!("{upstream}/api/token")),
        ("SPOTIFY_API_URL", format!("{upstream}/v1")),
    ]);

    Config::from_lookup(|key| vars.get(key).cloned()).expect("test config is valid")
}

pub fn token_body(
    access_token: &str,
    expires_in: i64,
    refresh_token: Option<&str>,
) -> serde_json::Value {
    let mut body = serde_json::json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": expires_in,
        "scope": "user-read-email user-read-private",
    });
    if let Some(refresh_token) = refresh_token {
        body["refresh_token"] = serde_json::Value::from(refresh_token);
    }
    body
}

pub fn profile_body() -> serde_json::Value {
    serde_json::json!({
        "display_name": "Test Listener",
        "id": "listener-1",
        "email": "listener@example.com",
        "country": "DE",
        "product": "premium",
        "uri": "spotify:user:listener-1",
    })
}
