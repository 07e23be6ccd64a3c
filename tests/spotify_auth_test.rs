mod support;

use reqwest::Client;
use spotrelay::{
    error::AuthError,
    management::TokenExchange,
    spotify::{auth::SpotifyAuthClient, profile::get_profile},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path},
};

use support::{CLIENT_ID, profile_body, test_config, token_body};

async fn client_for(server: &MockServer) -> SpotifyAuthClient {
    SpotifyAuthClient::new(&test_config(&server.uri()), Client::new())
}

#[tokio::test]
async fn test_exchange_code_posts_form_and_parses_grant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code"))
        .and(body_string_contains("client_id=test-client"))
        .and(body_string_contains("client_secret=test-secret"))
        .and(body_string_contains(
            "redirect_uri=http%3A%2F%2F127.0.0.1%3A8080%2Fcallback",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_body("abc123", 3600, Some("r-1"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let grant = client_for(&server).await.exchange_code("auth-code").await.unwrap();

    assert_eq!(grant.access_token, "abc123");
    assert_eq!(grant.token_type, "Bearer");
    assert_eq!(grant.expires_in, 3600);
    assert_eq!(grant.refresh_token.as_deref(), Some("r-1"));
}

#[tokio::test]
async fn test_rejected_code_maps_to_exchange_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"error":"invalid_grant","error_description":"Invalid authorization code"}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).await.exchange_code("stale").await.unwrap_err();

    match err {
        AuthError::ExchangeFailed { status, message } => {
            assert_eq!(status, Some(400));
            assert!(message.contains("invalid_grant"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_grant_is_an_exchange_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.exchange_code("code").await.unwrap_err();

    assert!(matches!(err, AuthError::ExchangeFailed { status: None, .. }));
}

#[tokio::test]
async fn test_unreachable_token_endpoint_is_an_exchange_failure() {
    // Nothing listens on port 1.
    let config = test_config("http://127.0.0.1:1");

    let client = SpotifyAuthClient::new(&config, Client::new());
    let err = client.exchange_code("code").await.unwrap_err();

    assert!(matches!(err, AuthError::ExchangeFailed { status: None, .. }));
}

#[tokio::test]
async fn test_refresh_uses_refresh_token_grant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=r-1"))
        .and(body_string_contains("client_id=test-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("fresh", 1800, None)))
        .expect(1)
        .mount(&server)
        .await;

    let grant = client_for(&server).await.refresh("r-1").await.unwrap();

    assert_eq!(grant.access_token, "fresh");
    assert_eq!(grant.expires_in, 1800);
    assert_eq!(grant.refresh_token, None);
}

#[tokio::test]
async fn test_authorize_url_carries_client_and_state() {
    let server = MockServer::start().await;
    let url = client_for(&server).await.authorize_url("xyz");

    assert_eq!(url.path(), "/authorize");
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let get = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    assert_eq!(get("client_id"), Some(CLIENT_ID));
    assert_eq!(get("response_type"), Some("code"));
    assert_eq!(get("redirect_uri"), Some(support::REDIRECT_URI));
    assert_eq!(get("state"), Some("xyz"));
    assert!(get("scope").unwrap().contains("user-read-email"));
}

#[tokio::test]
async fn test_get_profile_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let profile = get_profile(&Client::new(), &config.api_endpoint("/me"), "abc123")
        .await
        .unwrap();

    assert_eq!(profile.id, "listener-1");
    assert_eq!(profile.display_name.as_deref(), Some("Test Listener"));
    assert_eq!(profile.product.as_deref(), Some("premium"));
}

#[tokio::test]
async fn test_get_profile_passes_upstream_status_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("The access token expired"))
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let err = get_profile(&Client::new(), &config.api_endpoint("/me"), "old")
        .await
        .unwrap_err();

    match err {
        AuthError::Upstream { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("expired"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
