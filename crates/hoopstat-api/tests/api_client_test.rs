#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hoopstat_api::{ApiClient, Error, FavoriteKind, SessionCookie, TokenJar};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url, Arc::new(TokenJar::new()));
    (server, client)
}

fn sign_in(client: &ApiClient, token: &str) {
    client
        .session()
        .store(SessionCookie::issue(SecretString::from(token.to_string())));
}

// ── Players ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_players_sorted_by_ppg() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/players/sortedbyppg/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 201939,
                "name": "Stephen Curry",
                "position": "G",
                "team": "GSW",
                "image_url": "https://cdn.example.com/201939.png",
                "ppg": 26.4,
                "rpg": 4.5,
                "apg": 5.1
            },
            { "id": 1629029, "name": "Luka Doncic", "ppg": 28.1 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let players = client.players_sorted_by_ppg(2).await.unwrap();

    assert_eq!(players.len(), 2);
    assert_eq!(players[0].name, "Stephen Curry");
    assert_eq!(players[0].team.as_deref(), Some("GSW"));
    assert_eq!(players[1].id, 1_629_029);
    assert_eq!(players[1].rpg, None);
}

#[tokio::test]
async fn test_empty_page_is_not_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/players/sortedbyppg/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let players = client.players_sorted_by_ppg(9).await.unwrap();
    assert!(players.is_empty());
}

// ── Favorites ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_attached_when_signed_in() {
    let (server, client) = setup().await;
    sign_in(&client, "header.payload.sig");

    Mock::given(method("GET"))
        .and(path("/favorites/player"))
        .and(header("authorization", "Bearer header.payload.sig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .expect(1)
        .mount(&server)
        .await;

    let ids = client.list_favorites(FavoriteKind::Player).await.unwrap();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_no_authorization_header_when_signed_out() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/favorites/team"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/favorites/team"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})))
        .mount(&server)
        .await;

    let result = client.list_favorites(FavoriteKind::Team).await;
    match result {
        Err(Error::Unauthorized { ref message }) => assert_eq!(message, "Not authenticated"),
        other => panic!("expected Unauthorized, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_add_and_remove_favorite() {
    let (server, client) = setup().await;
    sign_in(&client, "t");

    Mock::given(method("POST"))
        .and(path("/favorites/team/14"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "added"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/favorites/team/14"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.add_favorite(FavoriteKind::Team, 14).await.unwrap();
    client.remove_favorite(FavoriteKind::Team, 14).await.unwrap();
}

#[tokio::test]
async fn test_validation_error_on_unknown_entity() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/favorites/player/999999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Player not found"})),
        )
        .mount(&server)
        .await;

    let result = client.add_favorite(FavoriteKind::Player, 999_999).await;
    match result {
        Err(Error::Validation { status, ref message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("not found"), "unexpected message: {message}");
        }
        other => panic!("expected Validation error, got: {other:?}"),
    }
}

// ── Account ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"username": "kobe", "password": "mamba"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "a.b.c",
            "token_type": "bearer",
            "username": "kobe",
            "role": "premium"
        })))
        .mount(&server)
        .await;

    let secret = SecretString::from("mamba".to_string());
    let resp = client.login("kobe", &secret).await.unwrap();

    assert_eq!(resp.username.as_deref(), Some("kobe"));
    assert_eq!(resp.role.as_deref(), Some("premium"));
    assert_eq!(resp.token_type, "bearer");
}

#[tokio::test]
async fn test_login_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Incorrect username or password"})),
        )
        .mount(&server)
        .await;

    let secret = SecretString::from("wrong".to_string());
    let result = client.login("kobe", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_signup_conflict_is_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Username already registered"})),
        )
        .mount(&server)
        .await;

    let secret = SecretString::from("pw".to_string());
    let result = client.signup("kobe", "kobe@example.com", &secret).await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(message.contains("already registered"));
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_upgrade_returns_refreshed_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/upgrade"))
        .and(body_json(json!({"email": "kobe@example.com", "role": "ultimate"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "new.token.sig",
            "token_type": "bearer",
            "username": "kobe",
            "role": "ultimate"
        })))
        .mount(&server)
        .await;

    let resp = client.upgrade("kobe@example.com", "ultimate").await.unwrap();
    assert_eq!(resp.role.as_deref(), Some("ultimate"));
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.players_sorted_by_ppg(1).await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 503, .. }), "got: {err:?}");
    assert_eq!(err.status(), Some(503));
    assert!(!err.is_network());
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/players/sortedbyppg/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.players_sorted_by_ppg(1).await;
    match result {
        Err(Error::Deserialization { ref body, .. }) => assert!(body.contains("oops")),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Nothing listens on port 1.
    let uri = "http://127.0.0.1:1";
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse(uri).unwrap(),
        Arc::new(TokenJar::new()),
    );

    let err = client.players_sorted_by_ppg(1).await.unwrap_err();
    assert!(err.is_network(), "expected network error, got: {err:?}");
}
