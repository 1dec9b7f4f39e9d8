//! Mock API tests for the reservation client.
//!
//! These tests use wiremock to simulate the reservation backend and test the
//! client's behavior without requiring network access or real credentials.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use meetroom_core::{
    AccessToken, ApiUrl, CredentialStore, Credentials, ErrorKind, MemoryCredentialStore,
    RefreshToken, SessionEvents, TimeSlot,
};
use meetroom_http::{ClientConfig, ReservationClient, ReservationStatus};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct Events(Mutex<Vec<String>>);

impl Events {
    fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn count(&self, name: &str) -> usize {
        self.all().iter().filter(|e| e.as_str() == name).count()
    }
}

impl SessionEvents for Events {
    fn request_failed(&self, message: &str) {
        self.0.lock().unwrap().push(format!("failed:{message}"));
    }

    fn network_unreachable(&self, _detail: &str) {
        self.0.lock().unwrap().push("unreachable".to_string());
    }

    fn session_expired(&self) {
        self.0.lock().unwrap().push("expired".to_string());
    }

    fn redirect_to_login(&self) {
        self.0.lock().unwrap().push("redirect".to_string());
    }
}

/// Helper to create an API URL from a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    // For tests, we need to allow HTTP localhost
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

struct Fixture {
    client: ReservationClient,
    store: Arc<MemoryCredentialStore>,
    events: Arc<Events>,
}

fn fixture(server: &MockServer, store: MemoryCredentialStore) -> Fixture {
    fixture_with(ClientConfig::new(mock_api_url(server)), store)
}

fn fixture_with(config: ClientConfig, store: MemoryCredentialStore) -> Fixture {
    let store = Arc::new(store);
    let events = Arc::new(Events::default());
    let client = ReservationClient::new(config, store.clone(), events.clone()).unwrap();
    Fixture {
        client,
        store,
        events,
    }
}

fn logged_in() -> MemoryCredentialStore {
    MemoryCredentialStore::with_tokens(AccessToken::new("access1"), Some(RefreshToken::new("r1")))
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": 0, "msg": "ok", "data": data}))
}

fn rooms() -> serde_json::Value {
    json!([{
        "id": 1,
        "name": "First meeting room",
        "room_no": "A101",
        "capacity": 20,
        "area": 40,
        "usage": "Stand-up",
        "photo": "/media/rooms/room1.jpg",
        "is_available": true
    }])
}

fn expired() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({
        "detail": "Given token not valid for any token type",
        "code": "token_not_valid"
    }))
}

fn slot() -> TimeSlot {
    TimeSlot::new(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(), 9, 11).unwrap()
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({"username": "alice", "password": "secret123"})))
        .respond_with(ok(json!({"access": "access1", "refresh": "r1"})))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server, MemoryCredentialStore::new());
    f.client
        .login(&Credentials::new("alice", "secret123"))
        .await
        .unwrap();

    assert!(f.client.is_logged_in());
    assert_eq!(f.store.access_token(), Some(AccessToken::new("access1")));
    assert_eq!(f.store.refresh_token(), Some(RefreshToken::new("r1")));
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 404,
            "msg": "invalid username or password",
            "data": null
        })))
        .mount(&server)
        .await;

    let f = fixture(&server, MemoryCredentialStore::new());
    let err = f
        .client
        .login(&Credentials::new("alice", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Application);
    assert!(!f.client.is_logged_in());
    assert_eq!(
        f.events.all(),
        vec!["failed:invalid username or password".to_string()]
    );
}

#[tokio::test]
async fn test_login_does_not_send_stale_bearer() {
    let server = MockServer::start().await;

    // A stale bearer on the login call would be rejected with 401.
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(header("Authorization", "Bearer access1"))
        .respond_with(expired())
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ok(json!({"access": "fresh", "refresh": "r2"})))
        .mount(&server)
        .await;

    let f = fixture(&server, logged_in());
    f.client
        .login(&Credentials::new("alice", "secret123"))
        .await
        .unwrap();

    assert_eq!(f.store.access_token(), Some(AccessToken::new("fresh")));
}

#[tokio::test]
async fn test_logout_clears_store() {
    let server = MockServer::start().await;
    let f = fixture(&server, logged_in());

    f.client.logout().unwrap();

    assert!(!f.client.is_logged_in());
    assert!(f.store.refresh_token().is_none());
    assert!(f.events.all().is_empty());
}

// ============================================================================
// Refresh And Replay Tests
// ============================================================================

#[tokio::test]
async fn test_concurrent_expiry_refreshes_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rooms/list/"))
        .and(header("Authorization", "Bearer access1"))
        .respond_with(expired())
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rooms/list/"))
        .and(header("Authorization", "Bearer access2"))
        .respond_with(ok(rooms()))
        .expect(3)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .and(body_json(json!({"refresh": "r1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access": "access2"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server, logged_in());
    let (a, b, c) = tokio::join!(
        f.client.list_rooms(),
        f.client.list_rooms(),
        f.client.list_rooms()
    );

    for result in [a, b, c] {
        let rooms = result.unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room_no.as_deref(), Some("A101"));
    }
    assert_eq!(f.store.access_token(), Some(AccessToken::new("access2")));
    assert_eq!(f.store.refresh_token(), Some(RefreshToken::new("r1")));
    assert!(f.events.all().is_empty());
}

#[tokio::test]
async fn test_rotated_refresh_token_is_persisted() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/reservations/my/"))
        .and(header("Authorization", "Bearer access1"))
        .respond_with(expired())
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/reservations/my/"))
        .and(header("Authorization", "Bearer access2"))
        .respond_with(ok(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .respond_with(ok(json!({"access": "access2", "refresh": "r2"})))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server, logged_in());
    assert!(f.client.my_reservations().await.unwrap().is_empty());

    assert_eq!(f.store.refresh_token(), Some(RefreshToken::new("r2")));
}

#[tokio::test]
async fn test_refresh_rejected_forces_logout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rooms/list/"))
        .respond_with(expired())
        .expect(3)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Token is invalid or expired"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server, logged_in());
    let (a, b, c) = tokio::join!(
        f.client.list_rooms(),
        f.client.list_rooms(),
        f.client.list_rooms()
    );

    for result in [a, b, c] {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::RefreshFailure);
    }
    assert!(!f.client.is_logged_in());
    assert!(f.store.refresh_token().is_none());
    assert_eq!(f.events.count("expired"), 1);
    assert_eq!(f.events.count("redirect"), 1);
}

#[tokio::test]
async fn test_replay_rejected_again_expires_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rooms/list/"))
        .respond_with(expired())
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "access2"})))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server, logged_in());
    let err = f.client.list_rooms().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SessionExpired);
    assert!(!f.client.is_logged_in());
    assert_eq!(f.events.all(), vec!["expired".to_string(), "redirect".to_string()]);
}

#[tokio::test]
async fn test_no_refresh_token_expires_without_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rooms/list/"))
        .respond_with(expired())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "access2"})))
        .expect(0)
        .mount(&server)
        .await;

    let f = fixture(
        &server,
        MemoryCredentialStore::with_tokens(AccessToken::new("access1"), None),
    );
    let err = f.client.list_rooms().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SessionExpired);
    assert_eq!(f.events.count("redirect"), 1);
}

// ============================================================================
// Envelope Tests
// ============================================================================

#[tokio::test]
async fn test_application_error_is_surfaced_without_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/reservations/create/"))
        .and(header("Authorization", "Bearer access1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 5,
            "msg": "room unavailable",
            "data": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let f = fixture(&server, logged_in());
    let err = f
        .client
        .create_reservation(1, &slot(), "Weekly sync", 4)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Application);
    assert!(err.to_string().contains("room unavailable"));
    assert_eq!(f.events.all(), vec!["failed:room unavailable".to_string()]);
    assert!(f.client.is_logged_in());
}

#[tokio::test]
async fn test_server_error_is_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rooms/list/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let f = fixture(&server, logged_in());
    let err = f.client.list_rooms().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(f.events.all(), vec!["unreachable".to_string()]);
}

#[tokio::test]
async fn test_timeout_ceiling_applies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rooms/list/"))
        .respond_with(ok(rooms()).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config =
        ClientConfig::new(mock_api_url(&server)).with_timeout(Duration::from_millis(200));
    let f = fixture_with(config, logged_in());
    let err = f.client.list_rooms().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("timed out"));
    assert_eq!(f.events.count("unreachable"), 1);
}

// ============================================================================
// Reservation Tests
// ============================================================================

#[tokio::test]
async fn test_check_rooms_sends_slot() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/reservations/check/"))
        .and(body_json(json!({
            "date": "2025-06-02",
            "start_hour": 9,
            "end_hour": 11,
            "people": 6
        })))
        .respond_with(ok(json!([
            {"id": 1, "name": "First meeting room", "capacity": 20, "usage": "Stand-up", "photo": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server, logged_in());
    let rooms = f.client.check_rooms(&slot(), 6).await.unwrap();

    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].capacity, 20);
}

#[tokio::test]
async fn test_invalid_input_is_rejected_locally() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ok(json!(null)))
        .expect(0)
        .mount(&server)
        .await;

    let f = fixture(&server, logged_in());

    let err = f.client.check_rooms(&slot(), 0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = f
        .client
        .create_reservation(1, &slot(), "   ", 4)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_my_reservations_parses_records() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/reservations/my/"))
        .respond_with(ok(json!([
            {
                "id": 12,
                "room": "First meeting room",
                "date": "2025-06-02",
                "time": "9:00 - 11:00",
                "status": "PENDING",
                "approve_time": null,
                "reject_reason": null
            },
            {
                "id": 11,
                "room": "Second meeting room",
                "date": "2025-05-30",
                "time": "14:00 - 15:00",
                "status": "REJECTED",
                "approve_time": "2025-05-29T09:00:00",
                "reject_reason": "maintenance"
            }
        ])))
        .mount(&server)
        .await;

    let f = fixture(&server, logged_in());
    let reservations = f.client.my_reservations().await.unwrap();

    assert_eq!(reservations.len(), 2);
    assert_eq!(reservations[0].status, ReservationStatus::Pending);
    assert_eq!(reservations[1].reject_reason.as_deref(), Some("maintenance"));
}

#[tokio::test]
async fn test_cancel_and_confirm_hit_action_paths() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/reservations/12/cancel"))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/reservations/9/confirm"))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&server)
        .await;

    let f = fixture(&server, logged_in());
    f.client.cancel_reservation(12).await.unwrap();
    f.client.confirm_use(9).await.unwrap();
}
