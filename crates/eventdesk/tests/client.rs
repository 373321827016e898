//! Integration tests for the API client: request pipeline, envelope
//! handling, auth flows, and the dashboard loader.
//!
//! The client runs against `MockTransport`, a scripted in-memory
//! `HttpTransport` that records every request it is handed.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use eventdesk::prelude::*;
use eventdesk::views::SECTION_LIMIT;
use eventdesk_session::TOKEN_KEY;
use parking_lot::Mutex;
use serde_json::{Value, json};

// =========================================================================
// Mock transport
// =========================================================================

enum Scripted {
    Respond(HttpResponse),
    Refuse,
    Hang,
}

#[derive(Clone, Default)]
struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    script: VecDeque<Scripted>,
    requests: Vec<HttpRequest>,
}

impl MockTransport {
    fn respond(&self, response: HttpResponse) -> &Self {
        self.state.lock().script.push_back(Scripted::Respond(response));
        self
    }

    fn refuse(&self) {
        self.state.lock().script.push_back(Scripted::Refuse);
    }

    fn hang(&self) {
        self.state.lock().script.push_back(Scripted::Hang);
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().requests.clone()
    }

    fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("a request was sent")
    }
}

impl HttpTransport for MockTransport {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let next = {
            let mut state = self.state.lock();
            state.requests.push(request);
            state.script.pop_front()
        };
        match next {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Refuse) => Err(TransportError::ConnectFailed(
                std::io::Error::other("connection refused").into(),
            )),
            Some(Scripted::Hang) => std::future::pending().await,
            None => panic!("unscripted request"),
        }
    }
}

// =========================================================================
// Helpers
// =========================================================================

const BASE: &str = "http://api.test/api";

fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse::new(status, body.to_string())
        .with_header("Content-Type", "application/json; charset=utf-8")
}

fn setup() -> (ApiClient<MockTransport>, MockTransport, Arc<SessionStore>) {
    let transport = MockTransport::default();
    let session = Arc::new(SessionStore::in_memory());
    let client = ApiClient::builder()
        .base_url(BASE)
        .build(transport.clone(), Arc::clone(&session))
        .expect("valid config");
    (client, transport, session)
}

fn logged_in() -> (ApiClient<MockTransport>, MockTransport, Arc<SessionStore>) {
    let (client, transport, session) = setup();
    session
        .set_auth("abc", &UserProfile::new("1", "organizer"))
        .expect("should store");
    (client, transport, session)
}

fn body_json(request: &HttpRequest) -> Value {
    serde_json::from_slice(request.body.as_deref().expect("has a body"))
        .expect("body is JSON")
}

/// Memory storage that counts how often the token is removed.
#[derive(Default)]
struct CountingStorage {
    inner: MemoryStorage,
    token_removals: AtomicUsize,
}

impl Storage for CountingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        if key == TOKEN_KEY {
            self.token_removals.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.remove(key)
    }
}

// =========================================================================
// Headers and auth
// =========================================================================

#[tokio::test]
async fn test_request_attaches_bearer_when_logged_in() {
    let (client, transport, _) = logged_in();
    transport.respond(json_response(200, json!([])));

    client.get_all_events().await.unwrap();

    let sent = transport.last_request();
    assert_eq!(sent.method, Method::Get);
    assert_eq!(sent.url, format!("{BASE}/events"));
    assert_eq!(sent.header("authorization"), Some("Bearer abc"));
    assert_eq!(sent.header("content-type"), Some("application/json"));
    assert_eq!(sent.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_request_without_token_sends_no_bearer() {
    let (client, transport, _) = setup();
    transport.respond(json_response(200, json!([])));

    client.get_all_events().await.unwrap();

    assert_eq!(transport.last_request().header("authorization"), None);
}

#[tokio::test]
async fn test_public_endpoint_never_sends_bearer() {
    let (client, transport, _) = logged_in();
    transport.respond(json_response(200, json!({ "_id": "e1" })));

    client.get_public_event("e1").await.unwrap();

    assert_eq!(transport.last_request().header("authorization"), None);
}

#[tokio::test]
async fn test_header_overrides_win() {
    let (client, transport, _) = logged_in();
    transport.respond(json_response(200, json!({ "ok": true })));

    client
        .request(
            RequestDescriptor::get("/health")
                .header("content-type", "text/plain")
                .header("Authorization", "Bearer override"),
        )
        .await
        .unwrap();

    let sent = transport.last_request();
    assert_eq!(sent.header("Content-Type"), Some("text/plain"));
    assert_eq!(sent.header("Authorization"), Some("Bearer override"));
    let auth_headers = sent
        .headers
        .iter()
        .filter(|(n, _)| n.eq_ignore_ascii_case("authorization"))
        .count();
    assert_eq!(auth_headers, 1);
}

#[tokio::test]
async fn test_path_parameters_are_percent_encoded() {
    let (client, transport, _) = logged_in();
    transport.respond(json_response(200, json!({ "_id": "a/b" })));

    client.get_event_by_id("a/b").await.unwrap();

    assert_eq!(transport.last_request().url, format!("{BASE}/events/a%2Fb"));
}

#[tokio::test]
async fn test_public_events_query_string() {
    let (client, transport, _) = logged_in();
    transport.respond(json_response(200, json!({ "success": true, "data": [] })));

    let query = EventQuery::new().status("published").search("rust conf");
    let events = client.get_public_events(&query).await.unwrap();

    assert!(events.is_empty());
    let sent = transport.last_request();
    assert_eq!(
        sent.url,
        format!("{BASE}/events?status=published&search=rust%20conf")
    );
    assert_eq!(sent.header("authorization"), None);
}

#[tokio::test]
async fn test_cancel_registration_sends_reason() {
    let (client, transport, _) = logged_in();
    transport.respond(json_response(
        200,
        json!({ "success": true, "data": { "_id": "r1", "status": "cancelled" } }),
    ));

    let registration =
        client.cancel_registration("r1", "schedule clash").await.unwrap();

    assert_eq!(registration.status.as_deref(), Some("cancelled"));
    let sent = transport.last_request();
    assert_eq!(sent.method, Method::Patch);
    assert_eq!(sent.url, format!("{BASE}/registrations/r1/cancel"));
    assert_eq!(
        body_json(&sent),
        json!({ "cancellationReason": "schedule clash" })
    );
}

// =========================================================================
// Envelope normalization
// =========================================================================

#[tokio::test]
async fn test_success_envelope_yields_list() {
    // Scenario B
    let (client, transport, _) = logged_in();
    transport.respond(json_response(
        200,
        json!({ "success": true, "data": [{ "_id": "e1" }, { "_id": "e2" }] }),
    ));

    let events = client.get_all_events().await.unwrap();

    let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["e1", "e2"]);
}

#[tokio::test]
async fn test_bare_array_yields_list() {
    // Scenario C
    let (client, transport, _) = logged_in();
    transport.respond(json_response(200, json!([{ "_id": "e1" }])));

    let events = client.get_all_events().await.unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "e1");
}

#[tokio::test]
async fn test_keyed_wrapper_yields_resource() {
    let (client, transport, _) = logged_in();
    transport.respond(json_response(
        200,
        json!({ "event": { "_id": "e1", "title": "Demo" } }),
    ));

    let event = client.get_event_by_id("e1").await.unwrap();

    assert_eq!(event.title.as_deref(), Some("Demo"));
}

#[tokio::test]
async fn test_success_false_on_2xx_is_http_error() {
    let (client, transport, _) = logged_in();
    transport.respond(json_response(
        200,
        json!({ "success": false, "message": "Event is full" }),
    ));

    let err = client
        .create_registration(&json!({ "event": "e1" }))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Http);
    assert_eq!(err.to_string(), "Event is full");
}

#[tokio::test]
async fn test_no_content_is_success() {
    let (client, transport, _) = logged_in();
    transport.respond(HttpResponse::new(204, ""));

    client.delete_event("e1").await.unwrap();

    assert_eq!(transport.last_request().method, Method::Delete);
}

#[tokio::test]
async fn test_unexpected_payload_shape_is_invalid_response() {
    let (client, transport, _) = logged_in();
    transport.respond(json_response(200, json!({ "success": true, "data": "nope" })));

    let err = client.get_all_events().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidResponseShape);
}

// =========================================================================
// Response handling
// =========================================================================

#[tokio::test]
async fn test_2xx_non_json_is_invalid_response() {
    let (client, transport, _) = logged_in();
    transport.respond(
        HttpResponse::new(200, "<html>maintenance</html>")
            .with_header("Content-Type", "text/html"),
    );

    let err = client.get_all_events().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidResponseShape);
}

#[tokio::test]
async fn test_2xx_empty_body_is_invalid_response() {
    let (client, transport, _) = logged_in();
    transport
        .respond(HttpResponse::new(200, "").with_header("Content-Type", "text/html"))
        .respond(HttpResponse::new(200, "  \n"))
        .respond(HttpResponse::new(200, "").with_header("Content-Type", "application/json"));

    for _ in 0..3 {
        let err = client
            .request(RequestDescriptor::get("/events"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponseShape);
    }
}

#[tokio::test]
async fn test_2xx_malformed_json_is_invalid_response() {
    let (client, transport, _) = logged_in();
    transport.respond(
        HttpResponse::new(200, "{ truncated")
            .with_header("Content-Type", "application/json"),
    );

    let err = client.get_all_events().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidResponseShape);
}

#[tokio::test]
async fn test_error_status_uses_server_message() {
    let (client, transport, _) = logged_in();
    transport.respond(json_response(404, json!({ "message": "Event not found" })));
    transport.respond(json_response(400, json!({ "error": "Bad date range" })));

    let not_found = client.get_event_by_id("missing").await.unwrap_err();
    let bad_request = client.create_event(&json!({})).await.unwrap_err();

    assert!(matches!(
        &not_found,
        ApiError::Http { status: 404, message } if message == "Event not found"
    ));
    assert_eq!(bad_request.status(), Some(400));
    assert_eq!(bad_request.to_string(), "Bad date range");
}

#[tokio::test]
async fn test_error_status_with_html_body_is_truncated() {
    let (client, transport, _) = logged_in();
    let page = format!("<html>{}</html>", "x".repeat(1000));
    transport.respond(
        HttpResponse::new(502, page.clone()).with_header("Content-Type", "text/html"),
    );

    let err = client.get_all_events().await.unwrap_err();

    let expected: String = page.chars().take(200).collect();
    assert_eq!(err.kind(), ErrorKind::Http);
    assert_eq!(err.to_string(), format!("HTTP Error: 502 - {expected}"));
}

#[tokio::test]
async fn test_error_status_with_empty_body() {
    let (client, transport, _) = logged_in();
    transport.respond(HttpResponse::new(500, ""));

    let err = client.get_all_events().await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP Error: 500");
}

#[tokio::test]
async fn test_unauthorized_clears_session() {
    // Scenario D
    let (client, transport, session) = logged_in();
    transport
        .respond(json_response(401, json!({ "message": "jwt expired" })))
        .respond(json_response(200, json!([])));

    let err = client.get_all_events().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SessionExpired);
    assert!(!session.is_authenticated());
    assert_eq!(session.get_user(), None);

    // The stale token is never sent again.
    client.get_all_events().await.unwrap();
    assert_eq!(transport.last_request().header("authorization"), None);
}

#[tokio::test]
async fn test_unauthorized_logs_out_exactly_once() {
    let transport = MockTransport::default();
    let session = Arc::new(SessionStore::new(CountingStorage::default()));
    let client = ApiClient::builder()
        .base_url(BASE)
        .build(transport.clone(), Arc::clone(&session))
        .expect("valid config");
    session
        .set_auth("abc", &UserProfile::new("1", "organizer"))
        .unwrap();
    transport.respond(json_response(401, json!({ "message": "jwt expired" })));

    let err = client.get_all_events().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SessionExpired);
    assert_eq!(session.storage().token_removals.load(Ordering::SeqCst), 1);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_connection_refused_is_network_unreachable() {
    let (client, transport, session) = logged_in();
    transport.refuse();

    let err = client.get_all_events().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NetworkUnreachable);
    assert!(session.is_authenticated(), "network errors keep the session");
}

#[tokio::test(start_paused = true)]
async fn test_slow_server_times_out() {
    // Scenario E
    let (client, transport, session) = logged_in();
    transport.hang();
    let started = tokio::time::Instant::now();

    let err = client.get_all_events().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(matches!(err, ApiError::Timeout { after } if after == Duration::from_millis(30_000)));
    assert!(started.elapsed() >= Duration::from_millis(30_000));
    assert!(session.is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn test_per_request_timeout_override() {
    let (client, transport, _) = logged_in();
    transport.hang();

    let err = client
        .request(RequestDescriptor::get("/health").timeout(Duration::from_secs(2)))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Timeout { after } if after == Duration::from_secs(2)));
}

// =========================================================================
// Auth flows
// =========================================================================

#[tokio::test]
async fn test_login_stores_session() {
    // Scenario A
    let (client, transport, session) = setup();
    transport.respond(json_response(
        200,
        json!({ "token": "abc", "user": { "id": "1", "role": "organizer" } }),
    ));

    let logged = client
        .login(&Credentials::new("ada@example.com", "hunter2"))
        .await
        .unwrap();

    assert_eq!(logged.token, "abc");
    assert_eq!(session.get_token().as_deref(), Some("abc"));
    assert_eq!(session.get_user(), Some(UserProfile::new("1", "organizer")));
    assert!(!session.is_admin());

    let sent = transport.last_request();
    assert_eq!(sent.url, format!("{BASE}/users/login"));
    assert_eq!(sent.header("authorization"), None);
    assert_eq!(
        body_json(&sent),
        json!({ "email": "ada@example.com", "password": "hunter2" })
    );
}

#[tokio::test]
async fn test_login_reads_enveloped_payload() {
    let (client, transport, session) = setup();
    transport.respond(json_response(
        200,
        json!({
            "success": true,
            "data": { "token": "xyz", "user": { "_id": "7", "role": "admin" } }
        }),
    ));

    client
        .login(&Credentials::new("root@example.com", "pw"))
        .await
        .unwrap();

    assert_eq!(session.get_token().as_deref(), Some("xyz"));
    assert!(session.is_admin());
}

#[tokio::test]
async fn test_login_without_token_stores_nothing() {
    let (client, transport, session) = setup();
    transport.respond(json_response(200, json!({ "user": { "id": "1" } })));

    let err = client
        .login(&Credentials::new("ada@example.com", "hunter2"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidResponseShape);
    assert!(!session.is_authenticated());
    assert_eq!(session.get_user(), None);
}

#[tokio::test]
async fn test_register_auto_login() {
    let (client, transport, session) = setup();
    transport
        .respond(json_response(
            201,
            json!({ "token": "new", "user": { "id": "9", "role": "organizer" } }),
        ))
        .respond(json_response(201, json!({ "message": "Check your inbox" })));

    let first = client
        .register(&json!({ "email": "grace@example.com" }))
        .await
        .unwrap();
    assert_eq!(first.map(|s| s.token).as_deref(), Some("new"));
    assert_eq!(session.get_token().as_deref(), Some("new"));

    session.logout().unwrap();
    let second = client
        .register(&json!({ "email": "linus@example.com" }))
        .await
        .unwrap();
    assert!(second.is_none());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_update_profile_merges_into_session() {
    let (client, transport, session) = logged_in();
    transport.respond(json_response(
        200,
        json!({
            "success": true,
            "data": { "user": { "id": "1", "firstName": "Ada", "role": "organizer" } }
        }),
    ));

    let profile = client
        .update_profile(&json!({ "firstName": "Ada" }))
        .await
        .unwrap();

    assert_eq!(profile.first_name.as_deref(), Some("Ada"));
    let stored = session.get_user().unwrap();
    assert_eq!(stored.first_name.as_deref(), Some("Ada"));
    assert_eq!(session.get_token().as_deref(), Some("abc"));
    assert_eq!(transport.last_request().method, Method::Put);
}

#[tokio::test]
async fn test_update_profile_with_underscore_id_response() {
    let (client, transport, session) = logged_in();
    transport.respond(json_response(
        200,
        json!({
            "success": true,
            "data": { "_id": "1", "firstName": "Ada", "role": "organizer" }
        }),
    ));

    let profile = client
        .update_profile(&json!({ "firstName": "Ada" }))
        .await
        .unwrap();

    assert_eq!(profile.id, "1");
    let stored = session.get_user().unwrap();
    assert_eq!(stored.id, "1");
    assert_eq!(stored.first_name.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn test_login_with_both_id_keys() {
    let (client, transport, session) = setup();
    transport.respond(json_response(
        200,
        json!({ "token": "abc", "user": { "_id": "1", "id": "1", "role": "organizer" } }),
    ));

    client
        .login(&Credentials::new("ada@example.com", "hunter2"))
        .await
        .unwrap();

    assert_eq!(session.get_token().as_deref(), Some("abc"));
    assert_eq!(session.get_user(), Some(UserProfile::new("1", "organizer")));
}

#[tokio::test]
async fn test_events_with_both_id_keys() {
    let (client, transport, _) = logged_in();
    transport.respond(json_response(
        200,
        json!([{ "_id": "e1", "id": "e1" }, { "id": "e2" }]),
    ));

    let events = client.get_all_events().await.unwrap();

    let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["e1", "e2"]);
}

#[tokio::test]
async fn test_logout_clears_session_without_request() {
    let (client, transport, session) = logged_in();

    client.logout().unwrap();

    assert!(!session.is_authenticated());
    assert!(transport.requests().is_empty());
}

// =========================================================================
// Dashboard
// =========================================================================

fn dashboard_events() -> Value {
    json!({
        "success": true,
        "data": [
            { "_id": "a", "organizer": "1", "startDate": "2999-01-01",
              "createdAt": "2025-01-02T00:00:00Z", "totalRegistrations": 3, "revenue": 30.0 },
            { "_id": "b", "organizer": { "_id": "1", "firstName": "Ada" },
              "startDate": "2000-01-01", "createdAt": "2025-01-03T00:00:00Z",
              "totalRegistrations": 2 },
            { "_id": "c", "organizer": "2", "startDate": "2999-01-01" }
        ]
    })
}

#[tokio::test]
async fn test_dashboard_loads_all_sections() {
    let (client, transport, _) = logged_in();
    for _ in 0..3 {
        transport.respond(json_response(200, dashboard_events()));
    }

    let dashboard = Dashboard::load(&client, "1", chrono::Utc::now()).await;

    let stats = dashboard.stats.unwrap();
    assert_eq!(stats.total_events, 2);
    assert_eq!(stats.upcoming_events, 1);
    assert_eq!(stats.total_participants, 5);
    assert_eq!(stats.total_revenue, 30.0);
    assert_eq!(stats.next_event.map(|e| e.id.to_string()).as_deref(), Some("a"));

    let recent: Vec<String> =
        dashboard.recent.unwrap().iter().map(|e| e.id.to_string()).collect();
    assert_eq!(recent, ["b", "a"]);
    assert!(dashboard.upcoming.unwrap().len() <= SECTION_LIMIT);
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn test_dashboard_sections_fail_independently() {
    let (client, transport, _) = logged_in();
    for _ in 0..3 {
        transport.respond(HttpResponse::new(503, ""));
    }

    let dashboard = Dashboard::load(&client, "1", chrono::Utc::now()).await;

    for section in [
        dashboard.stats.map(drop),
        dashboard.recent.map(drop),
        dashboard.upcoming.map(drop),
    ] {
        assert_eq!(section.unwrap_err().status(), Some(503));
    }
}
