use std::collections::VecDeque;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::any, Router};
use cdp_testkit::{ApiClient, RetryPolicy, TestkitError};
use serde_json::{json, Value as JsonValue};

#[derive(Clone)]
struct MockResponse {
    status: StatusCode,
    body: String,
}

impl MockResponse {
    fn json(status: StatusCode, body: JsonValue) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
        }
    }
}

#[derive(Clone)]
struct MockState {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    hits: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<String>>>,
}

async fn mock_handler(State(state): State<MockState>, body: String) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state
        .last_body
        .lock()
        .expect("body mutex must not be poisoned") = if body.is_empty() { None } else { Some(body) };

    let response = {
        let mut queue = state
            .responses
            .lock()
            .expect("response queue mutex must not be poisoned");
        queue.pop_front().unwrap_or_else(|| {
            MockResponse::json(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "no mock response available"}),
            )
        })
    };

    (response.status, response.body)
}

struct TestServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<String>>>,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn spawn_server(responses: Vec<MockResponse>) -> TestServer {
    let state = MockState {
        responses: Arc::new(Mutex::new(responses.into())),
        hits: Arc::new(AtomicUsize::new(0)),
        last_body: Arc::new(Mutex::new(None)),
    };

    let app = Router::new()
        .route("/*path", any(mock_handler))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind test listener");
    let address = listener.local_addr().expect("must have local addr");
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock server must run");
    });

    TestServer {
        base_url: format!("http://{address}"),
        hits: state.hits,
        last_body: state.last_body,
        task,
    }
}

#[tokio::test]
async fn get_decodes_json_payload() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!({"id": 7, "name": "widget"}),
    )])
    .await;
    let client = ApiClient::new(&server.base_url);

    let response = client.get("/widgets/7").await.expect("request must succeed");
    let payload: JsonValue = response
        .ensure_status(200)
        .expect("status must match")
        .json()
        .expect("body must decode");

    assert_eq!(payload, json!({"id": 7, "name": "widget"}));
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn post_sends_the_json_body() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::CREATED,
        json!({"ok": true}),
    )])
    .await;
    let client = ApiClient::new(&server.base_url);

    let body = json!({"email": "qa@example.com", "role": "tester"});
    let response = client.post("/users", &body).await.expect("request");
    response.ensure_status(201).expect("status");

    let seen = server.last_body.lock().unwrap().clone().expect("body seen");
    let seen: JsonValue = serde_json::from_str(&seen).expect("server saw JSON");
    assert_eq!(seen, body);
}

#[tokio::test]
async fn status_mismatch_carries_both_codes() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::NOT_FOUND,
        json!({"error": "missing"}),
    )])
    .await;
    let client = ApiClient::new(&server.base_url);

    let response = client.get("/widgets/404").await.expect("request");
    let err = response.ensure_status(200).unwrap_err();
    assert!(matches!(
        err,
        TestkitError::StatusMismatch {
            expected: 200,
            actual: 404
        }
    ));
}

#[tokio::test]
async fn non_json_body_fails_decoding_with_body_text() {
    let server = spawn_server(vec![MockResponse::text(StatusCode::OK, "<html>oops</html>")]).await;
    let client = ApiClient::new(&server.base_url);

    let response = client.get("/widgets").await.expect("request");
    let err = response.json::<JsonValue>().unwrap_err();
    assert!(matches!(err, TestkitError::Decode(_)));
    assert!(err.to_string().contains("<html>oops</html>"));
}

#[tokio::test]
async fn retry_policy_recovers_after_server_errors() {
    let server = spawn_server(vec![
        MockResponse::json(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})),
        MockResponse::json(StatusCode::SERVICE_UNAVAILABLE, json!({"error": "boom"})),
        MockResponse::json(StatusCode::OK, json!({"healthy": true})),
    ])
    .await;
    let client = ApiClient::new(&server.base_url);

    let policy = RetryPolicy::new(3, Duration::from_millis(1)).expect("valid policy");
    let payload: JsonValue = policy
        .run(|| async {
            let response = client.get("/health").await?;
            response.ensure_status(200)?;
            response.json()
        })
        .await
        .expect("third attempt must succeed");

    assert_eq!(payload, json!({"healthy": true}));
    assert_eq!(server.hits.load(Ordering::SeqCst), 3);
}
