//! Full-run tests against an in-process mock CMS.
//!
//! A tiny_http server on a random loopback port plays the CMS; each test
//! picks a routing table, runs the whole harness against it, and asserts on
//! the recorded outcomes plus the requests the server actually saw.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use pretty_assertions::assert_eq;
use probe_core::{ApiClient, RunState, Runner};
use serde_json::{Value, json};

/// One request as the mock server saw it.
#[derive(Debug, Clone)]
struct SeenRequest {
    method: String,
    url: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: String,
}

type Router = dyn Fn(&SeenRequest) -> (u16, Value) + Send + Sync + 'static;

struct MockCms {
    base_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MockCms {
    fn start(router: impl Fn(&SeenRequest) -> (u16, Value) + Send + Sync + 'static) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock server");
        let addr = server.server_addr().to_ip().expect("tcp listen address");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let stop = Arc::new(AtomicBool::new(false));

        let router: Box<Router> = Box::new(router);
        let seen_in_thread = Arc::clone(&seen);
        let stop_in_thread = Arc::clone(&stop);
        let handle = std::thread::spawn(move || {
            while !stop_in_thread.load(Ordering::Relaxed) {
                let Ok(Some(mut request)) = server.recv_timeout(Duration::from_millis(50)) else {
                    continue;
                };

                let header = |name: &'static str| {
                    request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv(name))
                        .map(|h| h.value.as_str().to_string())
                };
                let authorization = header("Authorization");
                let content_type = header("Content-Type");
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);

                let record = SeenRequest {
                    method: request.method().to_string().to_ascii_uppercase(),
                    url: request.url().to_string(),
                    authorization,
                    content_type,
                    body,
                };
                let (status, payload) = router(&record);
                seen_in_thread.lock().unwrap().push(record);

                let response = tiny_http::Response::from_string(payload.to_string())
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            seen,
            stop,
            handle: Some(handle),
        }
    }

    fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl Drop for MockCms {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn runner_for(server: &MockCms) -> Runner {
    let client = ApiClient::new(&server.base_url).expect("client");
    Runner::new(
        client,
        "admin@example.com".to_string(),
        "Admin@123".to_string(),
    )
}

/// Routing table for a fully healthy CMS.
fn healthy_router(req: &SeenRequest) -> (u16, Value) {
    let is_multipart = req
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    match (req.method.as_str(), req.url.as_str()) {
        ("GET", "/api/health") => (200, json!({"status": "ok"})),
        ("POST", "/api/auth/login") => (
            200,
            json!({"token": "t1", "user": {"email": "admin@example.com"}}),
        ),
        ("GET", "/api/auth/me") => (200, json!({"user": {"email": "admin@example.com"}})),
        ("POST", "/api/auth/logout") => (200, json!({})),
        ("GET", "/api/categories") => (200, json!([])),
        ("POST", "/api/categories") => (201, json!({"id": 7, "name": "Test Category"})),
        ("PUT", "/api/categories/7") => (200, json!({})),
        ("GET", "/api/tags") => (200, json!([{"id": 1, "name": "old"}])),
        ("POST", "/api/tags") => (201, json!({"id": 3, "name": "Test Tag"})),
        ("GET", "/api/blogs" | "/api/blogs?status=published") => (200, json!([])),
        ("POST", "/api/blogs") if is_multipart => (201, json!({"id": 12, "slug": "with-image"})),
        ("POST", "/api/blogs") => (201, json!({"id": 11, "slug": "test-blog-post"})),
        ("GET", "/api/blogs/test-blog-post") => (200, json!({"id": 11})),
        ("PUT", "/api/blogs/11") => (200, json!({})),
        ("GET", "/api/comments") => (200, json!([])),
        ("POST", "/api/comments") => (201, json!({"id": 21})),
        ("PATCH", "/api/comments/21/status") => (200, json!({})),
        ("POST", "/api/contacts") => (201, json!({"id": 31})),
        ("GET", "/api/contacts") => (200, json!([{"id": 31}])),
        ("PATCH", "/api/contacts/31/status") => (200, json!({})),
        ("GET", "/api/dashboard/stats") => (200, json!({"blogs": 2, "comments": 1})),
        ("DELETE", _) => (200, json!({})),
        _ => (404, json!({"error": "not found"})),
    }
}

#[tokio::test]
async fn healthy_run_passes_every_step_and_tears_down_in_order() {
    let server = MockCms::start(healthy_router);
    let report = runner_for(&server).run().await;

    assert_eq!(report.state, RunState::Summarized);
    assert!(!report.is_fatal());
    assert_eq!(report.summary.failed, 0, "failures: {:?}", report.summary.failures);
    // 22 phase steps plus 6 teardown deletions.
    assert_eq!(report.summary.total, 28);
    assert_eq!(report.summary.passed, 28);

    let deletes: Vec<String> = server
        .requests()
        .iter()
        .filter(|r| r.method == "DELETE")
        .map(|r| r.url.clone())
        .collect();
    assert_eq!(
        deletes,
        vec![
            "/api/comments/21",
            "/api/contacts/31",
            "/api/blogs/11",
            "/api/blogs/12",
            "/api/tags/3",
            "/api/categories/7",
        ]
    );
}

#[tokio::test]
async fn login_token_is_attached_as_bearer_header() {
    let server = MockCms::start(healthy_router);
    let _ = runner_for(&server).run().await;

    let requests = server.requests();
    let me = requests
        .iter()
        .find(|r| r.url == "/api/auth/me")
        .expect("me request was issued");
    assert_eq!(me.authorization.as_deref(), Some("Bearer t1"));

    // The login request itself carries no token yet.
    let login = requests
        .iter()
        .find(|r| r.url == "/api/auth/login")
        .expect("login request was issued");
    assert_eq!(login.authorization, None);

    // Phase requests after a (successful) logout still carry the token.
    let create = requests
        .iter()
        .find(|r| r.method == "POST" && r.url == "/api/categories")
        .expect("category create was issued");
    assert_eq!(create.authorization.as_deref(), Some("Bearer t1"));
}

#[tokio::test]
async fn created_blog_references_category_and_tag_from_ledger() {
    let server = MockCms::start(healthy_router);
    let _ = runner_for(&server).run().await;

    let requests = server.requests();
    let create = requests
        .iter()
        .find(|r| r.method == "POST" && r.url == "/api/blogs")
        .expect("blog create was issued");
    let body: Value = serde_json::from_str(&create.body).expect("json blog create body");
    assert_eq!(body["category_id"], json!(7));
    assert_eq!(body["tags"], json!("[3]"));

    // The multipart create went out as a form, not JSON.
    let multipart = requests
        .iter()
        .find(|r| {
            r.method == "POST"
                && r.url == "/api/blogs"
                && r.content_type
                    .as_deref()
                    .is_some_and(|ct| ct.starts_with("multipart/form-data"))
        })
        .expect("multipart blog create was issued");
    assert!(multipart.body.contains("fake image data"));
    assert!(multipart.body.contains("test.jpg"));
}

#[tokio::test]
async fn failing_health_check_aborts_before_authentication() {
    let server = MockCms::start(|req| match (req.method.as_str(), req.url.as_str()) {
        ("GET", "/api/health") => (500, json!({"error": "down"})),
        _ => (200, json!({})),
    });
    let report = runner_for(&server).run().await;

    assert_eq!(report.state, RunState::AbortedHealth);
    assert!(report.is_fatal());
    assert_eq!(report.summary.total, 1);
    assert_eq!(report.outcomes[0].name, "Health Check");
    // The server saw nothing beyond the health probe.
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn health_body_without_ok_status_is_fatal() {
    let server = MockCms::start(|req| match (req.method.as_str(), req.url.as_str()) {
        ("GET", "/api/health") => (200, json!({"status": "degraded"})),
        _ => (200, json!({})),
    });
    let report = runner_for(&server).run().await;

    assert_eq!(report.state, RunState::AbortedHealth);
    assert_eq!(report.outcomes[0].message, "Unexpected response");
}

#[tokio::test]
async fn failing_login_aborts_phases_and_teardown() {
    let server = MockCms::start(|req| match (req.method.as_str(), req.url.as_str()) {
        ("GET", "/api/health") => (200, json!({"status": "ok"})),
        ("POST", "/api/auth/login") => (401, json!({"error": "Invalid credentials"})),
        _ => (200, json!({})),
    });
    let report = runner_for(&server).run().await;

    assert_eq!(report.state, RunState::AbortedAuth);
    assert!(report.is_fatal());
    assert_eq!(report.summary.total, 2);
    assert_eq!(report.outcomes[1].name, "Login");
    assert_eq!(
        report.outcomes[1].message,
        "Login failed: Invalid credentials"
    );
    // Health probe and login only; zero phase-suite or teardown requests.
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn login_response_missing_token_is_fatal() {
    let server = MockCms::start(|req| match (req.method.as_str(), req.url.as_str()) {
        ("GET", "/api/health") => (200, json!({"status": "ok"})),
        ("POST", "/api/auth/login") => (200, json!({"user": {"email": "x"}})),
        _ => (200, json!({})),
    });
    let report = runner_for(&server).run().await;

    assert_eq!(report.state, RunState::AbortedAuth);
    assert_eq!(report.outcomes[1].message, "Missing token or user in response");
}

#[tokio::test]
async fn comment_create_is_skipped_when_no_blog_exists() {
    // Blog creates fail, so no blog id ever lands in the ledger.
    let server = MockCms::start(|req| match (req.method.as_str(), req.url.as_str()) {
        ("GET", "/api/health") => (200, json!({"status": "ok"})),
        ("POST", "/api/auth/login") => (200, json!({"token": "t1", "user": {}})),
        ("POST", "/api/blogs") => (500, json!({"error": "disk full"})),
        ("POST", "/api/comments") => (201, json!({"id": 99})),
        ("POST", path) if path.starts_with("/api/") => (201, json!({"id": 1})),
        _ => (200, json!({"status": "ok"})),
    });
    let report = runner_for(&server).run().await;

    let comment_create = report
        .outcomes
        .iter()
        .find(|o| o.name == "Create Comment")
        .expect("comment step recorded");
    assert!(!comment_create.passed);
    assert_eq!(
        comment_create.message,
        "No blogs available for testing comments"
    );
    // The precondition failure issued no comment-create call.
    assert!(
        !server
            .requests()
            .iter()
            .any(|r| r.method == "POST" && r.url == "/api/comments")
    );
}

#[tokio::test]
async fn teardown_failures_do_not_block_later_deletions() {
    let server = MockCms::start(|req| match (req.method.as_str(), req.url.as_str()) {
        ("DELETE", "/api/comments/21") => (404, json!({"error": "already gone"})),
        _ => healthy_router(req),
    });
    let report = runner_for(&server).run().await;

    assert_eq!(report.state, RunState::Summarized);
    assert!(!report.is_fatal());
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.failures[0].name, "Delete Comment");
    assert_eq!(
        report.summary.failures[0].message,
        "Failed to delete comment 21"
    );

    // Every other registered resource was still deleted.
    let deletes = server
        .requests()
        .iter()
        .filter(|r| r.method == "DELETE")
        .count();
    assert_eq!(deletes, 6);
}

#[tokio::test]
async fn step_failures_are_recorded_once_and_run_continues() {
    let server = MockCms::start(|req| match (req.method.as_str(), req.url.as_str()) {
        ("GET", "/api/dashboard/stats") => (500, json!({"error": "stats exploded"})),
        _ => healthy_router(req),
    });
    let report = runner_for(&server).run().await;

    assert_eq!(report.state, RunState::Summarized);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(
        report.summary.failures[0].message,
        "Failed to get dashboard stats: stats exploded"
    );
    // One attempt, no retry.
    let stats_requests = server
        .requests()
        .iter()
        .filter(|r| r.url == "/api/dashboard/stats")
        .count();
    assert_eq!(stats_requests, 1);

    // Teardown still ran in full.
    assert_eq!(report.summary.total, 28);
}

#[tokio::test]
async fn string_identifiers_round_trip_into_teardown_paths() {
    let server = MockCms::start(|req| match (req.method.as_str(), req.url.as_str()) {
        ("POST", "/api/categories") => (201, json!({"id": "cat-uuid-1"})),
        ("PUT", "/api/categories/cat-uuid-1") => (200, json!({})),
        _ => healthy_router(req),
    });
    let report = runner_for(&server).run().await;

    assert_eq!(report.summary.failed, 0, "failures: {:?}", report.summary.failures);
    assert!(
        server
            .requests()
            .iter()
            .any(|r| r.method == "DELETE" && r.url == "/api/categories/cat-uuid-1")
    );
}

#[tokio::test]
async fn registered_kinds_match_created_resources() {
    // Exercise the ledger indirectly: only categories and tags get created,
    // blogs fail, so teardown must touch exactly tag and category paths
    // besides the failed kinds.
    let server = MockCms::start(|req| match (req.method.as_str(), req.url.as_str()) {
        ("POST", "/api/blogs" | "/api/comments" | "/api/contacts") => {
            (500, json!({"error": "create disabled"}))
        }
        _ => healthy_router(req),
    });
    let report = runner_for(&server).run().await;

    assert_eq!(report.state, RunState::Summarized);
    let deletes: Vec<String> = server
        .requests()
        .iter()
        .filter(|r| r.method == "DELETE")
        .map(|r| r.url.clone())
        .collect();
    assert_eq!(deletes, vec!["/api/tags/3", "/api/categories/7"]);
}
