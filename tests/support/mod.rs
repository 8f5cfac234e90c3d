//! Shared helpers for socket-bound integration tests.

#![allow(dead_code)]

use std::net::TcpListener;
use std::panic::Location;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use downloadstation_core::{ClientConfig, DownloadStation};

/// Session token every mocked login hands out.
pub const TEST_SID: &str = "sid-0123456789";

#[must_use]
pub fn socket_tests_required() -> bool {
    std::env::var("DOWNLOADSTATION_REQUIRE_SOCKET_TESTS")
        .ok()
        .is_some_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

#[track_caller]
#[must_use]
pub fn should_skip_socket_bound_test() -> bool {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return false;
    }

    let location = Location::caller();
    let message = format!(
        "[socket-bound-test] cannot bind localhost socket at {}:{}; wiremock-based test cannot run in this environment",
        location.file(),
        location.line()
    );
    if socket_tests_required() {
        panic!(
            "{message}. Set DOWNLOADSTATION_REQUIRE_SOCKET_TESTS=0 to allow local skip behavior."
        );
    }

    eprintln!(
        "{message}. Skipping test. Set DOWNLOADSTATION_REQUIRE_SOCKET_TESTS=1 to fail-fast instead."
    );
    true
}

pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if should_skip_socket_bound_test() {
        None
    } else {
        Some(MockServer::start().await)
    }
}

/// Path of an endpoint under the default app name and API version.
#[must_use]
pub fn api_path(group_action: &str) -> String {
    format!("/downloadstation/V4/{group_action}")
}

/// Mounts a login endpoint that must be hit exactly `times` times.
pub async fn mount_login(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path(api_path("Misc/Login")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": 0, "reason": "", "sid": TEST_SID})),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Client pointed at the mock server over plain http.
pub fn station_for(server: &MockServer) -> DownloadStation {
    DownloadStation::with_config(
        server.address().to_string(),
        "admin",
        "secret",
        ClientConfig::new().with_scheme("http"),
    )
    .expect("client should build")
}

/// Bodies of every request received on `request_path`, as UTF-8 (lossy).
pub async fn bodies_for(server: &MockServer, request_path: &str) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == request_path)
        .map(|request| String::from_utf8_lossy(&request.body).into_owned())
        .collect()
}
