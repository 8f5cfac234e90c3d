//! Integration tests for session handling and request dispatch.
//!
//! These tests drive the client against wiremock servers speaking the
//! Download Station envelope format.

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

use downloadstation_core::{ApiError, Params};

mod support;
use support::{TEST_SID, api_path, bodies_for, mount_login, start_mock_server_or_skip, station_for};

#[tokio::test]
async fn test_authenticate_posts_base64_password_and_caches_sid() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path(api_path("Misc/Login")))
        .and(body_string_contains("user=admin"))
        .and(body_string_contains("pass=c2VjcmV0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": 0, "reason": "", "sid": TEST_SID})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut station = station_for(&server);
    let first = station.authenticate().await.expect("login should succeed").to_string();
    let second = station.authenticate().await.expect("cached sid").to_string();

    assert_eq!(first, TEST_SID);
    assert_eq!(second, TEST_SID);
    assert_eq!(station.session_id(), Some(TEST_SID));
    assert_eq!(bodies_for(&server, &api_path("Misc/Login")).await.len(), 1);
}

#[tokio::test]
async fn test_login_request_does_not_carry_sid() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 1).await;

    let mut station = station_for(&server);
    station.authenticate().await.expect("login should succeed");

    let bodies = bodies_for(&server, &api_path("Misc/Login")).await;
    assert!(!bodies[0].contains("sid="), "login body must not carry sid: {}", bodies[0]);
}

#[tokio::test]
async fn test_authenticate_rejected_login_is_authentication_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path(api_path("Misc/Login")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": 4097, "reason": "bad user"})),
        )
        .mount(&server)
        .await;

    let mut station = station_for(&server);
    let error = station.authenticate().await.expect_err("login must fail");

    match &error {
        ApiError::Authentication { code, label, reason } => {
            assert_eq!(*code, 4097);
            assert_eq!(*label, Some("not found"));
            assert_eq!(reason, "bad user");
        }
        other => panic!("Expected Authentication, got: {other:?}"),
    }
    assert!(station.session_id().is_none(), "failed login must not cache a token");
}

#[tokio::test]
async fn test_login_without_sid_is_invalid_response() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path(api_path("Misc/Login")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .mount(&server)
        .await;

    let mut station = station_for(&server);
    let error = station.authenticate().await.expect_err("missing sid must fail");
    assert!(
        matches!(error, ApiError::InvalidResponse { .. }),
        "got: {error:?}"
    );
}

#[tokio::test]
async fn test_login_with_empty_sid_is_invalid_response() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path(api_path("Misc/Login")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0, "sid": ""})))
        .mount(&server)
        .await;

    let mut station = station_for(&server);
    let error = station.authenticate().await.expect_err("empty sid must fail");
    assert!(
        matches!(error, ApiError::InvalidResponse { .. }),
        "got: {error:?}"
    );
    assert!(station.session_id().is_none(), "empty sid must not be cached");
}

#[tokio::test]
async fn test_empty_seeded_session_id_triggers_login() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(api_path("Misc/Env")))
        .and(body_string_contains(format!("sid={TEST_SID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let mut station = station_for(&server).with_session_id("");
    station
        .misc_env(Params::new())
        .await
        .expect("call should log in and use the fresh token");
    assert_eq!(station.session_id(), Some(TEST_SID));
}

#[tokio::test]
async fn test_call_endpoint_logs_in_once_and_attaches_sid() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(api_path("Task/Status")))
        .and(body_string_contains(format!("sid={TEST_SID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0, "reason": ""})))
        .expect(2)
        .mount(&server)
        .await;

    let mut station = station_for(&server);
    station
        .call_endpoint("task", "status", Params::new())
        .await
        .expect("first call");
    station
        .call_endpoint("task", "status", Params::new())
        .await
        .expect("second call");
}

#[tokio::test]
async fn test_call_endpoint_capitalizes_group_and_action() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(api_path("Task/GetTorrentFile")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let mut station = station_for(&server);
    station
        .call_endpoint("task", "get_torrent_file", Params::new())
        .await
        .expect("call should hit the capitalized path");
}

#[tokio::test]
async fn test_call_endpoint_passes_through_extra_fields() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(api_path("Misc/Env")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": 0, "foo": "bar", "n": 7})),
        )
        .mount(&server)
        .await;

    let mut station = station_for(&server);
    let result = station
        .call_endpoint("misc", "env", Params::new())
        .await
        .expect("call should succeed");

    assert_eq!(result.get_str("foo"), Some("bar"));
    assert_eq!(result.get_i64("n"), Some(7));
    assert_eq!(result.error_code(), 0);
}

#[tokio::test]
async fn test_call_endpoint_http_500_is_transport_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(api_path("Task/Query")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut station = station_for(&server);
    let error = station
        .call_endpoint("task", "query", Params::new())
        .await
        .expect_err("500 must fail");

    assert!(matches!(error, ApiError::Transport { status: 500, .. }), "got: {error:?}");
    assert!(error.to_string().contains("500"), "got: {error}");
}

#[tokio::test]
async fn test_call_endpoint_non_200_success_status_is_transport_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(api_path("Task/Query")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut station = station_for(&server);
    let error = station
        .call_endpoint("task", "query", Params::new())
        .await
        .expect_err("only 200 is accepted");
    assert!(matches!(error, ApiError::Transport { status: 204, .. }), "got: {error:?}");
}

#[tokio::test]
async fn test_call_endpoint_duplicate_code_is_request_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(api_path("Task/AddUrl")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": 8196, "reason": "dup"})),
        )
        .mount(&server)
        .await;

    let mut station = station_for(&server);
    let error = station
        .call_endpoint("task", "add_url", Params::new().with("url", "http://x/a.iso"))
        .await
        .expect_err("duplicate must fail");

    let msg = error.to_string();
    assert!(matches!(error, ApiError::Request { code: 8196, .. }), "got: {error:?}");
    assert!(msg.contains("duplicate"), "got: {msg}");
    assert!(msg.contains("dup"), "got: {msg}");
}

#[tokio::test]
async fn test_call_endpoint_non_json_body_is_invalid_response() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(api_path("Misc/Dir")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let mut station = station_for(&server);
    let error = station
        .call_endpoint("misc", "dir", Params::new())
        .await
        .expect_err("HTML body must fail");
    assert!(matches!(error, ApiError::InvalidResponse { .. }), "got: {error:?}");
}

#[tokio::test]
async fn test_caller_supplied_sid_is_replaced() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(api_path("Config/Get")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .mount(&server)
        .await;

    let mut station = station_for(&server);
    station
        .call_endpoint("config", "get", Params::new().with("sid", "forged"))
        .await
        .expect("call should succeed");

    let bodies = bodies_for(&server, &api_path("Config/Get")).await;
    assert!(bodies[0].contains(&format!("sid={TEST_SID}")), "got: {}", bodies[0]);
    assert!(!bodies[0].contains("forged"), "got: {}", bodies[0]);
}

#[tokio::test]
async fn test_seeded_session_id_skips_login() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 0).await;
    Mock::given(method("POST"))
        .and(path(api_path("Misc/Env")))
        .and(body_string_contains("sid=seeded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let mut station = station_for(&server).with_session_id("seeded");
    station
        .misc_env(Params::new())
        .await
        .expect("call should reuse the seeded token");
}

#[tokio::test]
async fn test_logout_clears_cached_sid() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 2).await;
    Mock::given(method("POST"))
        .and(path(api_path("Misc/Logout")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("Misc/Env")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let mut station = station_for(&server);
    station.misc_logout(Params::new()).await.expect("logout");
    assert!(station.session_id().is_none());

    station.misc_env(Params::new()).await.expect("relogin then env");
    assert_eq!(station.session_id(), Some(TEST_SID));
}
