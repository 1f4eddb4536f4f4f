//! HTTP behaviour that does not need a live database: authentication,
//! authorization and request validation all reject before any query runs.

mod helpers;

use axum::http::{Method, StatusCode};
use helpers::*;
use serde_json::json;

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::without_database();

    for (method, uri) in [
        (Method::GET, "/api/progress"),
        (Method::GET, "/api/event-registrations"),
        (Method::GET, "/api/admin/users"),
    ] {
        let (status, body) = app.request(method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let app = TestApp::without_database();

    let (status, body) = app
        .request(Method::GET, "/api/progress", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid token"));
}

#[tokio::test]
async fn test_admin_routes_forbid_members() {
    let app = TestApp::without_database();
    let token = app.member_token(10, "9876543210");

    let cases = [
        (Method::GET, "/api/event-registrations", None),
        (Method::PUT, "/api/event-registrations/SKS-010125-123456/approve", None),
        (Method::PUT, "/api/event-registrations/SKS-010125-123456/attend", None),
        (
            Method::POST,
            "/api/event-registrations/bulk-reject",
            Some(json!({ "ids": ["SKS-010125-123456"] })),
        ),
        (Method::GET, "/api/admin/all-users", None),
        (Method::PUT, "/api/admin/users/3/toggle-whatsapp", None),
        (Method::DELETE, "/api/events/1", None),
    ];

    for (method, uri, body) in cases {
        let (status, response) = app.request(method, uri, Some(&token), body).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(response, json!({ "error": "Admin access required" }));
    }
}

#[tokio::test]
async fn test_progress_requires_level_and_day() {
    let app = TestApp::without_database();
    let token = app.member_token(10, "9876543210");

    let (status, body) = app
        .request(
            Method::POST,
            "/api/progress",
            Some(&token),
            Some(json!({ "completed": true })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Level and day are required" }));
}

#[tokio::test]
async fn test_progress_ranges_checked_before_write() {
    let app = TestApp::without_database();
    let token = app.member_token(10, "9876543210");

    let (status, body) = app
        .request(Method::POST, "/api/progress", Some(&token), Some(progress_body(6, 1, true, 0.0)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Level"));

    let (status, body) = app
        .request(Method::POST, "/api/progress", Some(&token), Some(progress_body(1, 31, true, 0.0)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Day"));

    let (status, _) = app
        .request(Method::GET, "/api/progress/0", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::without_database();
    let token = app.member_token(10, "9876543210");

    let (status, body) = app
        .request_raw(Method::POST, "/api/progress", &token, "{not json")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_registration_missing_fields_listed() {
    let app = TestApp::without_database();

    let mut body = registration_body(1, "9876543210");
    body["address"] = json!("   ");
    body.as_object_mut().unwrap().remove("sksMiracle");

    let (status, response) = app
        .request(Method::POST, "/api/event-registrations", None, Some(body))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = response["error"].as_str().unwrap();
    assert!(message.contains("address"));
    assert!(message.contains("sksMiracle"));
}

#[tokio::test]
async fn test_registration_rejects_non_numeric_age() {
    let app = TestApp::without_database();

    let mut body = registration_body(1, "9876543210");
    body["age"] = json!("thirty");

    let (status, _) = app
        .request(Method::POST, "/api/event-registrations", None, Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_registration_id_is_not_found() {
    let app = TestApp::without_database();
    let token = app.admin_token(1);

    for action in ["approve", "reject", "attend"] {
        let uri = format!("/api/event-registrations/not-an-id/{}", action);
        let (status, body) = app.request(Method::PUT, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", action);
        assert_eq!(body, json!({ "error": "Registration not found" }));
    }
}

#[tokio::test]
async fn test_non_numeric_ids_are_bad_request() {
    let app = TestApp::without_database();
    let token = app.admin_token(1);

    let (status, _) = app
        .request(Method::GET, "/api/events/abc", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(Method::PUT, "/api/admin/users/abc/approve", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_event_create_validates_fields() {
    let app = TestApp::without_database();
    let token = app.admin_token(1);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/events",
            Some(&token),
            Some(json!({ "name": "Satsang", "date": "2025-03-14" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("venue"));
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let app = TestApp::without_database();

    let (status, body) = app.request(Method::GET, "/api/health", None, None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Database error"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::without_database();
    let (status, body) = app.request(Method::GET, "/api/nothing-here", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found" }));

    let (status, body) = app.request(Method::GET, "/outside-api", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found" }));
}

#[tokio::test]
async fn test_wrong_method_has_json_body() {
    let app = TestApp::without_database();

    let (status, body) = app
        .request(Method::PUT, "/api/event-registrations/user/approve", None, None)
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "error": "Method not allowed" }));

    let (status, body) = app.request(Method::DELETE, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "error": "Method not allowed" }));
}

#[tokio::test]
async fn test_event_update_rejects_blank_fields() {
    let app = TestApp::without_database();
    let token = app.admin_token(1);

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/events/1",
            Some(&token),
            Some(json!({ "name": "   ", "venue": "" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("name"));
    assert!(message.contains("venue"));
}
