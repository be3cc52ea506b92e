//! Unparseable bodies, paths and query strings get the JSON error shape.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get_auth, patch_json_auth, post_json, post_json_auth, send_raw, TestApp,
};
use serde_json::{json, Value};
use uuid::Uuid;

async fn assert_bad_request(response: axum::http::Response<axum::body::Body>) -> Value {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().is_some_and(|m| !m.is_empty()));
    json
}

#[tokio::test]
async fn quiz_answer_with_invalid_question_id() {
    let app = TestApp::new();
    let body = json!({ "answers": [{ "questionId": "not-a-uuid", "answer": "x" }] });

    let response = post_json(app.router(), "/api/verify-quiz", body).await;

    let json = assert_bad_request(response).await;
    assert_eq!(json["error"], "Dữ liệu gửi lên thiếu trường hoặc sai kiểu");
}

#[tokio::test]
async fn contribution_missing_field_name() {
    let app = TestApp::new();
    let body = json!({ "fieldLabel": "Bài viết", "newValue": "{}" });

    let response =
        post_json_auth(app.router(), "/api/contributions", body, &app.token(app.member)).await;

    assert_bad_request(response).await;
    assert!(app.store.contributions().is_empty());
}

#[tokio::test]
async fn review_with_unknown_status_value() {
    let app = TestApp::new();
    let uri = format!("/api/contributions/{}", Uuid::new_v4());

    let response = patch_json_auth(
        app.router(),
        &uri,
        json!({ "status": "approve" }),
        &app.token(app.admin),
    )
    .await;

    assert_bad_request(response).await;
}

#[tokio::test]
async fn review_with_non_uuid_path() {
    let app = TestApp::new();

    let response = patch_json_auth(
        app.router(),
        "/api/contributions/123",
        json!({ "status": "approved" }),
        &app.token(app.admin),
    )
    .await;

    let json = assert_bad_request(response).await;
    assert_eq!(json["error"], "Đường dẫn không hợp lệ");
}

#[tokio::test]
async fn body_that_is_not_json() {
    let app = TestApp::new();

    let response = send_raw(
        app.router(),
        "POST",
        "/api/bug-reports",
        Some(&app.token(app.member)),
        "application/json",
        "{ title: ",
    )
    .await;

    let json = assert_bad_request(response).await;
    assert_eq!(json["error"], "Nội dung JSON sai cú pháp");
}

#[tokio::test]
async fn body_without_json_content_type() {
    let app = TestApp::new();

    let response = send_raw(
        app.router(),
        "POST",
        "/api/verify-quiz",
        None,
        "text/plain",
        r#"{"answers":[]}"#,
    )
    .await;

    let json = assert_bad_request(response).await;
    assert_eq!(json["error"], "Nội dung yêu cầu phải là application/json");
}

#[tokio::test]
async fn query_with_non_numeric_page() {
    let app = TestApp::new();

    let response =
        get_auth(app.router(), "/api/audit-logs?page=abc", &app.token(app.admin)).await;

    let json = assert_bad_request(response).await;
    assert_eq!(json["error"], "Tham số truy vấn không hợp lệ");
}

#[tokio::test]
async fn upload_without_multipart_body() {
    let app = TestApp::new();

    let response = send_raw(
        app.router(),
        "POST",
        "/api/media/upload",
        Some(&app.token(app.member)),
        "application/json",
        "{}",
    )
    .await;

    assert_bad_request(response).await;
}
