//! HTTP tests for bug reports.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, patch_json_auth, post_json_auth, TestApp};
use serde_json::{json, Value};

async fn report(app: &TestApp, token: &str, title: &str) -> Value {
    let body = json!({ "title": title, "description": "Bấm lưu không được", "pageUrl": "/cay-gia-pha" });
    let response = post_json_auth(app.router(), "/api/bug-reports", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[tokio::test]
async fn users_submit_and_see_their_own_reports() {
    let app = TestApp::new();
    let created = report(&app, &app.token(app.member), "Lỗi lưu").await;
    report(&app, &app.token(app.editor), "Lỗi ảnh").await;

    assert_eq!(created["status"], "open");
    assert_eq!(created["page_url"], "/cay-gia-pha");

    let response = get_auth(app.router(), "/api/bug-reports", &app.token(app.member)).await;
    let rows = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Lỗi lưu");

    let response = get_auth(app.router(), "/api/bug-reports", &app.token(app.admin)).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let app = TestApp::new();
    let body = json!({ "title": "   " });

    let response = post_json_auth(app.router(), "/api/bug-reports", body, &app.token(app.member)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn others_cannot_read_a_report() {
    let app = TestApp::new();
    let created = report(&app, &app.token(app.member), "Lỗi lưu").await;
    let uri = format!("/api/bug-reports/{}", created["id"].as_str().unwrap());

    let response = get_auth(app.router(), &uri, &app.token(app.editor)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app.router(), &uri, &app.token(app.admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_moves_report_through_valid_transitions() {
    let app = TestApp::new();
    let created = report(&app, &app.token(app.member), "Lỗi lưu").await;
    let uri = format!("/api/bug-reports/{}", created["id"].as_str().unwrap());
    let admin = app.token(app.admin);

    let response =
        patch_json_auth(app.router(), &uri, json!({ "status": "in_progress" }), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "in_progress");

    let response = patch_json_auth(app.router(), &uri, json!({ "status": "open" }), &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        patch_json_auth(app.router(), &uri, json!({ "status": "wontfix" }), &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json_auth(
        app.router(),
        &uri,
        json!({ "status": "resolved" }),
        &app.token(app.member),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
