//! HTTP tests for media upload, moderation, deletion and avatars.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, multipart_request, patch_json_auth, post_json_auth, send, TestApp,
    UPLOAD_QUOTA,
};
use giapha_db::models::person::NewPerson;
use serde_json::{json, Value};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

async fn upload(app: &TestApp, token: &str, file_name: &str, fields: &[(&str, &str)]) -> (StatusCode, Value) {
    let request = multipart_request("/api/media/upload", token, file_name, "image/png", PNG, fields);
    let response = send(app.router(), request).await;
    let status = response.status();
    (status, body_json(response).await)
}

fn seed_person(app: &TestApp, handle: &str) {
    app.store.add_person(&NewPerson {
        handle: handle.to_string(),
        display_name: "Nguyễn Văn Tổ".to_string(),
        gender: 1,
        generation: 1,
        birth_year: None,
        birth_month: None,
        birth_day: None,
        death_year: None,
        is_living: true,
        occupation: None,
        current_address: None,
        phone: None,
        email: None,
        notes: None,
    });
}

#[tokio::test]
async fn upload_creates_pending_media() {
    let app = TestApp::new();
    let token = app.token(app.member);

    let (status, json) = upload(&app, &token, "anh-ho.png", &[("title", "Ảnh họ")]).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["ok"], true);
    assert_eq!(json["media_type"], "IMAGE");
    assert_eq!(json["quota"]["used"], 1);
    assert_eq!(json["quota"]["limit"], UPLOAD_QUOTA);
    assert!(json["storage_url"].as_str().unwrap().ends_with(".png"));

    let media = app.store.media();
    assert_eq!(media.len(), 1);
    assert_eq!(media[0].state, "PENDING");
    assert_eq!(media[0].title.as_deref(), Some("Ảnh họ"));
    assert_eq!(app.objects.object_count(), 1);
}

#[tokio::test]
async fn upload_over_quota_is_refused() {
    let app = TestApp::new();
    let token = app.token(app.member);
    upload(&app, &token, "mot.png", &[]).await;
    upload(&app, &token, "hai.png", &[]).await;

    let (status, json) = upload(&app, &token, "ba.png", &[]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(app.objects.object_count(), 2);
}

#[tokio::test]
async fn unsupported_type_is_refused() {
    let app = TestApp::new();
    let request = multipart_request(
        "/api/media/upload",
        &app.token(app.member),
        "logo.svg",
        "image/svg+xml",
        b"<svg/>",
        &[],
    );

    let response = send(app.router(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.objects.object_count(), 0);
}

#[tokio::test]
async fn upload_requires_authentication() {
    let app = TestApp::new();
    let request = multipart_request("/api/media/upload", "not-a-jwt", "a.png", "image/png", PNG, &[]);

    let response = send(app.router(), request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn moderation_is_for_moderators() {
    let app = TestApp::new();
    let (_, json) = upload(&app, &app.token(app.member), "a.png", &[]).await;
    let uri = format!("/api/media/{}", json["id"].as_str().unwrap());

    let response =
        patch_json_auth(app.router(), &uri, json!({ "state": "PUBLISHED" }), &app.token(app.member))
            .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response =
        patch_json_auth(app.router(), &uri, json!({ "state": "PUBLISHED" }), &app.token(app.editor))
            .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["data"]["state"], "PUBLISHED");
}

#[tokio::test]
async fn owner_deletes_and_frees_quota() {
    let app = TestApp::new();
    let token = app.token(app.member);
    let (_, first) = upload(&app, &token, "mot.png", &[]).await;
    upload(&app, &token, "hai.png", &[]).await;
    let uri = format!("/api/media/{}", first["id"].as_str().unwrap());

    let response = delete_auth(app.router(), &uri, &app.token(app.editor)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.router(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ok"], true);

    let response = delete_auth(app.router(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (status, _) = upload(&app, &token, "ba.png", &[]).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn published_linked_photo_becomes_avatar() {
    let app = TestApp::new();
    seed_person(&app, "nguyen-van-to");
    let editor = app.token(app.editor);
    let (status, json) = upload(&app, &editor, "chan-dung.png", &[("linked_person", "nguyen-van-to")]).await;
    assert_eq!(status, StatusCode::CREATED);
    let media_id = json["id"].as_str().unwrap().to_string();
    let url = json["storage_url"].as_str().unwrap().to_string();

    // Still pending.
    let response = post_json_auth(
        app.router(),
        "/api/people/nguyen-van-to/set-avatar",
        json!({ "mediaId": media_id }),
        &editor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    patch_json_auth(
        app.router(),
        &format!("/api/media/{media_id}"),
        json!({ "state": "PUBLISHED" }),
        &editor,
    )
    .await;

    let response = post_json_auth(
        app.router(),
        "/api/people/nguyen-van-to/set-avatar",
        json!({ "mediaId": media_id }),
        &editor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["avatarUrl"], url);
    assert_eq!(app.store.people()[0].avatar_url.as_deref(), Some(url.as_str()));

    let response = post_json_auth(
        app.router(),
        "/api/people/nguyen-van-to/set-avatar",
        json!({ "clear": true }),
        &editor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["avatarUrl"].is_null());
    assert!(app.store.people()[0].avatar_url.is_none());
}

#[tokio::test]
async fn set_avatar_needs_a_target_and_a_moderator() {
    let app = TestApp::new();
    seed_person(&app, "nguyen-van-to");

    let response = post_json_auth(
        app.router(),
        "/api/people/nguyen-van-to/set-avatar",
        json!({}),
        &app.token(app.admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = post_json_auth(
        app.router(),
        "/api/people/nguyen-van-to/set-avatar",
        json!({ "clear": true }),
        &app.token(app.member),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        app.router(),
        "/api/people/khong-co/set-avatar",
        json!({ "clear": true }),
        &app.token(app.admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
