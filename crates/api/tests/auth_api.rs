//! HTTP tests for the registration quiz, token handling and `GET /api/me`.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Duration;
use common::{body_json, get, get_auth, post_json, send, TestApp};
use giapha_api::auth::jwt::{generate_token, JwtConfig};
use giapha_core::roles::{PROFILE_STATUS_PENDING, ROLE_MEMBER};
use serde_json::json;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Quiz
// ---------------------------------------------------------------------------

#[tokio::test]
async fn questions_are_sampled_without_answers() {
    let app = TestApp::new();
    for i in 0..5 {
        app.store
            .add_question(&format!("Câu hỏi {i}"), "đáp án", Some("gợi ý"), true);
    }
    app.store.add_question("Câu hỏi ẩn", "x", None, false);

    let response = get(app.router(), "/api/questions").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let questions = json["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 3);
    for q in questions {
        assert!(q.get("correct_answer").is_none());
        assert!(q.get("correctAnswer").is_none());
        assert_ne!(q["question"], "Câu hỏi ẩn");
    }
}

#[tokio::test]
async fn quiz_passes_with_normalized_answers() {
    let app = TestApp::new();
    let first = app.store.add_question("Tổ tiên họ?", "Nguyễn Văn Thủy", None, true);
    let second = app.store.add_question("Quê gốc?", "nam định", None, true);

    let body = json!({ "answers": [
        { "questionId": first, "answer": "  nguyễn văn thủy " },
        { "questionId": second, "answer": "Nam Định" },
    ]});
    let response = post_json(app.router(), "/api/verify-quiz", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["passed"], true);
}

#[tokio::test]
async fn quiz_fails_on_wrong_unknown_or_missing_answers() {
    let app = TestApp::new();
    let id = app.store.add_question("Tổ tiên họ?", "Nguyễn Văn Thủy", None, true);

    let wrong = json!({ "answers": [{ "questionId": id, "answer": "Trần" }] });
    let response = post_json(app.router(), "/api/verify-quiz", wrong).await;
    assert_eq!(body_json(response).await["passed"], false);

    let unknown = json!({ "answers": [{ "questionId": Uuid::new_v4(), "answer": "x" }] });
    let response = post_json(app.router(), "/api/verify-quiz", unknown).await;
    assert_eq!(body_json(response).await["passed"], false);

    let response = post_json(app.router(), "/api/verify-quiz", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["passed"], false);
}

// ---------------------------------------------------------------------------
// GET /me
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_returns_the_callers_profile() {
    let app = TestApp::new();
    let token = app.token(app.editor);

    let response = get_auth(app.router(), "/api/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "editor@giapha.vn");
    assert_eq!(json["data"]["role"], "editor");
}

#[tokio::test]
async fn me_works_for_pending_profiles() {
    let app = TestApp::new();
    let pending = app
        .store
        .add_profile(Uuid::new_v4(), "moi@giapha.vn", ROLE_MEMBER, PROFILE_STATUS_PENDING);

    let response = get_auth(app.router(), "/api/me", &app.token(pending.id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "pending");
}

#[tokio::test]
async fn me_requires_a_token() {
    let app = TestApp::new();

    let response = get(app.router(), "/api/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn malformed_authorization_header_is_rejected() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/api/me")
        .header("Authorization", format!("Token {}", app.token(app.member)))
        .body(Body::empty())
        .unwrap();

    let response = send(app.router(), request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_or_foreign_tokens_are_rejected() {
    let app = TestApp::new();

    let expired = generate_token(app.member, None, Duration::minutes(-10), &app.config.jwt).unwrap();
    let response = get_auth(app.router(), "/api/me", &expired).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let foreign = JwtConfig {
        secret: "someone-else".into(),
        audience: "authenticated".into(),
    };
    let forged = generate_token(app.member, None, Duration::hours(1), &foreign).unwrap();
    let response = get_auth(app.router(), "/api/me", &forged).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_without_profile_is_unauthorized() {
    let app = TestApp::new();

    let response = get_auth(app.router(), "/api/me", &app.token(Uuid::new_v4())).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
