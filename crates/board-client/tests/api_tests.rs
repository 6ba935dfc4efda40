//! End-to-end tests for the board API client.
//!
//! These tests run the client against a wiremock server standing in for the
//! board service, checking request paths, bodies, cookies, and how failures
//! are classified.

use board_auth::Session;
use board_client::{ApiClient, ApiError, ByteRange, ClientConfig, Disposition};
use board_model::{LoginRequest, PostUpdate, RegisterRequest, UserAdminUpdate, VideoUpload};
use board_rbac::{decide, GrantRequest, Operation, PermissionLevel, Route};
use serde_json::json;
use tokio::sync::watch;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test fixture providing a mock board service.
struct TestFixture {
    server: MockServer,
}

impl TestFixture {
    async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.server.uri());
        config.timeout_secs = 10;
        config
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(self.config()).expect("client should build")
    }

    fn client_with_token(&self, token: &str) -> ApiClient {
        ApiClient::new(self.config().with_session_token(token)).expect("client should build")
    }
}

fn user_json(id: i64, is_admin: bool) -> serde_json::Value {
    json!({
        "id": id,
        "email": format!("user{}@example.com", id),
        "full_name": null,
        "is_active": true,
        "is_admin": is_admin,
        "created_at": "2026-01-10T14:30:00"
    })
}

fn post_json(id: i64, author_id: i64, is_public: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Post {}", id),
        "description": null,
        "video_filename": format!("{}.mp4", id),
        "video_original_name": "clip.mp4",
        "video_size": 2048,
        "author_id": author_id,
        "is_public": is_public,
        "created_at": "2026-01-10T14:30:00.123456",
        "updated_at": null,
        "author": user_json(author_id, false)
    })
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_me_sends_session_cookie() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("cookie", "access_token=tok-5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(5, false)))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let user = fixture.client_with_token("tok-5").me().await.unwrap();
    assert_eq!(user.id, 5);
    assert!(!user.is_admin);
}

#[tokio::test]
async fn test_failed_probe_resolves_session_to_none() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Could not validate credentials"})),
        )
        .expect(1)
        .mount(&fixture.server)
        .await;

    let client = fixture.client();
    let session = Session::new();

    assert!(session.resolve(&client).await.is_none());
    // Cached; no second probe
    assert!(session.resolve(&client).await.is_none());
}

#[tokio::test]
async fn test_login_then_probe() {
    let fixture = TestFixture::new().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "user5@example.com", "password": "secret1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok-5", "token_type": "bearer"})),
        )
        .expect(1)
        .mount(&fixture.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(5, false)))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let client = fixture.client();
    let session = Session::new();
    let user = session
        .login(&client, &LoginRequest::new("user5@example.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(user.id, 5);
    assert_eq!(session.principal().await.map(|p| p.id), Some(5));
}

#[tokio::test]
async fn test_login_failure_message_is_body_text() {
    let fixture = TestFixture::new().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&fixture.server)
        .await;

    let err = fixture
        .client()
        .login(&LoginRequest::new("user5@example.com", "nope"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), r#"{"detail":"Invalid credentials"}"#);
    assert_eq!(err.detail().as_deref(), Some("Invalid credentials"));
    assert_eq!(err.disposition(), Disposition::Redirect(Route::Login));
}

#[tokio::test]
async fn test_register_validates_before_sending() {
    let fixture = TestFixture::new().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json(8, false)))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let client = fixture.client();

    let err = client
        .register(&RegisterRequest::new("new@example.com", "123"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let user = client
        .register(&RegisterRequest::new("user8@example.com", "secret1").with_full_name("Eight"))
        .await
        .unwrap();
    assert_eq!(user.id, 8);
}

#[tokio::test]
async fn test_logout_clears_session_even_on_server_error() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(5, false)))
        .mount(&fixture.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let client = fixture.client();
    let session = Session::new();
    session.resolve(&client).await;

    let result = session.logout(&client).await;
    assert_eq!(result.unwrap_err().to_string(), "Sign-out failed: HTTP 500");
    assert!(session.current_user().await.is_none());
}

// =============================================================================
// Posts
// =============================================================================

#[tokio::test]
async fn test_list_and_get_posts() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([post_json(1, 5, true), post_json(2, 7, false)])),
        )
        .mount(&fixture.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/posts/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(2, 7, false)))
        .mount(&fixture.server)
        .await;

    let client = fixture.client();
    let posts = client.list_posts().await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].author_id, 7);

    let post = client.get_post(2).await.unwrap();
    assert!(!post.is_public);
    assert_eq!(post.author_email(), Some("user7@example.com"));
}

#[tokio::test]
async fn test_empty_error_body_uses_status() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/posts/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&fixture.server)
        .await;

    let err = fixture.client().get_post(404).await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 404");
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.disposition(), Disposition::Inline("HTTP 404".to_string()));
}

#[tokio::test]
async fn test_forbidden_redirects_to_board() {
    let fixture = TestFixture::new().await;

    Mock::given(method("DELETE"))
        .and(path("/api/posts/2"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"detail": "Not authorized to delete this post"})),
        )
        .mount(&fixture.server)
        .await;

    let err = fixture.client().delete_post(2).await.unwrap_err();
    assert!(err.is_auth_failure());
    assert_eq!(err.disposition(), Disposition::Redirect(Route::Board));
}

#[tokio::test]
async fn test_set_visibility_sends_partial_update() {
    let fixture = TestFixture::new().await;

    Mock::given(method("PUT"))
        .and(path("/api/posts/3"))
        .and(body_json(json!({"is_public": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(3, 5, false)))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let post = fixture.client().set_visibility(3, false).await.unwrap();
    assert!(!post.is_public);
}

#[tokio::test]
async fn test_empty_update_is_not_sent() {
    let fixture = TestFixture::new().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(3, 5, true)))
        .expect(0)
        .mount(&fixture.server)
        .await;

    let err = fixture
        .client()
        .update_post(3, &PostUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_upload_sends_multipart_form() {
    let fixture = TestFixture::new().await;

    Mock::given(method("POST"))
        .and(path("/api/posts"))
        .and(body_string_contains("name=\"title\""))
        .and(body_string_contains("Launch demo"))
        .and(body_string_contains("name=\"is_public\""))
        .and(body_string_contains("filename=\"clip.mp4\""))
        .and(body_string_contains("video/mp4"))
        .and(body_string_contains("fake video bytes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_json(11, 5, false)))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let upload = VideoUpload::new(" Launch demo ", "clip.mp4", b"fake video bytes".to_vec())
        .with_visibility(false);
    let (tx, rx) = watch::channel(0u8);

    let post = fixture
        .client()
        .upload_post_with_progress(upload, &tx)
        .await
        .unwrap();

    assert_eq!(post.id, 11);
    assert_eq!(*rx.borrow(), 100);
}

#[tokio::test]
async fn test_upload_rejected_locally() {
    let fixture = TestFixture::new().await;
    let upload = VideoUpload::new("Clip", "clip.avi", b"data".to_vec());
    let (tx, rx) = watch::channel(0u8);

    let result = fixture
        .client()
        .upload_post_with_progress(upload, &tx)
        .await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
    assert_eq!(*rx.borrow(), 0);
}

// =============================================================================
// Grants
// =============================================================================

#[tokio::test]
async fn test_grant_lifecycle() {
    let fixture = TestFixture::new().await;

    Mock::given(method("POST"))
        .and(path("/api/posts/9/permissions"))
        .and(body_json(json!({"user_identifier": "user5@example.com", "permission_type": "read"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 40,
            "post_id": 9,
            "user_id": 5,
            "permission_type": "read",
            "created_at": "2026-01-11T09:00:00",
            "user": user_json(5, false)
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    // Removal is keyed by the grantee's user id, not the grant id.
    Mock::given(method("DELETE"))
        .and(path("/api/posts/9/permissions/5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Permission deleted successfully"})),
        )
        .expect(1)
        .mount(&fixture.server)
        .await;

    let client = fixture.client();
    let request = GrantRequest::for_identifier("user5@example.com", PermissionLevel::Read).unwrap();
    let grant = client.add_grant(9, &request).await.unwrap();
    assert_eq!(grant.id, 40);
    assert_eq!(grant.permission_type, PermissionLevel::Read);

    let removed = client.remove_grant(9, grant.user_id).await.unwrap();
    assert_eq!(removed.message, "Permission deleted successfully");
}

#[tokio::test]
async fn test_grants_drive_policy() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/posts/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(9, 7, false)))
        .mount(&fixture.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/posts/9/permissions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 41,
            "post_id": 9,
            "user_id": 5,
            "permission_type": "write",
            "created_at": "2026-01-11T09:00:00",
            "user": user_json(5, false)
        }])))
        .mount(&fixture.server)
        .await;

    let client = fixture.client();
    let post = client.get_post(9).await.unwrap();
    let grants = client.list_grants(9).await.unwrap();
    let principal = Some(board_model::Principal::member(5));

    assert!(decide(principal, &post, &grants, Operation::View).is_allowed());
    assert_eq!(
        decide(principal, &post, &grants, Operation::Delete).redirect_route(),
        Some(Route::Board)
    );
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn test_admin_endpoints() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_users": 4,
            "active_users": 3,
            "total_posts": 10,
            "public_posts": 6
        })))
        .mount(&fixture.server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/admin/users/4"))
        .and(body_json(json!({"is_active": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "email": "user4@example.com",
            "full_name": null,
            "is_active": false,
            "is_admin": false,
            "created_at": "2026-01-10T14:30:00"
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/1"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "Cannot delete your own account"})),
        )
        .mount(&fixture.server)
        .await;

    let client = fixture.client();

    let stats = client.admin_stats().await.unwrap();
    assert_eq!(stats.inactive_users(), 1);
    assert_eq!(stats.private_posts(), 4);

    let update = UserAdminUpdate {
        is_active: Some(false),
        ..Default::default()
    };
    let user = client.update_user(4, &update).await.unwrap();
    assert!(!user.is_active);

    let err = client.delete_user(1).await.unwrap_err();
    assert_eq!(err.detail().as_deref(), Some("Cannot delete your own account"));
    assert!(matches!(err.disposition(), Disposition::Inline(_)));
}

// =============================================================================
// Streaming
// =============================================================================

#[tokio::test]
async fn test_ranged_stream() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/stream/9"))
        .and(header("range", "bytes=0-3"))
        .respond_with(
            ResponseTemplate::new(206)
                .insert_header("content-type", "video/mp4")
                .insert_header("content-range", "bytes 0-3/2048")
                .insert_header("accept-ranges", "bytes")
                .set_body_bytes(b"abcd".to_vec()),
        )
        .expect(1)
        .mount(&fixture.server)
        .await;

    let client = fixture.client();
    assert_eq!(client.stream_url(9), format!("{}/api/stream/9", fixture.server.uri()));

    let stream = client
        .open_stream(9, Some(ByteRange::between(0, 3)))
        .await
        .unwrap();

    assert!(stream.is_partial());
    assert!(stream.accepts_ranges);
    assert_eq!(stream.content_type.as_deref(), Some("video/mp4"));
    assert_eq!(stream.total_size(), Some(2048));
    assert_eq!(stream.collect().await.unwrap(), b"abcd".to_vec());
}

#[tokio::test]
async fn test_stream_denied() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/api/stream/9"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"detail": "Not authorized to access this post"})),
        )
        .mount(&fixture.server)
        .await;

    let err = fixture.client().open_stream(9, None).await.unwrap_err();
    assert_eq!(err.disposition(), Disposition::Redirect(Route::Board));
}
