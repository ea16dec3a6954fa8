//! Tests for the backend client, using a mock server so no real backend
//! is required.

use reelvault_client::{BackendClient, BackendConfig, BackendError};
use reelvault_core::embed::DEFAULT_THUMBNAIL;
use reelvault_core::storage::DocumentStore;
use reelvault_core::types::{CreateList, CreateVideo, ListId, Platform, UserId, VideoId};
use reelvault_core::VaultError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn video_json(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "owner_id": "user-1",
        "title": title,
        "description": "A clip",
        "source_url": "https://youtu.be/dQw4w9WgXcQ",
        "platform": "YouTube",
        "preview_image_url": "https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg",
        "created_at": "2024-01-01T00:00:00Z"
    })
}

async fn signed_in_client(server: &MockServer) -> BackendClient {
    Mock::given(method("POST"))
        .and(path("/v1/auth/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "token-123",
            "user": { "id": "user-1", "email": "ada@example.com", "display_name": "Ada" }
        })))
        .mount(server)
        .await;

    let client = BackendClient::new(BackendConfig::new(server.uri())).unwrap();
    client.sign_in("ada@example.com", "hunter2").await.unwrap();
    client
}

mod authentication {
    use super::*;

    #[tokio::test]
    async fn sign_in_stores_token_and_publishes_session() {
        let server = MockServer::start().await;
        let client = BackendClient::new(BackendConfig::new(server.uri())).unwrap();
        let session = client.session();

        assert!(!client.is_authenticated().await);
        assert!(session.borrow().is_none());

        Mock::given(method("POST"))
            .and(path("/v1/auth/signin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "token-123",
                "user": { "id": "user-1", "email": "ada@example.com", "display_name": "Ada" }
            })))
            .mount(&server)
            .await;

        let profile = client.sign_in("ada@example.com", "hunter2").await.unwrap();
        assert_eq!(profile.id, UserId::new("user-1"));
        assert_eq!(profile.label(), "Ada");

        assert!(client.is_authenticated().await);
        assert_eq!(session.borrow().as_ref().unwrap().email, "ada@example.com");
    }

    #[tokio::test]
    async fn invalid_credentials_fail_distinctly() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/auth/signin"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;

        let client = BackendClient::new(BackendConfig::new(server.uri())).unwrap();
        let err = client.sign_in("ada@example.com", "wrong").await.unwrap_err();

        assert!(matches!(err, BackendError::AuthFailed(_)));
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn sign_up_returns_a_signed_in_session() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/auth/signup"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "access_token": "token-456",
                "user": { "id": "user-2", "email": "new@example.com", "display_name": null }
            })))
            .mount(&server)
            .await;

        let client = BackendClient::new(BackendConfig::new(server.uri())).unwrap();
        let profile = client
            .sign_up("new@example.com", "hunter2", None)
            .await
            .unwrap();

        assert_eq!(profile.label(), "new@example.com");
        assert!(client.is_authenticated().await);
    }

    #[tokio::test]
    async fn sign_out_clears_the_session() {
        let server = MockServer::start().await;
        let client = signed_in_client(&server).await;
        let session = client.session();

        Mock::given(method("POST"))
            .and(path("/v1/auth/signout"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        client.sign_out().await.unwrap();
        assert!(!client.is_authenticated().await);
        assert!(session.borrow().is_none());
    }

    #[tokio::test]
    async fn sign_out_clears_the_session_even_when_the_server_errors() {
        let server = MockServer::start().await;
        let client = signed_in_client(&server).await;
        let session = client.session();

        Mock::given(method("POST"))
            .and(path("/v1/auth/signout"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        client.sign_out().await.unwrap();
        assert!(!client.is_authenticated().await);
        assert!(session.borrow().is_none());
    }

    #[tokio::test]
    async fn documents_require_authentication() {
        let server = MockServer::start().await;
        let client = BackendClient::new(BackendConfig::new(server.uri())).unwrap();

        assert!(matches!(
            client.documents().await.unwrap_err(),
            BackendError::AuthRequired
        ));
    }
}

mod documents {
    use super::*;

    #[tokio::test]
    async fn create_video_returns_the_assigned_id() {
        let server = MockServer::start().await;
        let client = signed_in_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/v1/videos"))
            .respond_with(ResponseTemplate::new(201).set_body_json(video_json("v-9", "Bread")))
            .mount(&server)
            .await;

        let documents = client.documents().await.unwrap();
        let video = documents
            .create_video(CreateVideo {
                owner_id: UserId::new("user-1"),
                title: "Bread".into(),
                description: "A clip".into(),
                source_url: "https://youtu.be/dQw4w9WgXcQ".into(),
                platform: Platform::YouTube,
                preview_image_url: "https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg".into(),
                created_at: chrono::Utc::now(),
            })
            .await
            .unwrap();

        assert_eq!(video.id, VideoId::new("v-9"));
        assert_eq!(video.title, "Bread");
    }

    #[tokio::test]
    async fn filtered_reads_pass_the_ownership_field() {
        let server = MockServer::start().await;
        let client = signed_in_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1/videos"))
            .and(query_param("owner", "user-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                video_json("v-1", "One"),
                video_json("v-2", "Two"),
            ])))
            .mount(&server)
            .await;

        let documents = client.documents().await.unwrap();
        let videos = documents
            .videos_for_owner(&UserId::new("user-1"))
            .await
            .unwrap();

        let titles: Vec<&str> = videos.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, ["One", "Two"], "insertion order preserved");
    }

    #[tokio::test]
    async fn malformed_records_are_rejected_with_their_id() {
        let server = MockServer::start().await;
        let client = signed_in_client(&server).await;

        // Second record is missing required fields.
        Mock::given(method("GET"))
            .and(path("/v1/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                video_json("v-1", "One"),
                { "id": "v-broken", "title": 42 },
            ])))
            .mount(&server)
            .await;

        let documents = client.documents().await.unwrap();
        let err = documents
            .videos_for_owner(&UserId::new("user-1"))
            .await
            .unwrap_err();

        match err {
            VaultError::MalformedRecord { collection, id, .. } => {
                assert_eq!(collection, "videos");
                assert_eq!(id, "v-broken");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_list_reads_as_none_but_update_fails_distinctly() {
        let server = MockServer::start().await;
        let client = signed_in_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1/lists/l-gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/v1/lists/l-gone/videos"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let documents = client.documents().await.unwrap();
        let gone = ListId::new("l-gone");

        assert!(documents.get_list(&gone).await.unwrap().is_none());

        let err = documents
            .update_list_videos(&gone, Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::ListNotFound(id) if id == gone));
    }

    #[tokio::test]
    async fn deleting_an_already_deleted_video_is_fine() {
        let server = MockServer::start().await;
        let client = signed_in_client(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/v1/videos/v-gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let documents = client.documents().await.unwrap();
        assert!(documents
            .delete_video(&VideoId::new("v-gone"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn create_list_starts_empty() {
        let server = MockServer::start().await;
        let client = signed_in_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/v1/lists"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "l-1",
                "owner_id": "user-1",
                "title": "Favorites",
                "videos": []
            })))
            .mount(&server)
            .await;

        let documents = client.documents().await.unwrap();
        let list = documents
            .create_list(CreateList {
                owner_id: UserId::new("user-1"),
                title: "Favorites".into(),
            })
            .await
            .unwrap();

        assert_eq!(list.id, ListId::new("l-1"));
        assert!(list.videos.is_empty());
    }

    #[tokio::test]
    async fn transient_server_errors_surface_as_storage_errors() {
        let server = MockServer::start().await;
        let client = signed_in_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1/videos"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let documents = client.documents().await.unwrap();
        let err = documents
            .videos_for_owner(&UserId::new("user-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, VaultError::Storage(_)));
    }

    #[tokio::test]
    async fn not_found_on_a_write_is_a_storage_error_not_a_parse_error() {
        let server = MockServer::start().await;
        let client = signed_in_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/v1/videos"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such route"))
            .mount(&server)
            .await;

        let documents = client.documents().await.unwrap();
        let err = documents
            .create_video(CreateVideo {
                owner_id: UserId::new("user-1"),
                title: "Bread".into(),
                description: "A clip".into(),
                source_url: "https://youtu.be/dQw4w9WgXcQ".into(),
                platform: Platform::YouTube,
                preview_image_url: "https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg".into(),
                created_at: chrono::Utc::now(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, VaultError::Storage(_)));
    }

    #[tokio::test]
    async fn watch_delivers_the_initial_snapshot_and_tears_down() {
        let server = MockServer::start().await;
        let client = signed_in_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1/videos"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([video_json("v-1", "One")])),
            )
            .mount(&server)
            .await;

        let documents = client.documents().await.unwrap();
        let watch = documents
            .watch_videos(&UserId::new("user-1"))
            .await
            .unwrap();

        let snapshot = watch.current();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].title, "One");

        // Dropping the handle aborts the polling task; nothing to observe
        // beyond not hanging or panicking.
        drop(watch);
    }
}

mod thumbnails {
    use super::*;

    #[tokio::test]
    async fn successful_lookup_returns_the_thumbnail_url() {
        let server = MockServer::start().await;
        let config =
            BackendConfig::new("https://api.reelvault.app").with_oembed_url(server.uri());
        let client = BackendClient::new(config).unwrap();

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "thumbnail_url": "https://scontent.example/thumb.jpg",
                "author_name": "someone"
            })))
            .mount(&server)
            .await;

        let thumbnails = client.thumbnails().await;
        assert_eq!(
            thumbnails.instagram_thumbnail("Cxyz123AbCd").await,
            "https://scontent.example/thumb.jpg"
        );
    }

    #[tokio::test]
    async fn lookup_failures_degrade_to_the_placeholder() {
        let server = MockServer::start().await;
        let config =
            BackendConfig::new("https://api.reelvault.app").with_oembed_url(server.uri());
        let client = BackendClient::new(config).unwrap();
        let thumbnails = client.thumbnails().await;

        // Server error.
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        assert_eq!(
            thumbnails.instagram_thumbnail("Cxyz123AbCd").await,
            DEFAULT_THUMBNAIL
        );
        server.reset().await;

        // Non-JSON body.
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .expect(1)
            .mount(&server)
            .await;
        assert_eq!(
            thumbnails.instagram_thumbnail("Cxyz123AbCd").await,
            DEFAULT_THUMBNAIL
        );
        server.reset().await;

        // JSON without the thumbnail field.
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "title": "post" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        assert_eq!(
            thumbnails.instagram_thumbnail("Cxyz123AbCd").await,
            DEFAULT_THUMBNAIL
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_degrades_to_the_placeholder() {
        let config = BackendConfig::new("https://api.reelvault.app")
            .with_oembed_url("http://127.0.0.1:1");
        let client = BackendClient::new(config).unwrap();

        let thumbnails = client.thumbnails().await;
        assert_eq!(
            thumbnails.instagram_thumbnail("Cxyz123AbCd").await,
            DEFAULT_THUMBNAIL
        );
    }
}
