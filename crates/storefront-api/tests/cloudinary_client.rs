//! Integration tests for `CloudinaryClient` uploads.

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_api::{CloudinaryClient, CloudinaryError};

fn test_client(server: &MockServer) -> CloudinaryClient {
    CloudinaryClient::with_base_url(&format!("{}/v1_1", server.uri()), "demo", "default", 5)
        .expect("failed to build test CloudinaryClient")
}

#[tokio::test]
async fn upload_sends_multipart_with_preset() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1_1/demo/image/upload"))
        .and(body_string_contains("name=\"upload_preset\""))
        .and(body_string_contains("filename=\"lamp.png\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secure_url": "https://res.cloudinary.com/demo/lamp.png",
            "public_id": "lamp"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uploaded = test_client(&server)
        .upload("lamp.png", "image/png", b"fake png bytes".to_vec())
        .await
        .unwrap();

    assert_eq!(uploaded.secure_url, "https://res.cloudinary.com/demo/lamp.png");
    assert_eq!(uploaded.public_id.as_deref(), Some("lamp"));
}

#[tokio::test]
async fn rejected_upload_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1_1/demo/image/upload"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": {"message": "Invalid image file"}})),
        )
        .mount(&server)
        .await;

    match test_client(&server).upload("x.png", "image/png", vec![1, 2, 3]).await {
        Err(CloudinaryError::Rejected(msg)) => assert!(msg.contains("Invalid image file")),
        other => panic!("expected Rejected, got: {other:?}"),
    }
}
