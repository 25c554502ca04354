use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use image_courier::{
    upload_image, upload_images, ImageFile, ProviderConfig, ProviderKind, ProviderRegistry,
    TransformOptions, UploadOptions,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn text_file(name: &str) -> ImageFile {
    ImageFile::new(vec![b'x'; 128], name, "image/jpeg")
}

fn cloudinary_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        base_url: Some(server.uri()),
        ..ProviderConfig::cloudinary("demo", None)
    }
}

fn success_body() -> serde_json::Value {
    json!({
        "secure_url": "https://res.cloudinary.com/demo/image/upload/v1/pic.jpg",
        "public_id": "pic",
        "version": 1,
        "width": 800,
        "height": 600,
        "format": "jpg",
        "bytes": 128,
        "resource_type": "image",
        "created_at": "2024-01-01T00:00:00Z",
        "original_filename": "pic"
    })
}

#[tokio::test]
async fn upload_uses_the_unsigned_preset_by_default() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/demo/image/upload"))
        .and(body_string_contains("unsigned_preset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let registry = ProviderRegistry::default();
    let result = upload_image(
        &registry,
        text_file("pic.jpg"),
        ProviderKind::Cloudinary,
        &cloudinary_config(&server),
        &UploadOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(
        result.url,
        "https://res.cloudinary.com/demo/image/upload/v1/pic.jpg"
    );
    assert_eq!(result.provider, ProviderKind::Cloudinary);
    assert_eq!(
        result.metadata.get("public_id").and_then(|v| v.as_str()),
        Some("pic")
    );
    assert_eq!(
        result.metadata.get("bytes").and_then(|v| v.as_u64()),
        Some(128)
    );
}

#[tokio::test]
async fn caller_supplied_preset_overrides_the_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/demo/image/upload"))
        .and(body_string_contains("my_preset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = ProviderConfig {
        base_url: Some(server.uri()),
        ..ProviderConfig::cloudinary("demo", Some("my_preset".to_string()))
    };

    let registry = ProviderRegistry::default();
    upload_image(
        &registry,
        text_file("pic.jpg"),
        ProviderKind::Cloudinary,
        &config,
        &UploadOptions::default(),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn transform_options_are_sent_as_one_comma_joined_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/demo/image/upload"))
        .and(body_string_contains("w_100,h_50,c_fill"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let options = UploadOptions::new().with_transform(TransformOptions {
        width: Some(100),
        height: Some(50),
        crop: Some("fill".to_string()),
        ..Default::default()
    });

    let registry = ProviderRegistry::default();
    upload_image(
        &registry,
        text_file("pic.jpg"),
        ProviderKind::Cloudinary,
        &cloudinary_config(&server),
        &options,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn no_transformation_field_without_transform_options() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/demo/image/upload"))
        .and(body_string_contains("transformation"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/demo/image/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .with_priority(5)
        .expect(1)
        .mount(&server)
        .await;

    let registry = ProviderRegistry::default();
    upload_image(
        &registry,
        text_file("pic.jpg"),
        ProviderKind::Cloudinary,
        &cloudinary_config(&server),
        &UploadOptions::default(),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn missing_cloud_name_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(0)
        .mount(&server)
        .await;

    let config = ProviderConfig {
        base_url: Some(server.uri()),
        ..ProviderConfig::default()
    };

    let registry = ProviderRegistry::default();
    let err = upload_image(
        &registry,
        text_file("pic.jpg"),
        ProviderKind::Cloudinary,
        &config,
        &UploadOptions::default(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.code(), "MISSING_CONFIG");
    assert_eq!(err.provider(), Some(ProviderKind::Cloudinary));
}

#[tokio::test]
async fn missing_secure_url_surfaces_the_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/demo/image/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "message": "Upload preset not found" }
        })))
        .mount(&server)
        .await;

    let registry = ProviderRegistry::default();
    let err = upload_image(
        &registry,
        text_file("pic.jpg"),
        ProviderKind::Cloudinary,
        &cloudinary_config(&server),
        &UploadOptions::default(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.code(), "UPLOAD_FAILED");
    assert!(err.to_string().contains("Upload preset not found"));
}

#[tokio::test]
async fn concurrent_batch_hits_the_endpoint_once_per_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/demo/image/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(3)
        .mount(&server)
        .await;

    let registry = ProviderRegistry::default();
    let files = vec![
        text_file("one.jpg"),
        text_file("two.jpg"),
        text_file("three.jpg"),
    ];

    let results = upload_images(
        &registry,
        files,
        ProviderKind::Cloudinary,
        &cloudinary_config(&server),
        &UploadOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(results.len(), 3);
}
