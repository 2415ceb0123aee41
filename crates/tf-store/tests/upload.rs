//! Uploads against the in-memory object store.

use std::path::PathBuf;

use object_store::Attribute;
use object_store::path::Path as ObjectPath;
use pretty_assertions::assert_eq;
use tf_config::StoreConfig;
use tf_core::AttachmentKind;
use tf_store::{BlobUploader, ObjectStoreUploader, RemoteAsset, UploadError};

fn write_image(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}

async fn stored(uploader: &ObjectStoreUploader, key: &str) -> (Vec<u8>, String) {
    let result = uploader
        .store()
        .get(&ObjectPath::parse(key).unwrap())
        .await
        .expect("object should exist");
    let content_type = result
        .attributes
        .get(&Attribute::ContentType)
        .map(|value| value.to_string())
        .unwrap_or_default();
    let bytes = result.bytes().await.unwrap().to_vec();
    (bytes, content_type)
}

#[tokio::test]
async fn uploads_main_image_and_returns_s3_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_image(&dir, "cover.webp", b"RIFF-webp");
    let uploader = ObjectStoreUploader::in_memory(StoreConfig::default());

    let asset =
        RemoteAsset::for_image("hike42", AttachmentKind::Main, &path, "image/webp").unwrap();
    let url = uploader.upload(&asset).await.unwrap();

    assert_eq!(
        url,
        "https://hikes-trailfinder-website-images.s3.us-east-1.amazonaws.com/hike42/main.webp"
    );
    let (bytes, content_type) = stored(&uploader, "hike42/main.webp").await;
    assert_eq!(bytes, b"RIFF-webp");
    assert_eq!(content_type, "image/webp");
}

#[tokio::test]
async fn sub_image_key_uses_sequence_number_and_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_image(&dir, "ridge.PNG", b"png-bytes");
    let uploader = ObjectStoreUploader::in_memory(StoreConfig {
        public_base_url: "https://cdn.example.org/".into(),
        ..StoreConfig::default()
    });

    let asset = RemoteAsset::for_image(
        "trip-7",
        AttachmentKind::SubImage { seq: 3 },
        &path,
        "image/webp",
    )
    .unwrap();
    assert_eq!(asset.remote_key, "trip-7/subImages/image3.png");

    let url = uploader.upload(&asset).await.unwrap();
    assert_eq!(url, "https://cdn.example.org/trip-7/subImages/image3.png");
    let (_, content_type) = stored(&uploader, "trip-7/subImages/image3.png").await;
    assert_eq!(content_type, "image/png");
}

#[tokio::test]
async fn reupload_overwrites_the_same_key() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_image(&dir, "a.webp", b"first");
    let second = write_image(&dir, "b.webp", b"second");
    let uploader = ObjectStoreUploader::in_memory(StoreConfig::default());

    for path in [&first, &second] {
        let asset =
            RemoteAsset::for_image("hike42", AttachmentKind::Main, path, "image/webp").unwrap();
        uploader.upload(&asset).await.unwrap();
    }

    let (bytes, _) = stored(&uploader, "hike42/main.webp").await;
    assert_eq!(bytes, b"second");
}

#[tokio::test]
async fn missing_local_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let uploader = ObjectStoreUploader::in_memory(StoreConfig::default());
    let asset = RemoteAsset::for_image(
        "hike42",
        AttachmentKind::Main,
        &dir.path().join("gone.webp"),
        "image/webp",
    )
    .unwrap();

    let err = uploader.upload(&asset).await.unwrap_err();
    assert!(matches!(err, UploadError::Read { .. }), "got {err:?}");
    assert!(err.to_string().contains("gone.webp"));
}

#[tokio::test]
async fn malformed_key_is_rejected_before_transfer() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_image(&dir, "a.webp", b"x");
    let uploader = ObjectStoreUploader::in_memory(StoreConfig::default());
    let asset = RemoteAsset {
        local_path: path,
        remote_key: "hike42//main.webp".into(),
        content_type: "image/webp".into(),
    };

    let err = uploader.upload(&asset).await.unwrap_err();
    assert!(matches!(err, UploadError::InvalidKey { .. }), "got {err:?}");
}

#[test]
fn blank_unique_id_cannot_derive_a_key() {
    let err = RemoteAsset::for_image(
        "",
        AttachmentKind::Main,
        std::path::Path::new("a.webp"),
        "image/webp",
    )
    .unwrap_err();
    assert!(matches!(err, UploadError::InvalidKey { .. }));
}

#[test]
fn s3_uploader_builds_from_default_config() {
    let uploader = ObjectStoreUploader::from_config(&StoreConfig {
        access_key_id: "key".into(),
        secret_access_key: "secret".into(),
        ..StoreConfig::default()
    })
    .expect("client should build without network access");
    assert_eq!(uploader.config().region, "us-east-1");
}
