/// File storage service tests
/// Tests directory setup, the upload allow-list, and file naming
use moon_server::{error::ServerError, services::FileStorage};
use std::collections::HashSet;
use tempfile::TempDir;

/// Test file storage initialization creates the media directory
#[tokio::test]
async fn test_file_storage_initialization() {
    let temp_dir = TempDir::new().unwrap();
    let storage_path = temp_dir.path().join("nested").join("media");

    let storage = FileStorage::new(storage_path.clone());
    storage.initialize().await.unwrap();

    assert!(storage_path.is_dir(), "Media directory should be created");

    // Initializing twice is harmless
    storage.initialize().await.unwrap();
}

/// Each accepted type lands under its mapped extension
#[tokio::test]
async fn test_store_accepted_types() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path().to_path_buf());
    storage.initialize().await.unwrap();

    for (content_type, extension) in [
        ("image/png", ".png"),
        ("image/jpeg", ".jpg"),
        ("audio/mpeg", ".mp3"),
        ("application/octet-stream", ".mp3"),
    ] {
        let stored = storage.store_upload(content_type, b"payload").await.unwrap();

        assert!(
            stored.filename.ends_with(extension),
            "{content_type} stored as {}",
            stored.filename
        );
        assert_eq!(stored.content_type, content_type);
        assert_eq!(stored.path, temp_dir.path().join(&stored.filename));
        assert_eq!(tokio::fs::read(&stored.path).await.unwrap(), b"payload");
    }
}

/// Anything off the allow-list is rejected and nothing is written
#[tokio::test]
async fn test_reject_unsupported_type() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path().to_path_buf());
    storage.initialize().await.unwrap();

    let result = storage.store_upload("text/plain", b"hello").await;

    match result {
        Err(ServerError::UnsupportedMediaType(msg)) => {
            assert!(msg.contains("text/plain"));
        }
        other => panic!("expected unsupported media type, got {other:?}"),
    }

    let mut entries = tokio::fs::read_dir(temp_dir.path()).await.unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
}

/// Content type matching ignores case
#[test]
fn test_extension_lookup_ignores_case() {
    assert_eq!(FileStorage::extension_for("IMAGE/PNG"), Some("png"));
    assert_eq!(FileStorage::extension_for("Audio/MPEG"), Some("mp3"));
    assert_eq!(FileStorage::extension_for("video/mp4"), None);
}

/// Repeated uploads of the same bytes never collide
#[tokio::test]
async fn test_filenames_are_unique() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path().to_path_buf());
    storage.initialize().await.unwrap();

    let mut names = HashSet::new();
    for _ in 0..20 {
        let stored = storage.store_upload("image/png", b"same").await.unwrap();
        assert!(names.insert(stored.filename));
    }
}
