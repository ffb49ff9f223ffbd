//! Manifest Integration Tests
//!
//! The manifest is the handoff buffer between the upload and publish
//! stages: a re-read must reproduce the same ordered sequence with no
//! loss of fields.

use std::path::PathBuf;

use tempfile::TempDir;
use vidpress::{Manifest, UploadRecord};

fn sample_manifest() -> Manifest {
    let mut manifest = Manifest::new();
    manifest.push(UploadRecord {
        title: "Title A".to_string(),
        video_id: "aaa-111".to_string(),
        embed_url: "https://iframe.mediadelivery.net/embed/7/aaa-111".to_string(),
        thumbnail: Some(PathBuf::from("downloads/001_Title_A.jpg")),
    });
    manifest.push(UploadRecord {
        title: "Title B".to_string(),
        video_id: "bbb-222".to_string(),
        embed_url: "https://iframe.mediadelivery.net/embed/7/bbb-222".to_string(),
        thumbnail: None,
    });
    manifest
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("manifest.json");

    let manifest = sample_manifest();
    manifest.save(&path).await.unwrap();

    let loaded = Manifest::load(&path).await.unwrap();
    assert_eq!(loaded.entries, manifest.entries);
}

#[tokio::test]
async fn test_on_disk_format_is_a_json_array() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("manifest.json");

    sample_manifest().save(&path).await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let entries = value.as_array().expect("manifest is a JSON array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["title"], "Title A");
    assert_eq!(entries[0]["embed_url"].as_str().unwrap(), "https://iframe.mediadelivery.net/embed/7/aaa-111");
    // Entry order matches upload order
    assert_eq!(entries[1]["title"], "Title B");
    // Absent thumbnail stays absent rather than null
    assert!(entries[1].get("thumbnail").is_none());
}

#[tokio::test]
async fn test_load_missing_manifest_is_an_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("manifest.json");

    let err = Manifest::load(&missing).await.unwrap_err();
    assert!(err.to_string().contains("run the upload stage first"));
}
