//! Upload manifest: the JSON handoff buffer between the uploader and
//! the publisher.
//!
//! Written once by the upload stage as its final side effect and read
//! once (read-only) by the publish stage. Entry order matches upload
//! order, which matches the input file's line order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// One successfully uploaded video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    /// Display title, recovered from the file stem
    pub title: String,

    /// Video identifier returned by the streaming library
    pub video_id: String,

    /// Public playback url for the uploaded video
    pub embed_url: String,

    /// Local thumbnail path, when one was uploaded alongside the video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<PathBuf>,
}

/// Ordered sequence of upload results, stored on disk as a JSON array
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<UploadRecord>,
}

impl Manifest {
    /// Create a new empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a manifest from disk
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.with_context(|| {
            format!(
                "Failed to read manifest {} (run the upload stage first)",
                path.display()
            )
        })?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest JSON: {}", path.display()))
    }

    /// Save the manifest to disk
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;

        Ok(())
    }

    /// Append an upload result
    pub fn push(&mut self, record: UploadRecord) {
        self.entries.push(record);
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the manifest is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, video_id: &str) -> UploadRecord {
        UploadRecord {
            title: title.to_string(),
            video_id: video_id.to_string(),
            embed_url: format!("https://iframe.mediadelivery.net/embed/7/{}", video_id),
            thumbnail: None,
        }
    }

    #[test]
    fn test_serializes_as_json_array() {
        let mut manifest = Manifest::new();
        manifest.push(record("Title A", "aaa"));

        let json = serde_json::to_string(&manifest).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"title\":\"Title A\""));
    }

    #[test]
    fn test_absent_thumbnail_is_omitted() {
        let mut manifest = Manifest::new();
        manifest.push(record("Title A", "aaa"));

        let json = serde_json::to_string(&manifest).unwrap();
        assert!(!json.contains("thumbnail"));
    }

    #[test]
    fn test_push_preserves_order() {
        let mut manifest = Manifest::new();
        manifest.push(record("Title A", "aaa"));
        manifest.push(record("Title B", "bbb"));

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.entries[0].title, "Title A");
        assert_eq!(manifest.entries[1].title, "Title B");
    }
}
