//! Bunny Stream API client.
//!
//! Uploading is a two-step REST exchange: create a video placeholder in
//! the library, then PUT the raw file bytes to the same resource. A
//! thumbnail can be posted separately and is optional.
//!
//! Auth: `AccessKey` header carrying the library api key.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::StreamSettings;

use super::excerpt;

/// Embed host serving public playback pages
const EMBED_BASE: &str = "https://iframe.mediadelivery.net/embed";

/// Client for a single Bunny Stream library
pub struct StreamClient {
    api_key: String,
    library_id: u64,
    base_url: String,
    client: reqwest::Client,
}

/// Response from video creation
#[derive(Debug, Deserialize)]
struct CreatedVideo {
    /// Newer API responses carry `guid`
    guid: Option<String>,

    /// Older responses carry `videoId`
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

impl StreamClient {
    /// Create a new client for the configured library
    pub fn new(settings: &StreamSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            library_id: settings.library_id,
            base_url: settings.base_url.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Collection url for the library's videos
    fn videos_url(&self) -> String {
        format!("{}/library/{}/videos", self.base_url, self.library_id)
    }

    /// Resource url for a single video
    fn video_url(&self, video_id: &str) -> String {
        format!("{}/{}", self.videos_url(), video_id)
    }

    /// Public playback url for an uploaded video
    pub fn embed_url(&self, video_id: &str) -> String {
        format!("{}/{}/{}", EMBED_BASE, self.library_id, video_id)
    }

    /// Create a video placeholder and return its id
    pub async fn create_video(&self, title: &str) -> Result<String> {
        let response = self
            .client
            .post(self.videos_url())
            .header("AccessKey", &self.api_key)
            .header("Accept", "application/json")
            .json(&serde_json::json!({ "title": title }))
            .send()
            .await
            .context("Failed to reach the stream API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("create_video failed ({}): {}", status, excerpt(&body));
        }

        let created: CreatedVideo = response
            .json()
            .await
            .context("Failed to parse create_video response")?;

        created
            .guid
            .or(created.video_id)
            .context("create_video response carried no video id")
    }

    /// Push the file bytes into a previously created placeholder
    pub async fn upload_video(&self, video_id: &str, video: &Path) -> Result<()> {
        let bytes = tokio::fs::read(video)
            .await
            .with_context(|| format!("Failed to read video file: {}", video.display()))?;

        let response = self
            .client
            .put(self.video_url(video_id))
            .header("AccessKey", &self.api_key)
            .header("Content-Type", "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .context("Failed to upload video bytes")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("upload_video failed ({}): {}", status, excerpt(&body));
        }

        Ok(())
    }

    /// Attach a thumbnail image to an uploaded video
    pub async fn set_thumbnail(&self, video_id: &str, thumbnail: &Path) -> Result<()> {
        let bytes = tokio::fs::read(thumbnail)
            .await
            .with_context(|| format!("Failed to read thumbnail: {}", thumbnail.display()))?;

        let url = format!("{}/thumbnail", self.video_url(video_id));
        let response = self
            .client
            .post(&url)
            .header("AccessKey", &self.api_key)
            .header("Content-Type", "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .context("Failed to upload thumbnail bytes")?;

        let status = response.status();
        // 204 No Content is a normal thumbnail response
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("set_thumbnail failed ({}): {}", status, excerpt(&body));
        }

        Ok(())
    }
}
