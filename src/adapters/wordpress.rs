//! WordPress REST client for media upload and post creation.
//!
//! Authenticates with a username + application password over basic
//! auth against `/wp-json/wp/v2`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::WordPressSettings;

use super::excerpt;

/// Client for a single WordPress site
pub struct WordPressClient {
    site: String,
    user: String,
    app_password: String,
    client: reqwest::Client,
}

/// The only field we need back from media/post creation
#[derive(Debug, Deserialize)]
struct CreatedObject {
    id: u64,
}

impl WordPressClient {
    /// Create a new client for the configured site
    pub fn new(settings: &WordPressSettings) -> Self {
        Self {
            site: settings.site.clone(),
            user: settings.user.clone(),
            app_password: settings.app_password.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Build a `/wp-json/wp/v2` route url
    fn endpoint(&self, route: &str) -> String {
        format!("{}/wp-json/wp/v2/{}", self.site, route)
    }

    /// Upload a JPEG to the media library and return the attachment id
    pub async fn upload_media(&self, image: &Path) -> Result<u64> {
        let file_name = image
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let bytes = tokio::fs::read(image)
            .await
            .with_context(|| format!("Failed to read image: {}", image.display()))?;

        let response = self
            .client
            .post(self.endpoint("media"))
            .basic_auth(&self.user, Some(&self.app_password))
            .header(
                "Content-Disposition",
                format!("attachment; filename={}", file_name),
            )
            .header("Content-Type", "image/jpeg")
            .body(bytes)
            .send()
            .await
            .context("Failed to upload media to WordPress")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("media upload failed ({}): {}", status, excerpt(&body));
        }

        let created: CreatedObject = response
            .json()
            .await
            .context("Failed to parse media response")?;

        Ok(created.id)
    }

    /// Create a post and return its id.
    ///
    /// `featured_media` of 0 means no featured image.
    pub async fn create_post(
        &self,
        title: &str,
        content: &str,
        featured_media: u64,
        status: &str,
    ) -> Result<u64> {
        let response = self
            .client
            .post(self.endpoint("posts"))
            .basic_auth(&self.user, Some(&self.app_password))
            .json(&serde_json::json!({
                "title": title,
                "content": content,
                "featured_media": featured_media,
                "status": status,
            }))
            .send()
            .await
            .context("Failed to create WordPress post")?;

        let http_status = response.status();
        if !http_status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("create_post failed ({}): {}", http_status, excerpt(&body));
        }

        let created: CreatedObject = response
            .json()
            .await
            .context("Failed to parse post response")?;

        Ok(created.id)
    }
}

/// Block-editor markup embedding a hosted video
pub fn embed_markup(embed_url: &str, width: u32, height: u32) -> String {
    format!(
        "<figure class=\"wp-block-embed is-type-video is-provider-bunnystream\">\n  \
         <iframe src=\"{embed_url}\" loading=\"lazy\" allowfullscreen \
         width=\"{width}\" height=\"{height}\" frameborder=\"0\"></iframe>\n</figure>"
    )
}
