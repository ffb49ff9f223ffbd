//! Publish stage: one WordPress post per manifest entry.
//!
//! For each entry the thumbnail (when present on disk) is pushed to the
//! media library first, then the post is created with the embed markup
//! and the attachment as featured image. There is no duplicate
//! detection; rerunning the stage creates duplicate posts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::adapters::wordpress::embed_markup;
use crate::adapters::WordPressClient;
use crate::config::WordPressSettings;
use crate::domain::{Manifest, UploadRecord};

/// Options for the publish stage
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Manifest file written by the upload stage
    pub manifest: PathBuf,

    /// Post status: publish|draft|private
    pub status: String,

    /// Iframe width
    pub width: u32,

    /// Iframe height
    pub height: u32,
}

/// The publish stage
pub struct Publisher<'a> {
    settings: &'a WordPressSettings,
    options: PublishOptions,
}

impl<'a> Publisher<'a> {
    /// Create a publisher against the configured site
    pub fn new(settings: &'a WordPressSettings, options: PublishOptions) -> Self {
        Self { settings, options }
    }

    /// Create one post per manifest entry, in manifest order.
    /// Aborts on the first failure.
    pub async fn run(&self) -> Result<()> {
        let manifest = Manifest::load(&self.options.manifest).await?;
        if manifest.is_empty() {
            anyhow::bail!(
                "Manifest {} has no entries",
                self.options.manifest.display()
            );
        }

        let client = WordPressClient::new(self.settings);

        for (index, record) in manifest.entries.iter().enumerate() {
            let post_id = self
                .publish_one(&client, record)
                .await
                .with_context(|| format!("Publish failed for '{}'", record.title))?;

            info!(
                index = index + 1,
                total = manifest.len(),
                title = %record.title,
                post_id,
                "Post created"
            );
        }

        Ok(())
    }

    /// Publish a single upload record
    async fn publish_one(&self, client: &WordPressClient, record: &UploadRecord) -> Result<u64> {
        let featured_media = match &record.thumbnail {
            Some(path) if path.exists() => client.upload_media(path).await?,
            Some(path) => {
                warn!(
                    thumbnail = %path.display(),
                    "Thumbnail missing on disk, posting without featured image"
                );
                0
            }
            None => 0,
        };

        let content = embed_markup(&record.embed_url, self.options.width, self.options.height);

        client
            .create_post(&record.title, &content, featured_media, &self.options.status)
            .await
    }
}
