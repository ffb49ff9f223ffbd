//! Master orchestrator: runs every stage in order, aborting on the
//! first failure.
//!
//! Both service settings are resolved up front so a missing credential
//! fails the run before any bandwidth is spent on downloads. The
//! manifest stays on disk between the upload and publish stages, so a
//! failed publish can be retried with `vidpress publish` without
//! re-uploading.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::config::{StreamSettings, WordPressSettings};

use super::cleanup;
use super::downloader::{DownloadOptions, Downloader};
use super::publisher::{PublishOptions, Publisher};
use super::uploader::{UploadOptions, Uploader};

/// Options for a full pipeline run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Target WordPress site url
    pub site: String,

    /// Download stage flags, forwarded as-is
    pub download: DownloadOptions,

    /// Manifest path shared by the upload and publish stages
    pub manifest: PathBuf,

    /// Post status for created posts
    pub status: String,

    /// Iframe width
    pub width: u32,

    /// Iframe height
    pub height: u32,

    /// Keep the working directory and manifest afterwards
    pub keep: bool,
}

/// The master orchestrator
pub struct Orchestrator {
    options: RunOptions,
}

impl Orchestrator {
    /// Create an orchestrator for one full run
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Download, upload, publish, then clean up
    pub async fn run(&self) -> Result<()> {
        let stream = StreamSettings::from_env()?;
        let wordpress = WordPressSettings::from_env(&self.options.site)?;

        info!("Stage 1/4: download");
        let downloader = Downloader::new(self.options.download.clone());
        downloader.run().await?;

        info!("Stage 2/4: upload");
        let uploader = Uploader::new(
            &stream,
            UploadOptions {
                dir: self.options.download.dir.clone(),
                manifest: self.options.manifest.clone(),
            },
        );
        uploader.run().await?;

        info!("Stage 3/4: publish");
        let publisher = Publisher::new(
            &wordpress,
            PublishOptions {
                manifest: self.options.manifest.clone(),
                status: self.options.status.clone(),
                width: self.options.width,
                height: self.options.height,
            },
        );
        publisher.run().await?;

        if self.options.keep {
            info!("Keeping working files");
        } else {
            info!("Stage 4/4: cleanup");
            cleanup::clean(&self.options.download.dir, &self.options.manifest).await?;
        }

        info!("Pipeline completed");
        Ok(())
    }
}
