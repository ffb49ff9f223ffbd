//! Upload stage: push downloaded files into the streaming library.
//!
//! Scans the working directory for MP4s in name order (the download
//! stage's `NNN_` stems keep that equal to input order), uploads each
//! with its thumbnail when one exists, and writes the manifest as the
//! stage's final side effect. A crash mid-run therefore loses that
//! run's manifest and requires a rerun.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::StreamClient;
use crate::config::StreamSettings;
use crate::domain::{Manifest, UploadRecord};

/// Options for the upload stage
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Directory with MP4/JPG pairs
    pub dir: PathBuf,

    /// Manifest file to write
    pub manifest: PathBuf,
}

/// The upload stage
pub struct Uploader<'a> {
    settings: &'a StreamSettings,
    options: UploadOptions,
}

impl<'a> Uploader<'a> {
    /// Create an uploader against the configured library
    pub fn new(settings: &'a StreamSettings, options: UploadOptions) -> Self {
        Self { settings, options }
    }

    /// Upload every video in order and write the manifest.
    /// Aborts on the first failure.
    pub async fn run(&self) -> Result<Manifest> {
        let videos = list_videos(&self.options.dir)?;
        if videos.is_empty() {
            anyhow::bail!(
                "No MP4 files in {}; run the download stage first",
                self.options.dir.display()
            );
        }

        let client = StreamClient::new(self.settings);
        let mut manifest = Manifest::new();

        for (index, video) in videos.iter().enumerate() {
            let record = self
                .upload_one(&client, video)
                .await
                .with_context(|| format!("Upload failed for {}", video.display()))?;

            info!(
                index = index + 1,
                total = videos.len(),
                title = %record.title,
                video_id = %record.video_id,
                "Uploaded"
            );
            manifest.push(record);
        }

        manifest.save(&self.options.manifest).await?;
        info!(
            entries = manifest.len(),
            manifest = %self.options.manifest.display(),
            "Manifest written"
        );

        Ok(manifest)
    }

    /// Create, upload and (optionally) thumbnail a single video
    async fn upload_one(&self, client: &StreamClient, video: &Path) -> Result<UploadRecord> {
        let title = title_from_stem(video);

        let video_id = client.create_video(&title).await?;
        client.upload_video(&video_id, video).await?;

        let thumbnail = video.with_extension("jpg");
        let thumbnail = if thumbnail.exists() {
            client.set_thumbnail(&video_id, &thumbnail).await?;
            Some(thumbnail)
        } else {
            None
        };

        let embed_url = client.embed_url(&video_id);

        Ok(UploadRecord {
            title,
            video_id,
            embed_url,
            thumbnail,
        })
    }
}

/// All MP4 files in the working directory, in name order
pub fn list_videos(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("*.mp4");
    let mut videos: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .context("Invalid working directory pattern")?
        .filter_map(|entry| entry.ok())
        .collect();

    videos.sort();
    Ok(videos)
}

/// Recover the display title from a `NNN_Sanitized_Title.mp4` path
pub fn title_from_stem(video: &Path) -> String {
    let stem = video.file_stem().unwrap_or_default().to_string_lossy();

    let title = match stem.split_once('_') {
        Some((_, rest)) => rest,
        None => stem.as_ref(),
    };

    title.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_title_from_stem() {
        assert_eq!(title_from_stem(Path::new("001_My_Title.mp4")), "My Title");
        assert_eq!(
            title_from_stem(Path::new("downloads/012_Part_1.mp4")),
            "Part 1"
        );
        // No index prefix: everything after the first underscore
        assert_eq!(title_from_stem(Path::new("just_a_name.mp4")), "a name");
        assert_eq!(title_from_stem(Path::new("plain.mp4")), "plain");
    }

    #[test]
    fn test_list_videos_sorted() {
        let temp = TempDir::new().unwrap();
        for name in ["002_B.mp4", "001_A.mp4", "003_C.mp4", "001_A.jpg", "notes.txt"] {
            std::fs::write(temp.path().join(name), b"x").unwrap();
        }

        let videos = list_videos(temp.path()).unwrap();
        let names: Vec<_> = videos
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["001_A.mp4", "002_B.mp4", "003_C.mp4"]);
    }

    #[test]
    fn test_list_videos_empty_dir() {
        let temp = TempDir::new().unwrap();
        assert!(list_videos(temp.path()).unwrap().is_empty());
    }
}
