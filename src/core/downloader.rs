//! Video download stage.
//!
//! Shells out to `yt-dlp` for the fetch (mp4 container forced so every
//! source ends up in a format the streaming library accepts) and to
//! `ffprobe`/`ffmpeg` for a fallback thumbnail when the source exposes
//! none. Files already present in the working directory are not
//! re-fetched, so reruns are idempotent.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

use crate::domain::{DownloadedAsset, LinkRecord};

/// Errors from the external media tools
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with status {code}: {stderr}")]
    Exited {
        tool: String,
        code: i32,
        stderr: String,
    },
}

/// Options for the download stage
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Input list file (`url - title` per line)
    pub src: PathBuf,

    /// Working directory for videos and thumbnails
    pub dir: PathBuf,

    /// Cookie file for age-gated sites
    pub cookies: Option<PathBuf>,
}

/// The download stage
pub struct Downloader {
    options: DownloadOptions,

    /// yt-dlp binary (override via YT_DLP_PATH)
    yt_dlp: String,
}

impl Downloader {
    /// Create a downloader with the given options
    pub fn new(options: DownloadOptions) -> Self {
        let yt_dlp = std::env::var("YT_DLP_PATH").unwrap_or_else(|_| "yt-dlp".to_string());

        Self { options, yt_dlp }
    }

    /// File stem for a record: zero-padded position plus sanitized
    /// title, so directory order matches input order.
    pub fn stem_for(index: usize, title: &str) -> String {
        format!("{:03}_{}", index + 1, sanitize_title(title))
    }

    /// Fetch every listed video in order. Aborts on the first failure.
    pub async fn run(&self) -> Result<Vec<DownloadedAsset>> {
        let records = LinkRecord::parse_file(&self.options.src)?;
        if records.is_empty() {
            anyhow::bail!(
                "No url - title pairs found in {}",
                self.options.src.display()
            );
        }

        tokio::fs::create_dir_all(&self.options.dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to create working directory: {}",
                    self.options.dir.display()
                )
            })?;

        let mut assets = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let asset = self
                .fetch_one(index, record)
                .await
                .with_context(|| format!("Download failed for '{}'", record.title))?;
            assets.push(asset);
        }

        info!(count = assets.len(), "All downloads finished");
        Ok(assets)
    }

    /// Fetch a single record's video and thumbnail
    async fn fetch_one(&self, index: usize, record: &LinkRecord) -> Result<DownloadedAsset> {
        let stem = Self::stem_for(index, &record.title);
        let video_path = self.options.dir.join(format!("{stem}.mp4"));
        let thumbnail_path = self.options.dir.join(format!("{stem}.jpg"));

        if video_path.exists() {
            info!(%stem, "Already downloaded, skipping");
        } else {
            info!(%stem, url = %record.url, "Downloading");
            self.fetch_video(&record.url, &video_path).await?;
        }

        // yt-dlp writes the site thumbnail next to the video; fall back
        // to a frame grab when it produced none.
        if !thumbnail_path.exists() {
            if let Err(e) = self.grab_frame(&video_path, &thumbnail_path).await {
                warn!(%stem, error = %e, "No thumbnail available");
            }
        }

        let thumbnail_path = thumbnail_path.exists().then_some(thumbnail_path);

        Ok(DownloadedAsset {
            title: record.title.clone(),
            video_path,
            thumbnail_path,
        })
    }

    /// Run yt-dlp for one url
    async fn fetch_video(&self, url: &str, outfile: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.yt_dlp);
        cmd.arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-check-certificate")
            .arg("--write-thumbnail")
            .args(["--convert-thumbnails", "jpg"])
            .args(["--merge-output-format", "mp4"])
            .args(["--format", "bestvideo+bestaudio/best"])
            .arg("--output")
            .arg(outfile);

        if let Some(cookies) = &self.options.cookies {
            if cookies.exists() {
                cmd.arg("--cookies").arg(cookies);
            }
        }

        cmd.arg(url);

        run_tool(&self.yt_dlp, &mut cmd).await?;
        Ok(())
    }

    /// Fallback thumbnail: grab a single frame with ffmpeg
    async fn grab_frame(&self, video: &Path, thumbnail: &Path) -> Result<()> {
        let duration = self.probe_duration(video).await.unwrap_or(0.0);
        let offset = frame_offset(duration);

        let mut cmd = Command::new("ffmpeg");
        cmd.arg("-y")
            .args(["-ss", &format!("{offset:.1}")])
            .arg("-i")
            .arg(video)
            .args(["-frames:v", "1"])
            .arg(thumbnail);

        run_tool("ffmpeg", &mut cmd).await?;
        info!(offset, thumbnail = %thumbnail.display(), "Thumbnail generated");
        Ok(())
    }

    /// Ask ffprobe for the container duration in seconds
    async fn probe_duration(&self, video: &Path) -> Result<f64> {
        let mut cmd = Command::new("ffprobe");
        cmd.args(["-v", "error"])
            .args(["-show_entries", "format=duration"])
            .args(["-of", "csv=p=0"])
            .arg(video);

        let output = run_tool("ffprobe", &mut cmd).await?;

        String::from_utf8_lossy(&output.stdout)
            .trim()
            .parse()
            .context("ffprobe returned a non-numeric duration")
    }
}

/// Run an external tool to completion, capturing its output
async fn run_tool(tool: &str, cmd: &mut Command) -> Result<Output, ToolError> {
    let output = cmd.output().await.map_err(|source| ToolError::Spawn {
        tool: tool.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(ToolError::Exited {
            tool: tool.to_string(),
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}

/// Filesystem-safe rendition of a title: keep word characters, dashes,
/// dots, parentheses and spaces, then map spaces to underscores.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '(' | ')' | ' '))
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

/// Seek offset for the fallback frame: a quarter into the video for
/// anything longer than ten seconds, never earlier than five seconds.
fn frame_offset(duration: f64) -> f64 {
    if duration > 10.0 {
        (duration / 4.0).max(5.0)
    } else {
        5.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("My Awesome Title"), "My_Awesome_Title");
        assert_eq!(sanitize_title("a/b\\c:d*e?f"), "abcdef");
        assert_eq!(sanitize_title("Keep-these_(ok).v2"), "Keep-these_(ok).v2");
        assert_eq!(sanitize_title("  padded  "), "padded");
    }

    #[test]
    fn test_stem_for_is_ordered_and_padded() {
        assert_eq!(Downloader::stem_for(0, "Title A"), "001_Title_A");
        assert_eq!(Downloader::stem_for(9, "Title J"), "010_Title_J");
        assert_eq!(Downloader::stem_for(99, "Last"), "100_Last");
    }

    #[test]
    fn test_frame_offset() {
        assert_eq!(frame_offset(0.0), 5.0);
        assert_eq!(frame_offset(8.0), 5.0);
        assert_eq!(frame_offset(12.0), 5.0);
        assert_eq!(frame_offset(100.0), 25.0);
    }
}
