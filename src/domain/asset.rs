//! Downloaded asset: a local video file and its optional thumbnail.

use std::path::PathBuf;

/// A video fetched into the working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedAsset {
    /// Original title from the link file
    pub title: String,

    /// Local MP4 path
    pub video_path: PathBuf,

    /// Local JPG path, when a thumbnail could be obtained
    pub thumbnail_path: Option<PathBuf>,
}
