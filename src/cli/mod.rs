//! Command-line interface for vidpress.
//!
//! Each pipeline stage is independently invocable; `run` chains them
//! all in one process and exits non-zero on the first stage failure.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::{StreamSettings, WordPressSettings};
use crate::core::{
    cleanup, DownloadOptions, Downloader, Orchestrator, PublishOptions, Publisher, RunOptions,
    UploadOptions, Uploader,
};

/// vidpress - batch video re-hosting and publishing pipeline
#[derive(Parser, Debug)]
#[command(name = "vidpress")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download every video listed in the link file
    Download {
        #[command(flatten)]
        download: DownloadArgs,
    },

    /// Upload downloaded files to the streaming library
    Upload {
        /// Directory with MP4/JPG pairs
        #[arg(short, long, default_value = "downloads")]
        dir: PathBuf,

        /// Manifest file to write
        #[arg(short, long, default_value = "manifest.json")]
        manifest: PathBuf,
    },

    /// Publish one post per manifest entry
    Publish {
        /// Base site url, e.g. https://example.com
        #[arg(long, env = "WP_SITE")]
        site: String,

        /// Manifest file written by the upload stage
        #[arg(short, long, default_value = "manifest.json")]
        manifest: PathBuf,

        #[command(flatten)]
        post: PostArgs,
    },

    /// Delete the working directory and the manifest
    Clean {
        /// Working directory to remove
        #[arg(short, long, default_value = "downloads")]
        dir: PathBuf,

        /// Manifest file to remove
        #[arg(short, long, default_value = "manifest.json")]
        manifest: PathBuf,
    },

    /// Run download, upload and publish in order, then clean up
    Run {
        /// Base site url, e.g. https://example.com
        #[arg(long, env = "WP_SITE")]
        site: String,

        #[command(flatten)]
        download: DownloadArgs,

        /// Manifest path shared by the upload and publish stages
        #[arg(short, long, default_value = "manifest.json")]
        manifest: PathBuf,

        #[command(flatten)]
        post: PostArgs,

        /// Keep the downloaded files and manifest afterwards
        #[arg(long)]
        keep: bool,
    },
}

/// Flags for the download stage (the orchestrator forwards these)
#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    /// Input list file, one `url - title` pair per line
    #[arg(long, default_value = "upload.txt")]
    pub src: PathBuf,

    /// Working directory for videos and thumbnails
    #[arg(short, long, default_value = "downloads")]
    pub dir: PathBuf,

    /// Cookie file for age-gated sites
    #[arg(long)]
    pub cookies: Option<PathBuf>,
}

impl From<DownloadArgs> for DownloadOptions {
    fn from(args: DownloadArgs) -> Self {
        Self {
            src: args.src,
            dir: args.dir,
            cookies: args.cookies,
        }
    }
}

/// Flags shaping the created posts
#[derive(Args, Debug, Clone)]
pub struct PostArgs {
    /// Post status: publish|draft|private
    #[arg(long, default_value = "publish")]
    pub status: String,

    /// Iframe width
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Iframe height
    #[arg(long, default_value_t = 360)]
    pub height: u32,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Download { download } => {
                let downloader = Downloader::new(download.into());
                downloader.run().await?;
                Ok(())
            }

            Commands::Upload { dir, manifest } => {
                let settings = StreamSettings::from_env()?;
                let uploader = Uploader::new(&settings, UploadOptions { dir, manifest });
                uploader.run().await?;
                Ok(())
            }

            Commands::Publish {
                site,
                manifest,
                post,
            } => {
                let settings = WordPressSettings::from_env(&site)?;
                let publisher = Publisher::new(
                    &settings,
                    PublishOptions {
                        manifest,
                        status: post.status,
                        width: post.width,
                        height: post.height,
                    },
                );
                publisher.run().await
            }

            Commands::Clean { dir, manifest } => cleanup::clean(&dir, &manifest).await,

            Commands::Run {
                site,
                download,
                manifest,
                post,
                keep,
            } => {
                let orchestrator = Orchestrator::new(RunOptions {
                    site,
                    download: download.into(),
                    manifest,
                    status: post.status,
                    width: post.width,
                    height: post.height,
                    keep,
                });
                orchestrator.run().await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_defaults() {
        let cli = Cli::try_parse_from(["vidpress", "download"]).unwrap();
        match cli.command {
            Commands::Download { download } => {
                assert_eq!(download.src, PathBuf::from("upload.txt"));
                assert_eq!(download.dir, PathBuf::from("downloads"));
                assert!(download.cookies.is_none());
            }
            _ => panic!("expected download command"),
        }
    }

    #[test]
    fn test_run_forwards_download_flags() {
        let cli = Cli::try_parse_from([
            "vidpress",
            "run",
            "--site",
            "https://example.com",
            "--src",
            "links.txt",
            "--dir",
            "work",
            "--keep",
        ])
        .unwrap();

        match cli.command {
            Commands::Run {
                site,
                download,
                keep,
                ..
            } => {
                assert_eq!(site, "https://example.com");
                assert_eq!(download.src, PathBuf::from("links.txt"));
                assert_eq!(download.dir, PathBuf::from("work"));
                assert!(keep);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_publish_requires_site() {
        std::env::remove_var("WP_SITE");
        assert!(Cli::try_parse_from(["vidpress", "publish"]).is_err());
    }
}
