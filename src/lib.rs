//! vidpress - batch video re-hosting and publishing pipeline
//!
//! Downloads videos listed in a text file, uploads them to a Bunny
//! Stream library, publishes one WordPress post per upload, then
//! removes the local working files.
//!
//! # Architecture
//!
//! Four sequential stages plus cleanup, composed by an orchestrator
//! that aborts on the first failure:
//! - link reading: `url - title` lines into ordered records
//! - download: yt-dlp into a working directory, idempotent on reruns
//! - upload: two-step REST upload, results written to a JSON manifest
//! - publish: one post per manifest entry via the WordPress REST API
//!
//! The manifest file is the only handoff between stages, so a failed
//! publish can be retried without re-uploading.
//!
//! # Modules
//!
//! - `adapters`: REST clients for the streaming library and WordPress
//! - `core`: the pipeline stages and the orchestrator
//! - `domain`: data records (LinkRecord, DownloadedAsset, UploadRecord)
//! - `config`: environment-derived settings
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Run the whole pipeline
//! vidpress run --site https://example.com
//!
//! # Or stage by stage
//! vidpress download --src upload.txt
//! vidpress upload
//! vidpress publish --site https://example.com
//! vidpress clean
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use crate::adapters::{StreamClient, WordPressClient};
pub use crate::config::{StreamSettings, WordPressSettings};
pub use crate::core::{Downloader, Orchestrator, Publisher, Uploader};
pub use crate::domain::{DownloadedAsset, LinkRecord, Manifest, UploadRecord};
