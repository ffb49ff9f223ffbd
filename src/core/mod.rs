//! Pipeline stages and the orchestrator that chains them.
//!
//! Execution is strictly sequential: download, upload, publish, then
//! cleanup, short-circuiting on the first stage that fails.

pub mod cleanup;
pub mod downloader;
pub mod orchestrator;
pub mod publisher;
pub mod uploader;

pub use downloader::{DownloadOptions, Downloader};
pub use orchestrator::{Orchestrator, RunOptions};
pub use publisher::{PublishOptions, Publisher};
pub use uploader::{UploadOptions, Uploader};
