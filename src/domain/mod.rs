//! Data records flowing through the pipeline.
//!
//! - `links`: (url, title) pairs parsed from the input file
//! - `asset`: downloaded video/thumbnail pairs in the working directory
//! - `manifest`: upload results persisted between the upload and
//!   publish stages

pub mod asset;
pub mod links;
pub mod manifest;

pub use asset::DownloadedAsset;
pub use links::LinkRecord;
pub use manifest::{Manifest, UploadRecord};
