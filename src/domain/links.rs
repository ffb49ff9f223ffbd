//! Link list parsing.
//!
//! The input file carries one `url - title` pair per line:
//!
//! ```text
//! https://example.com/video123 - My Awesome Title
//! ```
//!
//! Blank lines and `#` comments are skipped. A line without the ` - `
//! separator is kept as a bare url whose title falls back to the url.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A parsed (url, title) pair from the input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Source video url
    pub url: String,

    /// User-supplied title; defaults to the url when absent
    pub title: String,
}

impl LinkRecord {
    /// Create a new link record
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    /// Read and parse a link file
    pub fn parse_file(path: &Path) -> Result<Vec<LinkRecord>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read link file: {}", path.display()))?;

        Ok(Self::parse_lines(&content))
    }

    /// Parse `url - title` lines into ordered records.
    ///
    /// Splits on the first ` - ` and trims both sides. Lines with no
    /// separator are logged and kept as bare urls rather than dropped,
    /// so a list of plain urls still flows through the pipeline.
    pub fn parse_lines(content: &str) -> Vec<LinkRecord> {
        content
            .lines()
            .filter_map(|line| {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    return None;
                }

                match line.split_once(" - ") {
                    Some((url, title)) => {
                        let url = url.trim();
                        let title = title.trim();
                        if title.is_empty() {
                            Some(LinkRecord::new(url, url))
                        } else {
                            Some(LinkRecord::new(url, title))
                        }
                    }
                    None => {
                        warn!(line, "No ` - ` separator, treating line as a bare url");
                        Some(LinkRecord::new(line, line))
                    }
                }
            })
            .collect()
    }
}
