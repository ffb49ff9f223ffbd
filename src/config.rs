//! Environment-derived settings for the external services.
//!
//! Credentials come from environment variables (a `.env` file is loaded
//! at startup). Each stage builds its settings struct once, before any
//! network activity, and fails immediately when a required value is
//! missing:
//!
//! - `BUNNY_API_KEY`, `BUNNY_LIBRARY_ID`: streaming library credentials
//! - `BUNNY_BASE_URL`: optional API host override
//! - `WP_USER`, `WP_APP_PW`: WordPress application-password credentials
//! - `WP_SITE`: default for the `--site` flag

use anyhow::{Context, Result};

/// Default API host for the streaming library
pub const DEFAULT_STREAM_BASE: &str = "https://video.bunnycdn.com";

/// Credentials and endpoint for the Bunny Stream API
#[derive(Debug, Clone)]
pub struct StreamSettings {
    /// Library access key (`AccessKey` header)
    pub api_key: String,

    /// Numeric library id the videos are uploaded into
    pub library_id: u64,

    /// API base url, without a trailing slash
    pub base_url: String,
}

impl StreamSettings {
    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("BUNNY_API_KEY")
            .context("BUNNY_API_KEY environment variable required")?;

        let library_id = std::env::var("BUNNY_LIBRARY_ID")
            .context("BUNNY_LIBRARY_ID environment variable required")?
            .parse()
            .context("BUNNY_LIBRARY_ID must be a numeric library id")?;

        let base_url = std::env::var("BUNNY_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_STREAM_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key,
            library_id,
            base_url,
        })
    }
}

/// Credentials and target site for the WordPress REST API
#[derive(Debug, Clone)]
pub struct WordPressSettings {
    /// Base site url, without a trailing slash
    pub site: String,

    /// WordPress username
    pub user: String,

    /// Application password scoped to REST access
    pub app_password: String,
}

impl WordPressSettings {
    /// Create from environment variables; `site` comes from the
    /// `--site` flag (clap falls back to `WP_SITE`).
    pub fn from_env(site: &str) -> Result<Self> {
        let user =
            std::env::var("WP_USER").context("WP_USER environment variable required")?;

        let app_password =
            std::env::var("WP_APP_PW").context("WP_APP_PW environment variable required")?;

        Ok(Self {
            site: site.trim_end_matches('/').to_string(),
            user,
            app_password,
        })
    }
}
