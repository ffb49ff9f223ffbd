//! REST clients for the external services.
//!
//! Both services are opaque collaborators: the streaming library that
//! hosts the uploaded videos and the WordPress site the posts land on.

pub mod stream;
pub mod wordpress;

pub use stream::StreamClient;
pub use wordpress::WordPressClient;

/// First 200 bytes of an API error body, for diagnostics
pub(crate) fn excerpt(body: &str) -> &str {
    body.get(..200).unwrap_or(body)
}
