//! Reader-side helpers for the novels section.
//!
//! Two small collaborators of the page-assembly core: a file-backed store
//! for reading-progress bookmarks, and a client for the mailing-list
//! subscription endpoint.

pub mod bookmarks;
pub mod subscribe;

pub use bookmarks::{BookmarkStore, NovelProgress};
pub use subscribe::{validate_email, SubscriptionClient};

/// Errors raised by the reader helpers.
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("failed to read bookmarks from {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write bookmarks to {path}: {source}")]
    Store {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("bookmark file {path} is not valid JSON: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("not a valid email address")]
    InvalidEmail,

    #[error("subscription request failed: {0}")]
    Subscription(#[from] reqwest::Error),
}
