//! Scout Tools - Reddit content tools
//!
//! This crate provides the live and mock Reddit fetchers and the
//! tool wrappers that expose them to agents.

pub mod base;
pub mod hot_posts;
pub mod reddit;

// Re-export key tools for convenience
pub use base::AiTool;
pub use hot_posts::{MockRedditPostsTool, RedditHotPostsTool};
pub use reddit::{
    ContentConnector, ContentFetcher, ContentSource, FetchResult, MockCatalog,
    MockContentFetcher, RedditConnector, SourceError,
};
