//! Content service seams
//!
//! The fetcher depends only on these two traits: a connector that turns
//! credentials into an authenticated source, and the source's two
//! operations (resolve a channel by exact name, list its hot items).

use async_trait::async_trait;
use scout_common::ValidCredentials;
use thiserror::Error;

/// Failure reported while talking to the content service
#[derive(Debug, Error)]
pub enum SourceError {
    /// The service rejected or could not serve the request. Covers private,
    /// banned and nonexistent channels as well as transient faults; the
    /// service does not reliably tell these apart.
    #[error("{0}")]
    Api(String),
    /// Anything else, such as a response that could not be decoded
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// An authenticated view of the content service
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Succeeds only if a channel with exactly this name exists
    async fn resolve_channel(&self, name: &str) -> Result<(), SourceError>;

    /// Titles of up to `limit` hot items, in the service's own order
    async fn hot_titles(&self, name: &str, limit: usize) -> Result<Vec<String>, SourceError>;
}

/// Builds a [`ContentSource`] from credentials
#[async_trait]
pub trait ContentConnector: Send + Sync {
    async fn connect(
        &self,
        credentials: &ValidCredentials,
    ) -> Result<Box<dyn ContentSource>, SourceError>;
}
