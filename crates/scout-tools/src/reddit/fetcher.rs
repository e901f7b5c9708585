//! Live hot-post fetcher
//!
//! Every path, including missing credentials and service failures, ends in
//! a [`FetchResult`] keyed by the requested subreddit.

use crate::reddit::FetchResult;
use crate::reddit::client::RedditConnector;
use crate::reddit::source::{ContentConnector, SourceError};
use scout_common::{RedditCredentials, ScoutConfig, ValidCredentials};
use std::sync::Arc;
use tracing::{error, info, warn};

const CREDENTIALS_MISSING: &str = "Error: credentials not configured.";

fn no_recent_posts(category: &str) -> String {
    format!("No recent hot posts found in r/{}.", category)
}

fn api_error(category: &str, detail: &str) -> String {
    format!(
        "Error accessing r/{}. It might be private, banned, or non-existent. Details: {}",
        category, detail
    )
}

fn unexpected_error(category: &str) -> String {
    format!(
        "An unexpected error occurred while fetching from r/{}.",
        category
    )
}

/// Fetches hot post titles from a subreddit, gated on API credentials
pub struct ContentFetcher {
    credentials: RedditCredentials,
    connector: Arc<dyn ContentConnector>,
    default_limit: usize,
}

impl ContentFetcher {
    pub fn new(config: &ScoutConfig, connector: Arc<dyn ContentConnector>) -> Self {
        Self {
            credentials: config.reddit.clone(),
            connector,
            default_limit: config.fetch.default_limit,
        }
    }

    /// A fetcher backed by the real Reddit API
    pub fn live(config: &ScoutConfig) -> scout_common::Result<Self> {
        let connector = RedditConnector::new(&config.fetch)?;
        Ok(Self::new(config, Arc::new(connector)))
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_configured()
    }

    /// Fetch up to `limit` hot titles (the configured default when `None`)
    pub async fn fetch(&self, category: &str, limit: Option<usize>) -> FetchResult {
        info!("Fetching hot posts from r/{} via Reddit API", category);

        let Some(credentials) = self.credentials.validate() else {
            warn!("Reddit API credentials are not configured");
            return FetchResult::message(category, CREDENTIALS_MISSING);
        };

        let limit = limit.unwrap_or(self.default_limit);
        match self.fetch_titles(&credentials, category, limit).await {
            Ok(titles) if titles.is_empty() => {
                info!("r/{} returned no hot posts", category);
                FetchResult::message(category, no_recent_posts(category))
            }
            Ok(titles) => {
                info!("Fetched {} titles from r/{}", titles.len(), category);
                FetchResult::new(category, titles)
            }
            Err(SourceError::Api(detail)) => {
                error!("Reddit API error for r/{}: {}", category, detail);
                FetchResult::message(category, api_error(category, &detail))
            }
            Err(SourceError::Unexpected(e)) => {
                error!("Unexpected error for r/{}: {:#}", category, e);
                FetchResult::message(category, unexpected_error(category))
            }
        }
    }

    async fn fetch_titles(
        &self,
        credentials: &ValidCredentials,
        category: &str,
        limit: usize,
    ) -> Result<Vec<String>, SourceError> {
        let source = self.connector.connect(credentials).await?;
        source.resolve_channel(category).await?;
        source.hot_titles(category, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reddit::source::ContentSource;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone)]
    enum Behavior {
        Titles(Vec<String>),
        Unresolvable,
        ListingFault(String),
        Garbled,
    }

    #[derive(Default)]
    struct Calls {
        connects: AtomicUsize,
        resolves: AtomicUsize,
        listings: AtomicUsize,
        limits: Mutex<Vec<usize>>,
    }

    struct FakeConnector {
        behavior: Behavior,
        calls: Arc<Calls>,
    }

    struct FakeSource {
        behavior: Behavior,
        calls: Arc<Calls>,
    }

    #[async_trait]
    impl ContentConnector for FakeConnector {
        async fn connect(
            &self,
            _credentials: &ValidCredentials,
        ) -> Result<Box<dyn ContentSource>, SourceError> {
            self.calls.connects.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FakeSource {
                behavior: self.behavior.clone(),
                calls: self.calls.clone(),
            }))
        }
    }

    #[async_trait]
    impl ContentSource for FakeSource {
        async fn resolve_channel(&self, name: &str) -> Result<(), SourceError> {
            self.calls.resolves.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Unresolvable => {
                    Err(SourceError::Api(format!("received 404 Not Found for {}", name)))
                }
                _ => Ok(()),
            }
        }

        async fn hot_titles(&self, _name: &str, limit: usize) -> Result<Vec<String>, SourceError> {
            self.calls.listings.fetch_add(1, Ordering::SeqCst);
            self.calls.limits.lock().unwrap().push(limit);
            match &self.behavior {
                Behavior::Titles(titles) => Ok(titles.iter().take(limit).cloned().collect()),
                Behavior::ListingFault(detail) => Err(SourceError::Api(detail.clone())),
                Behavior::Garbled => Err(SourceError::Unexpected(anyhow!("secret decode detail"))),
                Behavior::Unresolvable => unreachable!("listing after failed resolve"),
            }
        }
    }

    fn configured() -> ScoutConfig {
        ScoutConfig {
            reddit: RedditCredentials::new("id", "secret", "scout-tests/0.1"),
            ..ScoutConfig::default()
        }
    }

    fn fetcher(config: &ScoutConfig, behavior: Behavior) -> (ContentFetcher, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        let connector = FakeConnector {
            behavior,
            calls: calls.clone(),
        };
        (ContentFetcher::new(config, Arc::new(connector)), calls)
    }

    fn titles(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_returns_titles_in_service_order() {
        let listing = titles(&["Zeta engine", "Alpha release", "Zeta engine"]);
        let (fetcher, calls) = fetcher(&configured(), Behavior::Titles(listing.clone()));

        let result = fetcher.fetch("gamedev", Some(5)).await;

        assert_eq!(result.category(), "gamedev");
        assert_eq!(result.items(), listing.as_slice());
        assert_eq!(calls.resolves.load(Ordering::SeqCst), 1);
        assert_eq!(*calls.limits.lock().unwrap(), vec![5]);
    }

    #[tokio::test]
    async fn test_default_limit_is_used() {
        let listing = titles(&["a", "b", "c", "d", "e", "f", "g"]);
        let (fetcher, calls) = fetcher(&configured(), Behavior::Titles(listing));

        let result = fetcher.fetch("gamedev", None).await;

        assert_eq!(result.items().len(), 5);
        assert_eq!(*calls.limits.lock().unwrap(), vec![5]);
    }

    #[tokio::test]
    async fn test_missing_credentials_skip_the_service() {
        let partial = [
            RedditCredentials {
                client_id: None,
                ..RedditCredentials::new("id", "secret", "ua")
            },
            RedditCredentials {
                client_secret: None,
                ..RedditCredentials::new("id", "secret", "ua")
            },
            RedditCredentials {
                user_agent: Some(String::new()),
                ..RedditCredentials::new("id", "secret", "ua")
            },
        ];

        for creds in partial {
            let config = ScoutConfig {
                reddit: creds,
                ..ScoutConfig::default()
            };
            let (fetcher, calls) = fetcher(&config, Behavior::Titles(titles(&["never"])));

            let result = fetcher.fetch("unity3d", Some(3)).await;

            assert_eq!(
                result,
                FetchResult::message("unity3d", "Error: credentials not configured.")
            );
            assert_eq!(calls.connects.load(Ordering::SeqCst), 0);
            assert_eq!(calls.resolves.load(Ordering::SeqCst), 0);
            assert_eq!(calls.listings.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_empty_listing_is_reported() {
        let (fetcher, _) = fetcher(&configured(), Behavior::Titles(Vec::new()));

        let result = fetcher.fetch("c", Some(5)).await;

        assert_eq!(
            result,
            FetchResult::message("c", "No recent hot posts found in r/c.")
        );
    }

    #[tokio::test]
    async fn test_unresolvable_channel_uses_api_error_path() {
        let (fetcher, calls) = fetcher(&configured(), Behavior::Unresolvable);

        let result = fetcher.fetch("nope_not_real", Some(5)).await;

        assert_eq!(result.items().len(), 1);
        let message = &result.items()[0];
        assert!(message.contains("r/nope_not_real"));
        assert!(message.contains("Details: received 404 Not Found"));
        assert_eq!(calls.listings.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_api_error_embeds_category_and_cause() {
        let (fetcher, _) = fetcher(
            &configured(),
            Behavior::ListingFault("received 503 Service Unavailable".to_string()),
        );

        let result = fetcher.fetch("unrealengine", Some(5)).await;

        assert_eq!(result.category(), "unrealengine");
        assert_eq!(
            result.items(),
            [api_error("unrealengine", "received 503 Service Unavailable")]
        );
    }

    #[tokio::test]
    async fn test_unexpected_error_hides_detail() {
        let (fetcher, _) = fetcher(&configured(), Behavior::Garbled);

        let result = fetcher.fetch("gamedev", Some(5)).await;

        assert_eq!(
            result.items(),
            ["An unexpected error occurred while fetching from r/gamedev.".to_string()]
        );
        assert!(!result.items()[0].contains("secret decode detail"));
    }
}
