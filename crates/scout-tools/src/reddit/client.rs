//! Live Reddit client over the OAuth API
//!
//! Uses the application-only ("client credentials") grant, so no user
//! account is needed: client id, secret and a descriptive user agent.

use crate::reddit::source::{ContentConnector, ContentSource, SourceError};
use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use scout_common::{FetchConfig, ScoutError, ValidCredentials};
use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct SubredditNames {
    #[serde(default)]
    names: Vec<String>,
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Deserialize)]
struct ListingChild {
    data: PostData,
}

#[derive(Deserialize)]
struct PostData {
    title: String,
}

const SESSION_CLOSED: &str = "session closed";

/// Connects to Reddit by requesting an application-only access token.
///
/// Clones share one HTTP session; after [`RedditConnector::close`] no clone
/// (and no source it handed out) sends another request.
#[derive(Clone)]
pub struct RedditConnector {
    http: reqwest::Client,
    auth_url: String,
    api_base_url: String,
    closed: Arc<AtomicBool>,
}

impl RedditConnector {
    pub fn new(config: &FetchConfig) -> scout_common::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ScoutError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(http, config))
    }

    /// Reuse an existing HTTP client (and its connection pool)
    pub fn with_client(http: reqwest::Client, config: &FetchConfig) -> Self {
        Self {
            http,
            auth_url: config.auth_url.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Close the session for every clone of this connector
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentConnector for RedditConnector {
    async fn connect(
        &self,
        credentials: &ValidCredentials,
    ) -> Result<Box<dyn ContentSource>, SourceError> {
        if self.is_closed() {
            return Err(SourceError::Api(SESSION_CLOSED.to_string()));
        }
        debug!("Requesting Reddit access token from {}", self.auth_url);

        let resp = self
            .http
            .post(&self.auth_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .header(USER_AGENT, &credentials.user_agent)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| request_error("token request failed", e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Api(format!(
                "received {} from token endpoint",
                status
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| request_error("failed to read token response", e))?;
        let access_token = parse_token(&body)?;

        Ok(Box::new(RedditClient {
            http: self.http.clone(),
            api_base_url: self.api_base_url.clone(),
            access_token,
            user_agent: credentials.user_agent.clone(),
            closed: self.closed.clone(),
        }))
    }
}

/// An authenticated Reddit session
struct RedditClient {
    http: reqwest::Client,
    api_base_url: String,
    access_token: String,
    user_agent: String,
    closed: Arc<AtomicBool>,
}

impl RedditClient {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, SourceError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SourceError::Api(SESSION_CLOSED.to_string()));
        }
        let url = format!("{}{}", self.api_base_url, path);
        trace!("GET {} {:?}", url, query);

        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .header(USER_AGENT, &self.user_agent)
            .query(query)
            .send()
            .await
            .map_err(|e| request_error("request failed", e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Api(format!("received {} from {}", status, path)));
        }

        resp.text()
            .await
            .map_err(|e| request_error("failed to read response body", e))
    }
}

#[async_trait]
impl ContentSource for RedditClient {
    async fn resolve_channel(&self, name: &str) -> Result<(), SourceError> {
        let body = self
            .get(
                "/api/search_reddit_names",
                &[("query", name), ("exact", "true")],
            )
            .await?;

        if names_contain(&body, name)? {
            Ok(())
        } else {
            Err(SourceError::Api(format!("r/{} could not be resolved", name)))
        }
    }

    async fn hot_titles(&self, name: &str, limit: usize) -> Result<Vec<String>, SourceError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let limit_param = limit.to_string();
        let body = self
            .get(
                &format!("/r/{}/hot", name),
                &[("limit", limit_param.as_str()), ("raw_json", "1")],
            )
            .await?;
        parse_listing(&body, limit)
    }
}

/// Connection and HTTP-level failures are service faults; a body that
/// cannot be decoded is not.
fn request_error(context: &str, err: reqwest::Error) -> SourceError {
    if err.is_decode() {
        SourceError::Unexpected(anyhow!("{}: {}", context, err))
    } else {
        SourceError::Api(format!("{}: {}", context, err))
    }
}

fn parse_token(body: &str) -> Result<String, SourceError> {
    let token: TokenResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::Unexpected(anyhow!("invalid token response: {}", e)))?;

    match (token.access_token, token.error) {
        (_, Some(error)) => Err(SourceError::Api(format!("authentication failed: {}", error))),
        (Some(access_token), None) if !access_token.is_empty() => Ok(access_token),
        _ => Err(SourceError::Unexpected(anyhow!(
            "token response did not contain an access token"
        ))),
    }
}

fn names_contain(body: &str, name: &str) -> Result<bool, SourceError> {
    let names: SubredditNames = serde_json::from_str(body)
        .map_err(|e| SourceError::Unexpected(anyhow!("invalid subreddit search response: {}", e)))?;
    Ok(names.names.iter().any(|n| n.eq_ignore_ascii_case(name)))
}

fn parse_listing(body: &str, limit: usize) -> Result<Vec<String>, SourceError> {
    let listing: Listing = serde_json::from_str(body)
        .map_err(|e| SourceError::Unexpected(anyhow!("invalid listing response: {}", e)))?;
    Ok(listing
        .data
        .children
        .into_iter()
        .map(|child| child.data.title)
        .take(limit)
        .collect())
}
