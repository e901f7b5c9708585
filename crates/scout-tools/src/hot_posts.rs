//! Hot post tools for the Reddit scout
//!
//! Thin [`AiTool`] wrappers over the live and mock fetchers. Both always
//! answer with a single-key JSON object, even when the fetch failed.

use crate::base::AiTool;
use crate::reddit::{ContentFetcher, MockContentFetcher};
use anyhow::{Error, anyhow};
use async_trait::async_trait;
use scout_common::DEFAULT_SUBREDDIT;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

#[derive(Deserialize)]
struct HotPostsParams {
    subreddit: Option<String>,
    limit: Option<usize>,
}

fn parse_params(params: Value) -> Result<(String, Option<usize>), Error> {
    let params: HotPostsParams = serde_json::from_value(params)
        .map_err(|e| anyhow!("Invalid parameters: {}", e))?;
    let subreddit = params
        .subreddit
        .map(|s| s.trim().trim_start_matches("r/").to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SUBREDDIT.to_string());
    Ok((subreddit, params.limit))
}

fn validate_object(params: &Value) -> Result<(), Error> {
    if !params.is_object() {
        return Err(anyhow!("Parameters must be an object"));
    }
    if let Some(subreddit) = params.get("subreddit") {
        if !subreddit.is_string() {
            return Err(anyhow!("'subreddit' must be a string"));
        }
    }
    Ok(())
}

/// Fetches hot post titles from the Reddit API
pub struct RedditHotPostsTool {
    pub fetcher: Arc<ContentFetcher>,
}

#[async_trait]
impl AiTool for RedditHotPostsTool {
    fn name(&self) -> &str {
        "get_reddit_hot_posts"
    }

    fn description(&self) -> &str {
        r#"Fetches the titles of the current hot posts in a subreddit using the Reddit API.
Parameters:
- `subreddit`: The subreddit to read, without the r/ prefix (default: "gamedev").
- `limit`: Maximum number of posts to fetch (default: 5).

Returns an object with the subreddit as its only key. If credentials are missing,
the subreddit is private, banned or non-existent, or the API fails, the list holds
a single message describing the problem; report that message directly."#
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "subreddit": {
                    "type": "string",
                    "description": "Subreddit name, e.g. 'gamedev', 'unity3d', 'unrealengine'"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of hot posts to fetch (default: 5)"
                }
            },
            "required": ["subreddit"]
        })
    }

    fn validate_params(&self, params: &Value) -> Result<(), Error> {
        validate_object(params)?;
        if let Some(limit) = params.get("limit") {
            if !limit.is_u64() {
                return Err(anyhow!("'limit' must be a non-negative integer"));
            }
        }
        Ok(())
    }

    async fn execute(&self, params: Value) -> Result<Value, Error> {
        self.validate_params(&params)?;
        let (subreddit, limit) = parse_params(params)?;
        debug!("Hot posts tool: r/{} limit {:?}", subreddit, limit);

        let result = self.fetcher.fetch(&subreddit, limit).await;
        Ok(result.to_json())
    }
}

/// Returns canned titles for a few game development subreddits
pub struct MockRedditPostsTool {
    pub fetcher: Arc<MockContentFetcher>,
}

#[async_trait]
impl AiTool for MockRedditPostsTool {
    fn name(&self) -> &str {
        "get_mock_reddit_posts"
    }

    fn description(&self) -> &str {
        "Simulates fetching hot post titles from a game development subreddit (gamedev, unity3d, unrealengine)."
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "subreddit": {
                    "type": "string",
                    "description": "Subreddit name"
                }
            },
            "required": ["subreddit"]
        })
    }

    fn validate_params(&self, params: &Value) -> Result<(), Error> {
        validate_object(params)
    }

    async fn execute(&self, params: Value) -> Result<Value, Error> {
        self.validate_params(&params)?;
        let (subreddit, _) = parse_params(params)?;
        Ok(self.fetcher.fetch_mock(&subreddit).to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reddit::MockCatalog;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use scout_common::ScoutConfig;
    use serde_json::json;

    fn mock_tool() -> MockRedditPostsTool {
        MockRedditPostsTool {
            fetcher: Arc::new(MockContentFetcher::with_rng(
                Arc::new(MockCatalog::builtin()),
                StdRng::seed_from_u64(9),
            )),
        }
    }

    #[test]
    fn test_tool_metadata() {
        let tool = mock_tool();
        assert_eq!(tool.name(), "get_mock_reddit_posts");
        let schema = tool.schema();
        assert_eq!(schema["type"], "object");
        assert!(schema["required"].as_array().unwrap().contains(&json!("subreddit")));
    }

    #[test]
    fn test_genai_declarations() {
        let mock = mock_tool().to_genai_tool();
        assert_eq!(mock.name, "get_mock_reddit_posts");
        assert_eq!(mock.schema, Some(mock_tool().schema()));
        assert!(mock.description.unwrap().contains("unity3d"));

        let live = RedditHotPostsTool {
            fetcher: Arc::new(ContentFetcher::live(&ScoutConfig::default()).unwrap()),
        }
        .to_genai_tool();
        assert_eq!(live.name, "get_reddit_hot_posts");
        let schema = live.schema.unwrap();
        assert_eq!(schema["properties"]["limit"]["type"], "integer");
        assert_eq!(schema["required"], json!(["subreddit"]));
    }

    #[tokio::test]
    async fn test_mock_tool_defaults_to_gamedev() {
        let tool = mock_tool();
        let result = tool.execute(json!({})).await.unwrap();
        let titles = result["gamedev"].as_array().unwrap();
        assert!((1..=3).contains(&titles.len()));
    }

    #[tokio::test]
    async fn test_mock_tool_strips_prefix() {
        let tool = mock_tool();
        let result = tool.execute(json!({"subreddit": "r/Unity3D"})).await.unwrap();
        assert!(result.get("Unity3D").is_some());
    }

    #[tokio::test]
    async fn test_parameter_validation() {
        let tool = mock_tool();
        assert!(tool.execute(json!("gamedev")).await.is_err());
        assert!(tool.execute(json!({"subreddit": 12})).await.is_err());
    }

    #[tokio::test]
    async fn test_hot_posts_tool_without_credentials() {
        let fetcher = ContentFetcher::live(&ScoutConfig::default()).unwrap();
        let tool = RedditHotPostsTool {
            fetcher: Arc::new(fetcher),
        };

        assert!(tool.execute(json!({"subreddit": "gamedev", "limit": -1})).await.is_err());

        let result = tool
            .execute(json!({"subreddit": "gamedev", "limit": 2}))
            .await
            .unwrap();
        assert_eq!(
            result,
            json!({"gamedev": ["Error: credentials not configured."]})
        );
    }
}
