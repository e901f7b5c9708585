//! Reddit scout sub-agent
//!
//! Fetches hot post titles for a subreddit through its single tool and
//! returns them as a bulleted list, with the raw tool output attached as
//! response data.

use crate::agents::{Agent, AgentConfig, AgentMessage, MessageResponse};
use crate::lifecycle::{AgentHandle, ScopedResource, SubAgentFactory};
use anyhow::{Error, anyhow};
use async_trait::async_trait;
use scout_common::{DEFAULT_SUBREDDIT, ScoutConfig, agents::REDDIT_SCOUT};
use scout_tools::{
    AiTool, ContentConnector, ContentFetcher, MockCatalog, MockContentFetcher, MockRedditPostsTool,
    RedditConnector, RedditHotPostsTool,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

pub struct RedditScoutAgent {
    config: AgentConfig,
    tools: HashMap<String, Box<dyn AiTool>>,
    tool_name: String,
}

impl RedditScoutAgent {
    pub fn new(tool: Box<dyn AiTool>) -> Self {
        let tool_name = tool.name().to_string();
        let mut tools = HashMap::new();
        tools.insert(tool_name.clone(), tool);

        Self {
            config: AgentConfig::new(
                REDDIT_SCOUT,
                "Reddit Scout",
                "scout",
                "Finds the current hot posts in a game development subreddit",
            ),
            tools,
            tool_name,
        }
    }

    /// Tool parameters from structured data, or the message text as a subreddit name
    fn tool_params(message: &AgentMessage) -> Value {
        if let Some(data) = message.data.as_ref().filter(|d| d.is_object()) {
            return data.clone();
        }
        let subreddit = message.content.trim();
        if subreddit.is_empty() {
            json!({ "subreddit": DEFAULT_SUBREDDIT })
        } else {
            json!({ "subreddit": subreddit })
        }
    }
}

/// Render a single-key fetch result as a bulleted list
fn format_titles(result: &Value) -> Option<String> {
    let (subreddit, items) = result.as_object()?.iter().next()?;
    let lines: Vec<String> = items
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(|title| format!("- {}", title))
        .collect();
    Some(format!("r/{}:\n{}", subreddit, lines.join("\n")))
}

#[async_trait]
impl Agent for RedditScoutAgent {
    fn agent_id(&self) -> &str {
        &self.config.agent_id
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn role(&self) -> &str {
        &self.config.role
    }

    fn description(&self) -> &str {
        &self.config.description
    }

    async fn process_message(&mut self, message: AgentMessage) -> Result<MessageResponse, Error> {
        let params = Self::tool_params(&message);
        debug!("Scout calling {} with {}", self.tool_name, params);

        let tool = self
            .tools
            .get(&self.tool_name)
            .ok_or_else(|| anyhow!("Tool '{}' not found", self.tool_name))?;

        match tool.execute(params).await {
            Ok(result) => {
                let content = format_titles(&result)
                    .ok_or_else(|| anyhow!("Tool {} returned an unexpected shape", self.tool_name))?;
                Ok(MessageResponse::success(message.message_id, content, Some(result)))
            }
            Err(e) => {
                info!("Tool {} failed: {}", self.tool_name, e);
                Ok(MessageResponse::error(
                    message.message_id,
                    format!("Error executing tool {}: {}", self.tool_name, e),
                ))
            }
        }
    }

    fn get_available_tools(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    fn tool_declarations(&self) -> Vec<genai::chat::Tool> {
        self.tools.values().map(|tool| tool.to_genai_tool()).collect()
    }
}

/// HTTP session shared with the scout's live connector; releasing it closes
/// the connector so the agent cannot reach Reddit afterwards
pub struct ScoutSession {
    connector: Option<RedditConnector>,
}

#[async_trait]
impl ScopedResource for ScoutSession {
    fn label(&self) -> &str {
        "reddit_scout_session"
    }

    async fn release(&mut self) -> Result<(), Error> {
        if let Some(connector) = self.connector.take() {
            connector.close();
            info!("Closed Reddit scout session");
        }
        Ok(())
    }
}

/// Builds the scout, live or backed by the mock catalog
pub struct ScoutFactory {
    config: ScoutConfig,
    catalog: Option<Arc<MockCatalog>>,
    connector: Option<Arc<dyn ContentConnector>>,
}

impl ScoutFactory {
    pub fn live(config: &ScoutConfig) -> Self {
        Self {
            config: config.clone(),
            catalog: None,
            connector: None,
        }
    }

    pub fn mock(config: &ScoutConfig, catalog: Arc<MockCatalog>) -> Self {
        Self {
            config: config.clone(),
            catalog: Some(catalog),
            connector: None,
        }
    }

    /// Live scout talking to a caller-supplied connector
    pub fn with_connector(
        config: &ScoutConfig,
        connector: Arc<dyn ContentConnector>,
    ) -> Self {
        Self {
            config: config.clone(),
            catalog: None,
            connector: Some(connector),
        }
    }
}

#[async_trait]
impl SubAgentFactory for ScoutFactory {
    fn agent_id(&self) -> &str {
        REDDIT_SCOUT
    }

    async fn create(&self) -> Result<AgentHandle, Error> {
        if let Some(catalog) = &self.catalog {
            info!("Creating Reddit scout with mock data");
            let tool = MockRedditPostsTool {
                fetcher: Arc::new(MockContentFetcher::new(catalog.clone())),
            };
            let agent = RedditScoutAgent::new(Box::new(tool));
            return Ok(AgentHandle::without_resource(Box::new(agent)));
        }

        let (fetcher, session) = match &self.connector {
            Some(connector) => (
                ContentFetcher::new(&self.config, connector.clone()),
                ScoutSession { connector: None },
            ),
            None => {
                let connector = RedditConnector::new(&self.config.fetch)?;
                let fetcher = ContentFetcher::new(&self.config, Arc::new(connector.clone()));
                (
                    fetcher,
                    ScoutSession {
                        connector: Some(connector),
                    },
                )
            }
        };

        if !fetcher.has_credentials() {
            info!("Reddit credentials missing, scout will report an error on every fetch");
        }
        info!("Created Reddit scout");

        let tool = RedditHotPostsTool {
            fetcher: Arc::new(fetcher),
        };
        let agent = RedditScoutAgent::new(Box::new(tool));
        Ok(AgentHandle::new(Box::new(agent), Box::new(session)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_common::{FetchConfig, RedditCredentials, ValidCredentials};
    use scout_tools::{ContentSource, SourceError};
    use std::time::Duration;
    use tokio::net::TcpListener;

    struct StaticSource(Vec<String>);

    #[async_trait]
    impl ContentSource for StaticSource {
        async fn resolve_channel(&self, _name: &str) -> Result<(), SourceError> {
            Ok(())
        }

        async fn hot_titles(&self, _name: &str, limit: usize) -> Result<Vec<String>, SourceError> {
            Ok(self.0.iter().take(limit).cloned().collect())
        }
    }

    struct StaticConnector(Vec<String>);

    #[async_trait]
    impl ContentConnector for StaticConnector {
        async fn connect(
            &self,
            _credentials: &ValidCredentials,
        ) -> Result<Box<dyn ContentSource>, SourceError> {
            Ok(Box::new(StaticSource(self.0.clone())))
        }
    }

    fn chat(content: &str) -> AgentMessage {
        AgentMessage::new_chat("user".to_string(), REDDIT_SCOUT.to_string(), content.to_string())
    }

    #[tokio::test]
    async fn test_live_scout_lists_titles() {
        let config = ScoutConfig {
            reddit: RedditCredentials::new("id", "secret", "scout-tests/0.1"),
            ..ScoutConfig::default()
        };
        let titles = vec!["Shader tips".to_string(), "Jam results".to_string()];
        let factory = ScoutFactory::with_connector(&config, Arc::new(StaticConnector(titles)));

        let mut handle = factory.create().await.unwrap();
        let response = handle.agent.process_message(chat("r/gamedev")).await.unwrap();

        assert!(response.success);
        assert_eq!(response.content, "r/gamedev:\n- Shader tips\n- Jam results");
        assert_eq!(
            response.data,
            Some(json!({"gamedev": ["Shader tips", "Jam results"]}))
        );
        handle.resource.release().await.unwrap();
    }

    #[tokio::test]
    async fn test_structured_request_passes_limit() {
        let config = ScoutConfig {
            reddit: RedditCredentials::new("id", "secret", "scout-tests/0.1"),
            ..ScoutConfig::default()
        };
        let titles = (1..=9).map(|i| format!("post {}", i)).collect();
        let factory = ScoutFactory::with_connector(&config, Arc::new(StaticConnector(titles)));
        let mut handle = factory.create().await.unwrap();

        let message = AgentMessage::new_task_request(
            "coordinator".to_string(),
            REDDIT_SCOUT.to_string(),
            String::new(),
            Some(json!({"subreddit": "unity3d", "limit": 2})),
        );
        let response = handle.agent.process_message(message).await.unwrap();

        assert_eq!(response.data, Some(json!({"unity3d": ["post 1", "post 2"]})));
    }

    #[tokio::test]
    async fn test_scout_without_credentials_reports_error_message() {
        let factory = ScoutFactory::live(&ScoutConfig::default());
        let mut handle = factory.create().await.unwrap();
        assert_eq!(handle.resource.label(), "reddit_scout_session");

        let response = handle.agent.process_message(chat("")).await.unwrap();

        assert!(response.success);
        assert_eq!(
            response.data,
            Some(json!({"gamedev": ["Error: credentials not configured."]}))
        );
        handle.resource.release().await.unwrap();
    }

    #[tokio::test]
    async fn test_mock_scout() {
        let factory = ScoutFactory::mock(&ScoutConfig::default(), Arc::new(MockCatalog::builtin()));
        let mut handle = factory.create().await.unwrap();
        assert_eq!(handle.agent.get_available_tools(), vec!["get_mock_reddit_posts"]);

        let declarations = handle.agent.tool_declarations();
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].name, "get_mock_reddit_posts");

        let response = handle.agent.process_message(chat("unrealengine")).await.unwrap();

        assert!(response.content.starts_with("r/unrealengine:\n- "));
        let data = response.data.unwrap();
        let titles = data["unrealengine"].as_array().unwrap();
        assert_eq!(titles.len(), 3);
    }

    #[tokio::test]
    async fn test_released_session_stops_network_access() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let config = ScoutConfig {
            reddit: RedditCredentials::new("id", "secret", "scout-tests/0.1"),
            fetch: FetchConfig {
                auth_url: format!("{}/token", base),
                api_base_url: base,
                ..FetchConfig::default()
            },
            ..ScoutConfig::default()
        };
        let mut handle = ScoutFactory::live(&config).create().await.unwrap();

        handle.resource.release().await.unwrap();
        let response = handle.agent.process_message(chat("gamedev")).await.unwrap();

        let data = response.data.unwrap();
        let message = data["gamedev"][0].as_str().unwrap();
        assert!(message.ends_with("Details: session closed"));
        let accepted = tokio::time::timeout(Duration::from_millis(200), listener.accept()).await;
        assert!(accepted.is_err(), "released session opened a connection");
    }
}
