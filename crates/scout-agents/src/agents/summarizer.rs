//! Summarizer sub-agent
//!
//! Produces a short extractive digest of a list of post titles. It accepts
//! either the scout's raw output as structured data or bulleted text.

use crate::agents::{Agent, AgentConfig, AgentMessage, MessageResponse};
use crate::lifecycle::{AgentHandle, SubAgentFactory};
use anyhow::Error;
use async_trait::async_trait;
use scout_common::agents::SUMMARIZER;
use serde_json::{Value, json};
use tracing::debug;

/// Number of titles quoted in a summary
const HIGHLIGHTS: usize = 3;

pub struct SummarizerAgent {
    config: AgentConfig,
}

impl Default for SummarizerAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl SummarizerAgent {
    pub fn new() -> Self {
        Self {
            config: AgentConfig::new(
                SUMMARIZER,
                "Summarizer",
                "summarizer",
                "Condenses a list of post titles into a short digest",
            ),
        }
    }

    /// Source label and titles from structured data, falling back to text lines
    fn extract(message: &AgentMessage) -> (Option<String>, Vec<String>) {
        if let Some(Value::Object(map)) = &message.data {
            if let Some((source, Value::Array(items))) = map.iter().next() {
                let titles = items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect();
                return (Some(source.clone()), titles);
            }
        }

        let mut source = None;
        let mut titles = Vec::new();
        for line in message.content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
                titles.push(item.trim().to_string());
            } else if let Some(name) = line.strip_prefix("r/").and_then(|l| l.strip_suffix(':')) {
                source = Some(name.to_string());
            } else {
                titles.push(line.to_string());
            }
        }
        (source, titles)
    }
}

/// Build the digest. A single entry is passed through, since it is usually
/// an informational message rather than a title.
pub fn summarize(source: Option<&str>, titles: &[String]) -> String {
    let origin = source
        .map(|s| format!("r/{}", s))
        .unwrap_or_else(|| "the list".to_string());

    match titles {
        [] => format!("Nothing to summarize from {}.", origin),
        [only] => format!("{}: {}", origin, only),
        _ => {
            let highlights: Vec<&str> = titles.iter().take(HIGHLIGHTS).map(String::as_str).collect();
            let rest = titles.len().saturating_sub(HIGHLIGHTS);
            let mut summary = format!(
                "{} hot posts from {}. Highlights: {}",
                titles.len(),
                origin,
                highlights.join("; ")
            );
            if rest > 0 {
                summary.push_str(&format!("; and {} more", rest));
            }
            summary.push('.');
            summary
        }
    }
}

#[async_trait]
impl Agent for SummarizerAgent {
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
        let (source, titles) = Self::extract(&message);
        debug!("Summarizing {} titles", titles.len());

        let summary = summarize(source.as_deref(), &titles);
        Ok(MessageResponse::success(
            message.message_id,
            summary.clone(),
            Some(json!({ "summary": summary })),
        ))
    }

    fn get_available_tools(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Builds the summarizer; nothing to acquire
pub struct SummarizerFactory;

#[async_trait]
impl SubAgentFactory for SummarizerFactory {
    fn agent_id(&self) -> &str {
        SUMMARIZER
    }

    async fn create(&self) -> Result<AgentHandle, Error> {
        Ok(AgentHandle::without_resource(Box::new(SummarizerAgent::new())))
    }
}
