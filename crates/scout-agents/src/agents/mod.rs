//! Agent module
//!
//! The core agent abstraction shared by the coordinator's sub-agents.

pub mod communication;
pub mod scout;
pub mod speaker;
pub mod summarizer;

pub use communication::{AgentMessage, MessageResponse, MessageType};
pub use scout::{RedditScoutAgent, ScoutFactory};
pub use speaker::{SpeakerAgent, SpeakerFactory, SpeechBackend, TranscriptBackend};
pub use summarizer::{SummarizerAgent, SummarizerFactory};

use anyhow::Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Core trait for agents in the Scout system
#[async_trait]
pub trait Agent: Send + Sync {
    /// Unique identifier for this agent
    fn agent_id(&self) -> &str;

    /// Human-readable name for this agent
    fn name(&self) -> &str;

    /// Role or type of this agent (e.g., "scout", "summarizer", "speaker")
    fn role(&self) -> &str;

    /// What this agent does, as shown to whoever routes requests to it
    fn description(&self) -> &str;

    /// Process an incoming message and generate a response
    async fn process_message(&mut self, message: AgentMessage) -> Result<MessageResponse, Error>;

    /// Get the list of available tools for this agent
    fn get_available_tools(&self) -> Vec<String>;

    /// Function-calling declarations for this agent's tools
    fn tool_declarations(&self) -> Vec<genai::chat::Tool> {
        Vec::new()
    }
}

/// Static description of an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Unique agent identifier
    pub agent_id: String,

    /// Human-readable name
    pub name: String,

    /// Agent role/type
    pub role: String,

    /// Short description of the agent's job
    pub description: String,
}

impl AgentConfig {
    pub fn new(
        agent_id: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            name: name.into(),
            role: role.into(),
            description: description.into(),
        }
    }
}
