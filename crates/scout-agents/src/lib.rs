//! Scout Agents - Coordinator and sub-agents
//!
//! This crate provides the agent trait, the three sub-agents (Reddit scout,
//! summarizer, speaker), the scoped resources they hold, and the lifecycle
//! manager that assembles them into a coordinator.

pub mod agents;
pub mod coordinator;
pub mod lifecycle;

// Re-export key types for convenience
pub use agents::{
    Agent, AgentConfig, AgentMessage, MessageResponse, RedditScoutAgent, ScoutFactory,
    SpeakerAgent, SpeakerFactory, SpeechBackend, SummarizerAgent, SummarizerFactory,
    TranscriptBackend,
};
pub use coordinator::{AgentLifecycleManager, Coordinator};
pub use lifecycle::{AgentHandle, AggregateScope, NoopResource, ScopedResource, SubAgentFactory};
