//! Coordinator and the lifecycle manager that assembles it
//!
//! The coordinator only holds its three sub-agents. Which one handles a
//! request is decided by the caller; [`Coordinator::delegate`] forwards to
//! the sub-agent it is told to use and returns the result unmodified.

use crate::agents::{
    Agent, AgentConfig, AgentMessage, MessageResponse, ScoutFactory, SpeakerFactory,
    SummarizerFactory,
};
use crate::lifecycle::{AggregateScope, SubAgentFactory};
use anyhow::{Error, anyhow};
use scout_common::{ScoutConfig, ScoutError, agents::COORDINATOR};
use scout_tools::MockCatalog;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Composite delegation target over the scout, summarizer and speaker
pub struct Coordinator {
    config: AgentConfig,
    scout: Box<dyn Agent>,
    summarizer: Box<dyn Agent>,
    speaker: Box<dyn Agent>,
}

impl Coordinator {
    pub fn new(
        scout: Box<dyn Agent>,
        summarizer: Box<dyn Agent>,
        speaker: Box<dyn Agent>,
    ) -> Self {
        Self {
            config: AgentConfig::new(
                COORDINATOR,
                "Coordinator",
                "coordinator",
                "Coordinates finding Reddit posts, summarizing titles, and converting text to speech",
            ),
            scout,
            summarizer,
            speaker,
        }
    }

    pub fn agent_id(&self) -> &str {
        &self.config.agent_id
    }

    pub fn description(&self) -> &str {
        &self.config.description
    }

    /// Sub-agents in construction order
    pub fn sub_agents(&self) -> [&dyn Agent; 3] {
        [
            self.scout.as_ref(),
            self.summarizer.as_ref(),
            self.speaker.as_ref(),
        ]
    }

    pub fn sub_agent_mut(&mut self, agent_id: &str) -> Option<&mut Box<dyn Agent>> {
        [&mut self.scout, &mut self.summarizer, &mut self.speaker]
            .into_iter()
            .find(|agent| agent.agent_id() == agent_id)
    }

    /// Forward a message to the named sub-agent
    pub async fn delegate(
        &mut self,
        agent_id: &str,
        mut message: AgentMessage,
    ) -> Result<MessageResponse, Error> {
        let coordinator_id = self.config.agent_id.clone();
        let agent = self
            .sub_agent_mut(agent_id)
            .ok_or_else(|| anyhow!("No sub-agent named {}", agent_id))?;

        debug!("{} delegating message {} to {}", coordinator_id, message.message_id, agent_id);
        message.to_agent_id = agent_id.to_string();
        agent.process_message(message).await
    }
}

/// Builds the coordinator and owns the release of everything its sub-agents acquired
pub struct AgentLifecycleManager;

impl AgentLifecycleManager {
    /// Build the scout, summarizer and speaker in that order.
    ///
    /// Each sub-agent's resource is entered into the returned scope as soon as
    /// it exists. If a later step fails, everything entered so far is released,
    /// newest first, before the error is returned.
    pub async fn assemble(
        scout: &dyn SubAgentFactory,
        summarizer: &dyn SubAgentFactory,
        speaker: &dyn SubAgentFactory,
    ) -> Result<(Coordinator, AggregateScope), ScoutError> {
        let mut scope = AggregateScope::new();

        let scout = match Self::build(&mut scope, scout).await {
            Ok(agent) => agent,
            Err(e) => return Err(Self::unwind(scope, e).await),
        };
        let summarizer = match Self::build(&mut scope, summarizer).await {
            Ok(agent) => agent,
            Err(e) => return Err(Self::unwind(scope, e).await),
        };
        let speaker = match Self::build(&mut scope, speaker).await {
            Ok(agent) => agent,
            Err(e) => return Err(Self::unwind(scope, e).await),
        };

        info!("Coordinator ready with {} scoped resources", scope.len());
        Ok((Coordinator::new(scout, summarizer, speaker), scope))
    }

    /// Assemble with the stock factories
    pub async fn from_config(
        config: &ScoutConfig,
        mock: bool,
    ) -> Result<(Coordinator, AggregateScope), ScoutError> {
        let scout = if mock {
            ScoutFactory::mock(config, Arc::new(MockCatalog::builtin()))
        } else {
            ScoutFactory::live(config)
        };
        let speaker = SpeakerFactory::transcript(&config.speaker);
        Self::assemble(&scout, &SummarizerFactory, &speaker).await
    }

    async fn build(
        scope: &mut AggregateScope,
        factory: &dyn SubAgentFactory,
    ) -> Result<Box<dyn Agent>, ScoutError> {
        debug!("Building sub-agent {}", factory.agent_id());
        let handle = factory.create().await.map_err(|e| {
            ScoutError::Agent(format!("Failed to create {}: {}", factory.agent_id(), e))
        })?;
        scope.enter(handle.resource);
        Ok(handle.agent)
    }

    async fn unwind(scope: AggregateScope, err: ScoutError) -> ScoutError {
        error!("{}; releasing {} acquired resources", err, scope.len());
        if let Err(release_err) = scope.release().await {
            error!("Release after failed construction also failed: {}", release_err);
        }
        err
    }
}
