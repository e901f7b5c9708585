//! Scoped resources and the aggregate scope that releases them
//!
//! Every sub-agent comes with a [`ScopedResource`]. Synchronous sub-agents
//! use [`NoopResource`], so the aggregate never needs to special-case them.
//! Resources entered into an [`AggregateScope`] are released in reverse
//! order of entry, exactly once.

use crate::agents::Agent;
use anyhow::Error;
use async_trait::async_trait;
use scout_common::ScoutError;
use tracing::{debug, error, warn};

/// A resource acquired while building a sub-agent
#[async_trait]
pub trait ScopedResource: Send {
    /// Name used in log lines
    fn label(&self) -> &str;

    /// Release the resource. Called at most once by [`AggregateScope`].
    async fn release(&mut self) -> Result<(), Error>;
}

/// Resource of a sub-agent that acquired nothing
pub struct NoopResource {
    label: String,
}

impl NoopResource {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[async_trait]
impl ScopedResource for NoopResource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn release(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// A constructed sub-agent and the resource it holds
pub struct AgentHandle {
    pub agent: Box<dyn Agent>,
    pub resource: Box<dyn ScopedResource>,
}

impl AgentHandle {
    pub fn new(agent: Box<dyn Agent>, resource: Box<dyn ScopedResource>) -> Self {
        Self { agent, resource }
    }

    /// Handle for a sub-agent built synchronously
    pub fn without_resource(agent: Box<dyn Agent>) -> Self {
        let resource = NoopResource::new(agent.agent_id());
        Self::new(agent, Box::new(resource))
    }
}

/// Builds one sub-agent
#[async_trait]
pub trait SubAgentFactory: Send + Sync {
    fn agent_id(&self) -> &str;

    async fn create(&self) -> Result<AgentHandle, Error>;
}

/// Owns entered resources and releases them together
#[derive(Default)]
pub struct AggregateScope {
    entered: Vec<Box<dyn ScopedResource>>,
}

impl AggregateScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a resource; it is released before anything entered earlier
    pub fn enter(&mut self, resource: Box<dyn ScopedResource>) {
        debug!("Entering {} into aggregate scope", resource.label());
        self.entered.push(resource);
    }

    pub fn len(&self) -> usize {
        self.entered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entered.is_empty()
    }

    /// Labels in order of entry
    pub fn labels(&self) -> Vec<&str> {
        self.entered.iter().map(|r| r.label()).collect()
    }

    /// Release everything, last entered first. Every resource gets its
    /// release call even if an earlier one fails.
    pub async fn release(mut self) -> scout_common::Result<()> {
        let entered = std::mem::take(&mut self.entered);
        release_all(entered).await
    }
}

async fn release_all(mut entered: Vec<Box<dyn ScopedResource>>) -> scout_common::Result<()> {
    let mut failures = Vec::new();
    while let Some(mut resource) = entered.pop() {
        debug!("Releasing {}", resource.label());
        if let Err(e) = resource.release().await {
            warn!("Failed to release {}: {}", resource.label(), e);
            failures.push(format!("{}: {}", resource.label(), e));
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ScoutError::Resource(failures.join("; ")))
    }
}

impl Drop for AggregateScope {
    fn drop(&mut self) {
        if self.entered.is_empty() {
            return;
        }

        let entered = std::mem::take(&mut self.entered);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                warn!(
                    "Aggregate scope dropped with {} unreleased resources, releasing in background",
                    entered.len()
                );
                handle.spawn(async move {
                    if let Err(e) = release_all(entered).await {
                        error!("Background release failed: {}", e);
                    }
                });
            }
            Err(_) => {
                error!(
                    "Aggregate scope dropped outside a runtime, {} resources were not released",
                    entered.len()
                );
            }
        }
    }
}
