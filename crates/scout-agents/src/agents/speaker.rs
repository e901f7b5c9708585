//! Speaker sub-agent
//!
//! Hands text to a [`SpeechBackend`] and answers with the location of the
//! produced output. Its scoped resource is the output directory: a
//! temporary one is created per session unless a directory is configured.

use crate::agents::{Agent, AgentConfig, AgentMessage, MessageResponse};
use crate::lifecycle::{AgentHandle, ScopedResource, SubAgentFactory};
use anyhow::{Error, anyhow};
use async_trait::async_trait;
use scout_common::{SpeakerConfig, agents::SPEAKER};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Turns text into something playable and returns where it was written
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn speak(&self, text: &str, output_dir: &Path) -> Result<PathBuf, Error>;
}

/// Writes the text to be spoken as a transcript file
pub struct TranscriptBackend;

#[async_trait]
impl SpeechBackend for TranscriptBackend {
    fn name(&self) -> &str {
        "transcript"
    }

    async fn speak(&self, text: &str, output_dir: &Path) -> Result<PathBuf, Error> {
        let file_name = format!(
            "speech_{}_{}.txt",
            chrono::Utc::now().format("%Y%m%d%H%M%S"),
            &Uuid::new_v4().simple().to_string()[..8]
        );
        let path = output_dir.join(file_name);
        tokio::fs::write(&path, text)
            .await
            .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;
        debug!("Wrote transcript of {} chars to {}", text.len(), path.display());
        Ok(path)
    }
}

pub struct SpeakerAgent {
    config: AgentConfig,
    backend: Arc<dyn SpeechBackend>,
    output_dir: PathBuf,
}

impl SpeakerAgent {
    pub fn new(backend: Arc<dyn SpeechBackend>, output_dir: PathBuf) -> Self {
        Self {
            config: AgentConfig::new(
                SPEAKER,
                "Speaker",
                "speaker",
                "Converts text to speech and returns where the audio was written",
            ),
            backend,
            output_dir,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// A summary or explicit text in the data wins over the message text
    fn text_to_speak(message: &AgentMessage) -> String {
        message
            .data
            .as_ref()
            .and_then(|data| data.get("summary").or_else(|| data.get("text")))
            .and_then(Value::as_str)
            .unwrap_or(&message.content)
            .trim()
            .to_string()
    }
}

#[async_trait]
impl Agent for SpeakerAgent {
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
        let text = Self::text_to_speak(&message);
        if text.is_empty() {
            return Ok(MessageResponse::error(
                message.message_id,
                "Nothing to speak".to_string(),
            ));
        }

        match self.backend.speak(&text, &self.output_dir).await {
            Ok(path) => {
                info!("Speech written by {} to {}", self.backend.name(), path.display());
                let location = path.display().to_string();
                Ok(MessageResponse::success(
                    message.message_id,
                    location.clone(),
                    Some(json!({ "location": location })),
                ))
            }
            Err(e) => {
                error!("Speech backend {} failed: {}", self.backend.name(), e);
                Ok(MessageResponse::error(
                    message.message_id,
                    format!("Failed to produce speech: {}", e),
                ))
            }
        }
    }

    fn get_available_tools(&self) -> Vec<String> {
        vec![self.backend.name().to_string()]
    }
}

/// The speaker's output directory; temporary directories are removed on release
pub struct SpeakerSession {
    output_dir: PathBuf,
    temp_dir: Option<TempDir>,
}

#[async_trait]
impl ScopedResource for SpeakerSession {
    fn label(&self) -> &str {
        "speaker_session"
    }

    async fn release(&mut self) -> Result<(), Error> {
        if let Some(dir) = self.temp_dir.take() {
            tokio::task::spawn_blocking(move || dir.close()).await??;
            info!("Removed speaker output directory {}", self.output_dir.display());
        }
        Ok(())
    }
}

/// Builds the speaker and acquires its output directory
pub struct SpeakerFactory {
    config: SpeakerConfig,
    backend: Arc<dyn SpeechBackend>,
}

impl SpeakerFactory {
    pub fn new(config: &SpeakerConfig, backend: Arc<dyn SpeechBackend>) -> Self {
        Self {
            config: config.clone(),
            backend,
        }
    }

    pub fn transcript(config: &SpeakerConfig) -> Self {
        Self::new(config, Arc::new(TranscriptBackend))
    }
}

#[async_trait]
impl SubAgentFactory for SpeakerFactory {
    fn agent_id(&self) -> &str {
        SPEAKER
    }

    async fn create(&self) -> Result<AgentHandle, Error> {
        let session = match &self.config.output_dir {
            Some(dir) => {
                tokio::fs::create_dir_all(dir)
                    .await
                    .map_err(|e| anyhow!("Failed to create {}: {}", dir.display(), e))?;
                SpeakerSession {
                    output_dir: dir.clone(),
                    temp_dir: None,
                }
            }
            None => {
                let temp_dir = tempfile::Builder::new().prefix("scout-speech-").tempdir()?;
                SpeakerSession {
                    output_dir: temp_dir.path().to_path_buf(),
                    temp_dir: Some(temp_dir),
                }
            }
        };
        info!("Created speaker writing to {}", session.output_dir.display());

        let agent = SpeakerAgent::new(self.backend.clone(), session.output_dir.clone());
        Ok(AgentHandle::new(Box::new(agent), Box::new(session)))
    }
}
