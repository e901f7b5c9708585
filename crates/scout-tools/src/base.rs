//! Base tool trait
//!
//! Tools are registered with an agent by name and invoked with JSON
//! parameters. The schema is what an LLM framework sees when deciding
//! to call the tool.

use anyhow::Error;
use async_trait::async_trait;
use serde_json::Value;

/// A tool that can be used by an agent
#[async_trait]
pub trait AiTool: Send + Sync {
    /// The name of the tool
    fn name(&self) -> &str;

    /// A description of what the tool does
    fn description(&self) -> &str;

    /// The JSON schema for the tool's parameters
    fn schema(&self) -> Value;

    /// Execute the tool with the given parameters
    async fn execute(&self, params: Value) -> Result<Value, Error>;

    /// Validate the parameters against the schema
    fn validate_params(&self, _params: &Value) -> Result<(), Error> {
        Ok(())
    }

    /// Convert to a genai Tool
    fn to_genai_tool(&self) -> genai::chat::Tool {
        genai::chat::Tool::new(self.name())
            .with_description(self.description())
            .with_schema(self.schema())
    }
}
