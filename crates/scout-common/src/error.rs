//! Scout Common Error Types
//!
//! Centralized error handling for all Scout components

use thiserror::Error;

/// Main error type for Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
    /// Sub-agent construction or messaging errors
    #[error("Agent error: {0}")]
    Agent(String),
    /// Scoped resource release errors
    #[error("Resource error: {0}")]
    Resource(String),
}

/// Convenience result type for Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;
