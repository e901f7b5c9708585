//! Scout Common - Shared configuration and error types
//!
//! This crate provides the error type, configuration records and
//! constants used across all Scout components.

pub mod config;
pub mod constants;
pub mod error;

// Re-export commonly used items
pub use config::{FetchConfig, RedditCredentials, ScoutConfig, SpeakerConfig, ValidCredentials};
pub use constants::*;
pub use error::{Result, ScoutError};
