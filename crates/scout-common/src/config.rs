//! Configuration types for Scout
//!
//! Everything is read once at process start into a [`ScoutConfig`] and passed
//! down by reference; no component reads the environment on its own.

use crate::constants::{env, reddit, timeouts, DEFAULT_FETCH_LIMIT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    pub reddit: RedditCredentials,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub speaker: SpeakerConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            reddit: RedditCredentials::default(),
            fetch: FetchConfig::default(),
            speaker: SpeakerConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl ScoutConfig {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut speaker = SpeakerConfig::default();
        if let Some(dir) = lookup(env::SCOUT_OUTPUT_DIR).filter(|d| !d.trim().is_empty()) {
            speaker.output_dir = Some(PathBuf::from(dir));
        }

        Self {
            reddit: RedditCredentials {
                client_id: lookup(env::REDDIT_CLIENT_ID),
                client_secret: lookup(env::REDDIT_CLIENT_SECRET),
                user_agent: lookup(env::REDDIT_USER_AGENT),
            },
            fetch: FetchConfig::default(),
            speaker,
            log_level: default_log_level(),
        }
    }
}

/// Reddit API credentials, each of which may be absent
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RedditCredentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub user_agent: Option<String>,
}

/// Credentials that passed [`RedditCredentials::validate`]
#[derive(Clone, PartialEq, Eq)]
pub struct ValidCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl RedditCredentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            user_agent: Some(user_agent.into()),
        }
    }

    /// Returns the credentials only if all three values are present and non-empty
    pub fn validate(&self) -> Option<ValidCredentials> {
        fn present(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Some(ValidCredentials {
            client_id: present(&self.client_id)?,
            client_secret: present(&self.client_secret)?,
            user_agent: present(&self.user_agent)?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.validate().is_some()
    }
}

fn redact(value: &Option<String>) -> &'static str {
    match value {
        Some(v) if !v.is_empty() => "<set>",
        _ => "<unset>",
    }
}

impl fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &redact(&self.client_id))
            .field("client_secret", &redact(&self.client_secret))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl fmt::Debug for ValidCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidCredentials")
            .field("client_id", &"<set>")
            .field("client_secret", &"<set>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Live fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Number of hot posts requested when the caller gives no limit
    pub default_limit: usize,
    /// OAuth token endpoint
    pub auth_url: String,
    /// Base URL for authenticated API calls
    pub api_base_url: String,
    /// HTTP request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_FETCH_LIMIT,
            auth_url: reddit::AUTH_URL.to_string(),
            api_base_url: reddit::API_BASE_URL.to_string(),
            timeout_seconds: timeouts::DEFAULT_HTTP_TIMEOUT,
        }
    }
}

/// Speaker sub-agent settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeakerConfig {
    /// Directory for speech output; a temporary directory is used when unset
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_all_credentials_present() {
        let config = ScoutConfig::from_lookup(lookup_from(&[
            (env::REDDIT_CLIENT_ID, "id"),
            (env::REDDIT_CLIENT_SECRET, "secret"),
            (env::REDDIT_USER_AGENT, "scout/0.1"),
        ]));
        let valid = config.reddit.validate().unwrap();
        assert_eq!(valid.client_id, "id");
        assert_eq!(valid.client_secret, "secret");
        assert_eq!(valid.user_agent, "scout/0.1");
    }

    #[test]
    fn test_any_missing_credential_fails_validation() {
        let full = [
            (env::REDDIT_CLIENT_ID, "id"),
            (env::REDDIT_CLIENT_SECRET, "secret"),
            (env::REDDIT_USER_AGENT, "scout/0.1"),
        ];
        for skip in 0..full.len() {
            let pairs: Vec<_> = full
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, p)| *p)
                .collect();
            let config = ScoutConfig::from_lookup(lookup_from(&pairs));
            assert!(!config.reddit.is_configured(), "missing {:?}", full[skip].0);
        }
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let creds = RedditCredentials::new("id", "  ", "scout/0.1");
        assert!(creds.validate().is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = RedditCredentials::new("my-id", "my-secret", "scout/0.1");
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("my-secret"));
        assert!(!rendered.contains("my-id"));
        assert!(rendered.contains("scout/0.1"));
    }

    #[test]
    fn test_output_dir_from_env() {
        let config = ScoutConfig::from_lookup(lookup_from(&[(env::SCOUT_OUTPUT_DIR, "/tmp/voice")]));
        assert_eq!(config.speaker.output_dir, Some(PathBuf::from("/tmp/voice")));
        assert_eq!(config.fetch.default_limit, DEFAULT_FETCH_LIMIT);
    }
}
