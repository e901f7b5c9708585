//! Common constants used across Scout

/// Default number of hot posts requested from a subreddit
pub const DEFAULT_FETCH_LIMIT: usize = 5;

/// Maximum number of titles returned by the mock fetcher
pub const MOCK_SAMPLE_SIZE: usize = 3;

/// Subreddit used when a request does not name one
pub const DEFAULT_SUBREDDIT: &str = "gamedev";

/// Environment variables holding the Reddit API credentials
pub mod env {
    pub const REDDIT_CLIENT_ID: &str = "REDDIT_CLIENT_ID";
    pub const REDDIT_CLIENT_SECRET: &str = "REDDIT_CLIENT_SECRET";
    pub const REDDIT_USER_AGENT: &str = "REDDIT_USER_AGENT";
    pub const SCOUT_OUTPUT_DIR: &str = "SCOUT_OUTPUT_DIR";
}

/// Reddit endpoints
pub mod reddit {
    pub const AUTH_URL: &str = "https://www.reddit.com/api/v1/access_token";
    pub const API_BASE_URL: &str = "https://oauth.reddit.com";
}

/// Sub-agent identifiers
pub mod agents {
    pub const COORDINATOR: &str = "coordinator_agent";
    pub const REDDIT_SCOUT: &str = "reddit_scout_agent";
    pub const SUMMARIZER: &str = "summarizer_agent";
    pub const SPEAKER: &str = "speaker_agent";
}

/// Default timeout values in seconds
pub mod timeouts {
    pub const DEFAULT_HTTP_TIMEOUT: u64 = 30;
}
