//! Reddit content fetching
//!
//! Both fetchers return a [`FetchResult`]: a mapping with exactly one key,
//! the category the caller asked for, holding either titles or a single
//! informational message. Neither fetcher ever returns an error.

pub mod client;
pub mod fetcher;
pub mod mock;
pub mod source;

pub use client::RedditConnector;
pub use fetcher::ContentFetcher;
pub use mock::{MockCatalog, MockContentFetcher};
pub use source::{ContentConnector, ContentSource, SourceError};

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Titles (or one message) keyed by the requested category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    category: String,
    items: Vec<String>,
}

impl FetchResult {
    pub fn new(category: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            category: category.into(),
            items,
        }
    }

    /// A result carrying a single informational or error message
    pub fn message(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(category, vec![message.into()])
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn into_items(self) -> Vec<String> {
        self.items
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(1);
        map.insert(
            self.category.clone(),
            Value::Array(self.items.iter().cloned().map(Value::String).collect()),
        );
        Value::Object(map)
    }
}

impl Serialize for FetchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.category, &self.items)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_key_shape() {
        let result = FetchResult::new("GameDev", vec!["a".to_string(), "b".to_string()]);
        assert_eq!(result.to_json(), json!({"GameDev": ["a", "b"]}));
        assert_eq!(serde_json::to_value(&result).unwrap(), result.to_json());
    }

    #[test]
    fn test_message_result() {
        let result = FetchResult::message("rust", "nothing here");
        assert_eq!(result.category(), "rust");
        assert_eq!(result.items(), ["nothing here".to_string()]);
    }
}
