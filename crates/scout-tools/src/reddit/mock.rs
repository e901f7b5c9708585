//! Offline fallback with canned subreddit titles

use crate::reddit::FetchResult;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use scout_common::MOCK_SAMPLE_SIZE;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Static titles per lower-cased subreddit name
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    entries: HashMap<String, Vec<String>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog shipped with the binary
    pub fn builtin() -> Self {
        Self::new()
            .with_category(
                "gamedev",
                &[
                    "Show HN: My new procedural level generator using Rust",
                    "Unity releases update 2023.3 LTS - Key features discussion",
                    "Best practices for optimizing physics in networked multiplayer games",
                    "Debate: Is ECS the future for all game engines? Performance comparison.",
                    "Looking for constructive feedback on my indie game's pixel art style",
                    "How to get started with Godot 4.2 GDScript",
                    "Unreal Engine 5.4 Nanite & Lumen deep dive",
                ],
            )
            .with_category(
                "unrealengine",
                &[
                    "Unreal Engine 5.4 Performance Guide for large open worlds",
                    "How to implement advanced Niagara particle effects for magic spells",
                    "MetaHumans Animator tutorial: Lip sync and facial expressions",
                    "Showcase: Sci-Fi cinematic created entirely in UE5",
                    "Troubleshooting Lumen global illumination artifacts in indoor scenes",
                    "Marketplace highlight: Advanced locomotion system",
                    "Tips for migrating projects from UE4 to UE5",
                ],
            )
            .with_category(
                "unity3d",
                &[
                    "Best practices for mobile game optimization in Unity 2023 LTS",
                    "Understanding Unity's Data-Oriented Technology Stack (DOTS) and Burst Compiler",
                    "Tutorial: Creating custom PBR shaders with Unity Shader Graph",
                    "Top free assets from the Unity Asset Store this month",
                    "Migrating project from URP to HDRP - Common pitfalls and solutions",
                    "Introduction to Unity Muse for texture generation",
                    "Networking in Unity: Netcode for GameObjects vs Photon PUN",
                ],
            )
    }

    /// Register titles for a category. An empty list unregisters it, so the
    /// category answers with the "no mock data" message.
    pub fn with_category(mut self, name: &str, titles: &[&str]) -> Self {
        let key = name.to_lowercase();
        if titles.is_empty() {
            warn!("Ignoring mock category '{}' with no titles", name);
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, titles.iter().map(|t| t.to_string()).collect());
        }
        self
    }

    /// Case-insensitive lookup
    pub fn titles(&self, category: &str) -> Option<&[String]> {
        self.entries
            .get(&category.to_lowercase())
            .map(Vec::as_slice)
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Returns a random sample of canned titles for a subreddit
pub struct MockContentFetcher {
    catalog: Arc<MockCatalog>,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl MockContentFetcher {
    pub fn new(catalog: Arc<MockCatalog>) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    /// Use a specific random source, e.g. a seeded one in tests
    pub fn with_rng(catalog: Arc<MockCatalog>, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            catalog,
            rng: Mutex::new(Box::new(rng)),
        }
    }

    pub fn catalog(&self) -> &MockCatalog {
        &self.catalog
    }

    pub fn fetch_mock(&self, category: &str) -> FetchResult {
        info!("Simulating fetch from r/{}", category);

        let Some(available) = self.catalog.titles(category) else {
            warn!("Unknown subreddit '{}' requested", category);
            return FetchResult::message(
                category,
                format!("Sorry, I don't have mock data for r/{}.", category),
            );
        };

        let amount = available.len().min(MOCK_SAMPLE_SIZE);
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let selected = available
            .choose_multiple(&mut *rng, amount)
            .cloned()
            .collect();
        FetchResult::new(category, selected)
    }
}
