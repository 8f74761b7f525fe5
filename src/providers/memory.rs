// ABOUTME: In-memory heat score store backed by a sharded concurrent map
// ABOUTME: Keyed by activity id; athlete queries scan and sort by analysis time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::core::{HeatScoreStore, StoredHeatScore};
use async_trait::async_trait;
use dashmap::DashMap;
use heatwise_core::errors::AppResult;
use std::sync::Arc;

/// Heat score store held entirely in memory
///
/// `DashMap` shards writes so concurrent analyses do not contend on one lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHeatScoreStore {
    scores: Arc<DashMap<String, StoredHeatScore>>,
}

impl InMemoryHeatScoreStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored scores
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[async_trait]
impl HeatScoreStore for InMemoryHeatScoreStore {
    async fn save(&self, record: StoredHeatScore) -> AppResult<()> {
        self.scores.insert(record.activity_id.clone(), record);
        Ok(())
    }

    async fn get(&self, activity_id: &str) -> AppResult<Option<StoredHeatScore>> {
        Ok(self.scores.get(activity_id).map(|entry| entry.value().clone()))
    }

    async fn scores_for_athlete(&self, athlete_id: &str) -> AppResult<Vec<StoredHeatScore>> {
        let mut scores: Vec<StoredHeatScore> = self
            .scores
            .iter()
            .filter(|entry| entry.athlete_id == athlete_id)
            .map(|entry| entry.value().clone())
            .collect();
        scores.sort_by_key(|s| s.analyzed_at);
        Ok(scores)
    }
}
